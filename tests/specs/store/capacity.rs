//! Ring capacity specs

use crate::prelude::*;

#[test]
fn oldest_entries_are_dropped_at_capacity() {
    let store = Store::empty();
    store.config("capacity = 3\n");
    for n in 1..=5 {
        store.log(&format!("m{n}"));
    }

    let texts: Vec<String> = store
        .entries()
        .iter()
        .map(|e| e["txt"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, vec![r#"["m3"]"#, r#"["m4"]"#, r#"["m5"]"#]);
}

#[test]
fn oversized_entry_takes_several_slots() {
    let store = Store::empty();
    store.config("capacity = 4\nmax_entry_size_bytes = 100\n");
    store.log("small");
    store.log(&"x".repeat(150));

    // About 200 bytes: three slots, so the ring is now full
    let entries = store.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["txt"], r#"["small"]"#);
    assert!(entries[1]["txt"].as_str().unwrap().contains(&"x".repeat(150)));

    // The next entry reuses the oldest slot and the large entry survives
    store.log("next");
    let texts: Vec<String> = store
        .entries()
        .iter()
        .map(|e| e["txt"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts.len(), 2);
    assert!(texts[0].contains("xxx"));
    assert_eq!(texts[1], r#"["next"]"#);
}
