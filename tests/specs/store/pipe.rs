//! Pipe specs

use crate::prelude::*;

#[test]
fn every_stdin_line_becomes_an_entry() {
    let store = Store::empty();

    store
        .ringlog()
        .args(&["pipe"])
        .stdin("one\ntwo\nthree\n")
        .passes()
        .stdout_eq("one\ntwo\nthree\n");

    let texts: Vec<String> = store
        .entries()
        .iter()
        .map(|e| e["txt"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, vec![r#"["one"]"#, r#"["two"]"#, r#"["three"]"#]);
}

#[test]
fn pipe_level_applies_to_every_line() {
    let store = Store::empty();
    store
        .ringlog()
        .args(&["pipe", "--level", "error"])
        .stdin("bad\nworse\n")
        .passes();

    let entries = store.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e["lv"] == "e"));
}

#[test]
fn empty_stdin_stores_nothing() {
    let store = Store::empty();
    store.ringlog().args(&["pipe"]).stdin("").passes();
    store.ringlog().args(&["count"]).passes().stdout_eq("0\n");
}
