//! Capture and read-back specs

use crate::prelude::*;

#[test]
fn log_echoes_and_stores() {
    let store = Store::empty();

    store
        .ringlog()
        .args(&["log", "hello", "world"])
        .passes()
        .stdout_eq("hello world\n");

    let entries = store.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["txt"], r#"["hello","world"]"#);
    assert_eq!(entries[0]["lv"], "l");
}

#[test]
fn warnings_echo_to_stderr() {
    let store = Store::empty();

    store
        .ringlog()
        .args(&["log", "--level", "warn", "careful"])
        .passes()
        .stderr_has("careful")
        .stdout_lacks("careful");

    assert_eq!(store.entries()[0]["lv"], "w");
}

#[test]
fn json_arguments_are_stored_as_values() {
    let store = Store::empty();
    store
        .ringlog()
        .args(&["log", "--json", "{\"id\":7}", "plain"])
        .passes();

    assert_eq!(store.entries()[0]["txt"], r#"[{"id":7},"plain"]"#);
}

#[test]
fn disable_echo_still_captures() {
    let store = Store::empty();
    store.config("disable_echo = true\n");

    store.ringlog().args(&["log", "quiet"]).passes().stdout_eq("");
    assert_eq!(store.entries().len(), 1);
}

#[test]
fn disable_capture_still_echoes() {
    let store = Store::empty();
    store.config("disable_capture = true\n");

    store.ringlog().args(&["log", "loud"]).passes().stdout_eq("loud\n");
    store.ringlog().args(&["count"]).passes().stdout_eq("0\n");
}

#[test]
fn show_prints_entries_oldest_first() {
    let store = Store::empty();
    store.log("first");
    store.log("second");

    let out = store.ringlog().args(&["show"]).passes().stdout();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(r#"log       ["first"]"#));
    assert!(lines[1].ends_with(r#"log       ["second"]"#));
}

#[test]
fn show_limit_keeps_the_newest() {
    let store = Store::empty();
    for message in ["a", "b", "c"] {
        store.log(message);
    }

    let out = store
        .ringlog()
        .args(&["show", "--limit", "2"])
        .passes()
        .stdout();
    assert_eq!(out.lines().count(), 2);
    assert!(out.contains(r#"["b"]"#));
    assert!(out.contains(r#"["c"]"#));
    assert!(!out.contains(r#"["a"]"#));
}

#[test]
fn count_and_clear() {
    let store = Store::empty();
    store.log("a");
    store.log("b");

    store.ringlog().args(&["count"]).passes().stdout_eq("2\n");
    store.ringlog().args(&["clear"]).passes().stdout_eq("Cleared\n");
    store.ringlog().args(&["count"]).passes().stdout_eq("0\n");
    store
        .ringlog()
        .args(&["show", "--format", "json"])
        .passes()
        .stdout_eq("[]\n");
}

#[test]
fn unreadable_index_file_starts_an_empty_store() {
    let store = Store::empty();
    store.log("lost");
    std::fs::write(store.path().join("_ek.val"), [0xff, 0xfe, 0x00]).unwrap();

    store.ringlog().args(&["count"]).passes().stdout_eq("0\n");
    store.log("fresh");
    assert_eq!(store.entries()[0]["txt"], r#"["fresh"]"#);
}

#[test]
fn unreadable_slot_file_is_skipped_by_show() {
    let store = Store::empty();
    store.log("a");
    store.log("b");
    std::fs::write(store.path().join("_v1.val"), [0xff, 0xfe]).unwrap();

    let entries = store.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["txt"], r#"["b"]"#);
}
