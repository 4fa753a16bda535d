//! Submission specs

use crate::prelude::*;

#[test]
fn empty_store_has_nothing_to_submit() {
    let store = Store::empty();
    store
        .ringlog()
        .args(&["submit", "--url", &unreachable_url()])
        .passes()
        .stdout_has("nothing to submit");
}

#[test]
fn accepted_batch_is_evicted() {
    let store = Store::empty();
    store.log("a");
    store.log("b");
    let collector = Collector::start(200);

    store
        .ringlog()
        .args(&["submit", "--url", &collector.url])
        .passes()
        .stdout_has("Submitted 2 entries, evicted 2");

    let body = collector.body();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["txt"], r#"["a"]"#);
    assert_eq!(body[1]["lv"], "l");
    store.ringlog().args(&["count"]).passes().stdout_eq("0\n");
}

#[test]
fn rejected_batch_is_kept() {
    let store = Store::empty();
    store.log("keep me");
    let collector = Collector::start(503);

    store
        .ringlog()
        .args(&["submit", "--url", &collector.url])
        .fails()
        .stderr_has("did not accept 1 entries")
        .stderr_has("503");

    collector.body();
    store.ringlog().args(&["count"]).passes().stdout_eq("1\n");
}

#[test]
fn unreachable_collector_keeps_entries() {
    let store = Store::empty();
    store.log("a");

    store
        .ringlog()
        .args(&["submit", "--url", &unreachable_url()])
        .fails()
        .stderr_has("the entries are still stored");

    store.ringlog().args(&["count"]).passes().stdout_eq("1\n");
}

#[test]
fn fire_and_forget_config_still_waits_for_the_collector() {
    let store = Store::empty();
    store.config("delivery = \"fire-and-forget\"\n");
    store.log("a");
    let collector = Collector::start(200);

    store
        .ringlog()
        .args(&["submit", "--url", &collector.url])
        .passes()
        .stdout_has("evicted 1");
    collector.body();
}
