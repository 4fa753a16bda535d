//! Error reporting specs

use crate::prelude::*;

#[test]
fn invalid_config_is_reported_with_its_path() {
    let store = Store::empty();
    store.config("capacity = 0\n");

    store
        .ringlog()
        .args(&["count"])
        .fails()
        .stderr_has("invalid config")
        .stderr_has("capacity must be at least 1");
}

#[test]
fn explicit_config_file_must_exist() {
    let store = Store::empty();
    let missing = store.path().join("missing.toml");

    store
        .ringlog()
        .args(&["--config", missing.to_str().unwrap(), "count"])
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn unknown_level_is_rejected() {
    Store::empty()
        .ringlog()
        .args(&["log", "--level", "loud", "x"])
        .fails()
        .stderr_has("invalid value");
}

#[test]
fn submit_requires_url() {
    Store::empty()
        .ringlog()
        .args(&["submit"])
        .fails()
        .stderr_has("--url");
}
