//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    let store = Store::empty();
    let run = store.ringlog().args(&["--help"]).passes();
    for command in ["log", "pipe", "show", "count", "submit", "clear"] {
        assert!(run.stdout().contains(command), "missing {command}");
    }
}

#[test]
fn submit_help_documents_url() {
    Store::empty()
        .ringlog()
        .args(&["submit", "--help"])
        .passes()
        .stdout_has("--url");
}
