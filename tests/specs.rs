//! Black-box behavior tests for the ringlog CLI.
//!
//! These tests are black-box: they invoke the CLI binary against a
//! temporary store directory and verify stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// store/
#[path = "specs/store/capture.rs"]
mod store_capture;
#[path = "specs/store/capacity.rs"]
mod store_capacity;
#[path = "specs/store/pipe.rs"]
mod store_pipe;

// submit/
#[path = "specs/submit/delivery.rs"]
mod submit_delivery;
