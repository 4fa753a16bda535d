// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the remote collector and the original console

pub mod sender;
pub mod sink;
pub mod traced;

pub use sender::{HttpSender, SendError, Sender};
pub use sink::{render_args, ConsoleSink, NullSink, StdioSink};
pub use traced::{TracedSender, TracedSink};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use sender::{FakeSender, SendOutcome};
#[cfg(any(test, feature = "test-support"))]
pub use sink::{FakeSink, SinkCall};
