// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery of stored entries to a remote collector

mod http;

pub use http::HttpSender;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSender, SendOutcome};

use async_trait::async_trait;
use ringlog_core::LogEntry;
use thiserror::Error;

/// Errors from a delivery attempt
#[derive(Debug, Error)]
pub enum SendError {
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("collector answered with status {0}")]
    Status(u16),
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Transport for a batch of entries, oldest first.
///
/// `Ok` means the collector accepted the whole batch; anything else leaves
/// the entries in the store.
#[async_trait]
pub trait Sender: Send + Sync + 'static {
    async fn send(&self, entries: &[LogEntry]) -> Result<(), SendError>;
}
