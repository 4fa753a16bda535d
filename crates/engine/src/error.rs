// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the logger

use ringlog_storage::RingError;
use thiserror::Error;

/// A flush could not merge staged entries; they stay staged for the next one
#[derive(Debug, Error)]
pub enum FlushError {
    #[error("merging {entries} staged entries failed: {source}")]
    Merge {
        entries: usize,
        #[source]
        source: RingError,
    },
}

/// Errors that stop a submission before the sender is called
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("flush before submit failed: {0}")]
    Flush(#[from] FlushError),
    #[error("reading stored entries failed: {0}")]
    Read(#[source] RingError),
    #[error("evicting delivered entries failed: {0}")]
    Evict(#[source] RingError),
}
