// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake console sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{render_args, ConsoleSink};
use ringlog_core::{Captured, Level};
use std::sync::{Arc, Mutex};

/// Recorded console write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkCall {
    pub level: Level,
    pub text: String,
}

/// Fake sink that records every write
#[derive(Clone, Default)]
pub struct FakeSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
}

impl FakeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded writes
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded texts at the given level
    pub fn texts(&self, level: Level) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.level == level)
            .map(|c| c.text)
            .collect()
    }
}

impl ConsoleSink for FakeSink {
    fn write(&self, level: Level, args: &[Captured]) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SinkCall {
                level,
                text: render_args(args),
            });
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
