// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake sender for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{SendError, Sender};
use async_trait::async_trait;
use ringlog_core::LogEntry;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// How the fake answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Accept,
    Reject(String),
}

#[derive(Default)]
struct Gate {
    enabled: bool,
    notify: Arc<Notify>,
}

/// Fake sender that records every batch it is handed
#[derive(Clone)]
pub struct FakeSender {
    batches: Arc<Mutex<Vec<Vec<LogEntry>>>>,
    outcome: Arc<Mutex<SendOutcome>>,
    gate: Arc<Mutex<Gate>>,
}

impl Default for FakeSender {
    fn default() -> Self {
        Self {
            batches: Arc::default(),
            outcome: Arc::new(Mutex::new(SendOutcome::Accept)),
            gate: Arc::default(),
        }
    }
}

impl FakeSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender that fails every batch with the given reason
    pub fn rejecting(reason: &str) -> Self {
        let sender = Self::default();
        sender.set_outcome(SendOutcome::Reject(reason.to_string()));
        sender
    }

    /// A sender whose calls block until [`FakeSender::release`]
    pub fn gated() -> Self {
        let sender = Self::default();
        sender.gate.lock().unwrap_or_else(|e| e.into_inner()).enabled = true;
        sender
    }

    pub fn set_outcome(&self, outcome: SendOutcome) {
        *self.outcome.lock().unwrap_or_else(|e| e.into_inner()) = outcome;
    }

    /// Let one blocked (or the next) call complete
    pub fn release(&self) {
        self.gate
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .notify
            .notify_one();
    }

    /// Every batch received, in call order
    pub fn batches(&self) -> Vec<Vec<LogEntry>> {
        self.batches.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.batches.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl Sender for FakeSender {
    async fn send(&self, entries: &[LogEntry]) -> Result<(), SendError> {
        self.batches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entries.to_vec());

        let gate = {
            let gate = self.gate.lock().unwrap_or_else(|e| e.into_inner());
            gate.enabled.then(|| Arc::clone(&gate.notify))
        };
        if let Some(notify) = gate {
            notify.notified().await;
        }

        let outcome = self.outcome.lock().unwrap_or_else(|e| e.into_inner()).clone();
        match outcome {
            SendOutcome::Accept => Ok(()),
            SendOutcome::Reject(reason) => Err(SendError::Rejected(reason)),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
