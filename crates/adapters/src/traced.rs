// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::sender::{SendError, Sender};
use crate::sink::ConsoleSink;
use async_trait::async_trait;
use tracing::Instrument;
use ringlog_core::{Captured, Level, LogEntry};

/// Wrapper that adds tracing to any Sender
#[derive(Clone)]
pub struct TracedSender<S> {
    inner: S,
}

impl<S> TracedSender<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: Sender> Sender for TracedSender<S> {
    async fn send(&self, entries: &[LogEntry]) -> Result<(), SendError> {
        let span = tracing::info_span!("sender.send", entries = entries.len());

        async {
            if entries.is_empty() {
                tracing::debug!("empty batch");
            }

            let start = std::time::Instant::now();
            let result = self.inner.send(entries).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "batch accepted"),
                Err(e) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "batch rejected"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that traces every console write
#[derive(Clone)]
pub struct TracedSink<S> {
    inner: S,
}

impl<S> TracedSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: ConsoleSink> ConsoleSink for TracedSink<S> {
    fn write(&self, level: Level, args: &[Captured]) {
        tracing::trace!(%level, args = args.len(), "console write");
        self.inner.write(level, args);
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
