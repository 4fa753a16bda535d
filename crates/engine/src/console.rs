// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console interception
//!
//! [`Logger::install`] wraps the original console: calls are echoed to it
//! and captured by the logger, subject to `disable_echo` and
//! `disable_capture`. [`Console::uninstall`] hands the original back.

use crate::logger::Logger;
use ringlog_adapters::{ConsoleSink, NullSink};
use ringlog_core::{Captured, Clock, ErrorEvent, Level};
use ringlog_storage::KvStore;
use std::sync::Arc;

impl<K: KvStore + 'static, C: Clock> Logger<K, C> {
    /// Route console output through this logger. Messages from the logger
    /// itself (storage failures, "nothing to submit") go to `original`.
    pub fn install(&self, original: Arc<dyn ConsoleSink>) -> Console<K, C> {
        self.set_reporter(Arc::clone(&original));
        tracing::debug!("console installed");
        Console {
            logger: self.clone(),
            original,
        }
    }
}

pub struct Console<K, C> {
    logger: Logger<K, C>,
    original: Arc<dyn ConsoleSink>,
}

impl<K, C> Clone for Console<K, C> {
    fn clone(&self) -> Self {
        Self {
            logger: self.logger.clone(),
            original: Arc::clone(&self.original),
        }
    }
}

impl<K: KvStore + 'static, C: Clock> Console<K, C> {
    pub fn log(&self, args: &[Captured]) {
        self.call(Level::Log, args);
    }

    pub fn warn(&self, args: &[Captured]) {
        self.call(Level::Warn, args);
    }

    pub fn error(&self, args: &[Captured]) {
        self.call(Level::Error, args);
    }

    /// An uncaught error or failed resource load. Captured, not echoed.
    pub fn report_error_event(&self, event: ErrorEvent) {
        if !self.logger.config().disable_capture {
            self.logger.capture(Level::Error, &[Captured::ErrorEvent(event)]);
        }
    }

    /// A rejected task nobody handled. Captured, not echoed.
    pub fn report_unhandled_rejection(&self, reason: Captured) {
        if !self.logger.config().disable_capture {
            self.logger.capture(
                Level::UnhandledRejection,
                &[Captured::Rejection(Box::new(reason))],
            );
        }
    }

    pub fn logger(&self) -> &Logger<K, C> {
        &self.logger
    }

    /// Stop routing through the logger and return the original console
    pub fn uninstall(self) -> Arc<dyn ConsoleSink> {
        self.logger.set_reporter(Arc::new(NullSink));
        tracing::debug!("console uninstalled");
        self.original
    }

    fn call(&self, level: Level, args: &[Captured]) {
        let config = self.logger.config();
        if !config.disable_capture {
            self.logger.capture(level, args);
        }
        if !config.disable_echo {
            self.original.write(level, args);
        }
    }
}

impl<K: KvStore + 'static, C: Clock> ConsoleSink for Console<K, C> {
    fn write(&self, level: Level, args: &[Captured]) {
        self.call(level, args);
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
