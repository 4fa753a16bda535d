// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The original console: where captured calls are echoed

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSink, SinkCall};

use ringlog_core::{Captured, Level, Serializer};
use std::io::Write;

/// Destination for console output that existed before capture was installed
pub trait ConsoleSink: Send + Sync + 'static {
    fn write(&self, level: Level, args: &[Captured]);
}

/// Render console arguments the way a terminal shows them: strings as they
/// are, everything else as JSON, separated by spaces
pub fn render_args(args: &[Captured]) -> String {
    let serializer = Serializer::new();
    args.iter()
        .map(|arg| match arg {
            Captured::String(s) => s.clone(),
            other => serializer.serialize(other),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes logs to stdout and everything more severe to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioSink;

impl ConsoleSink for StdioSink {
    fn write(&self, level: Level, args: &[Captured]) {
        let line = render_args(args);
        // A closed pipe must not take the process down
        let _ = match level {
            Level::Log | Level::None => writeln!(std::io::stdout().lock(), "{line}"),
            Level::Warn | Level::Error | Level::UnhandledRejection => {
                writeln!(std::io::stderr().lock(), "{line}")
            }
        };
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ConsoleSink for NullSink {
    fn write(&self, _level: Level, _args: &[Captured]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_args_keeps_strings_raw() {
        let args = vec![
            Captured::from("count:"),
            Captured::from(3i64),
            Captured::object([("ok", Captured::from(true))]),
        ];
        assert_eq!(render_args(&args), "count: 3 {\"ok\":true}");
    }

    #[test]
    fn render_no_args_is_empty() {
        assert_eq!(render_args(&[]), "");
    }
}
