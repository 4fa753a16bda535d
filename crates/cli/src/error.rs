// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing errors with context and suggestions

use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// No `--dir` given and the platform has no local data directory
    pub fn no_data_dir() -> Self {
        CliError::new("no store directory")
            .with_context("this platform reports no local data directory")
            .with_suggestion("pass one explicitly: ringlog --dir <path> ...")
    }

    pub fn invalid_config(path: &Path, reason: impl fmt::Display) -> Self {
        CliError::new(format!("invalid config {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestion("every option is optional; an empty file is a valid config")
    }

    /// The collector did not accept the batch; nothing was evicted
    pub fn collector_rejected(url: &str, entries: usize, reason: &str) -> Self {
        CliError::new(format!("{url} did not accept {entries} entries"))
            .with_context(reason.to_string())
            .with_context("the entries are still stored")
            .with_suggestion("retry later: ringlog submit --url <collector>")
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        for ctx in &self.context {
            write!(f, "\n  -> {ctx}")?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n\nsuggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                write!(f, "\n  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {}
