// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log entries as they are staged, stored and submitted
//!
//! The stored form is one JSON object per slot:
//!
//! ```text
//! {"date":"2024-01-01 08:00:00.000","txt":"[\"hello\"]","lv":"l"}
//! ```

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a captured entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "l")]
    Log,
    #[serde(rename = "w")]
    Warn,
    #[serde(rename = "e")]
    Error,
    #[serde(rename = "pe")]
    UnhandledRejection,
    #[serde(rename = "n")]
    None,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Log => "log",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::UnhandledRejection => "rejection",
            Level::None => "none",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "log" | "l" | "info" => Ok(Level::Log),
            "warn" | "w" | "warning" => Ok(Level::Warn),
            "error" | "e" => Ok(Level::Error),
            "rejection" | "pe" => Ok(Level::UnhandledRejection),
            "none" | "n" => Ok(Level::None),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// A `file:line:column` position found in a stack trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

/// Structured details extracted from an error-like value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub message: String,
    pub stack: String,
    #[serde(default)]
    pub source_locations: Vec<SourceLocation>,
}

/// A single captured log entry. Never mutated after capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Rendered capture time
    pub date: String,
    /// Serialized payload
    pub txt: String,
    pub lv: Level,
    #[serde(rename = "errInfos", default, skip_serializing_if = "Option::is_none")]
    pub err_infos: Option<Vec<ErrorDetails>>,
}

impl LogEntry {
    pub fn new(date: impl Into<String>, txt: impl Into<String>, lv: Level) -> Self {
        Self {
            date: date.into(),
            txt: txt.into(),
            lv,
            err_infos: None,
        }
    }

    /// Attach error details; an empty list leaves the entry without details
    pub fn with_error_details(mut self, details: Vec<ErrorDetails>) -> Self {
        self.err_infos = if details.is_empty() {
            None
        } else {
            Some(details)
        };
        self
    }

    /// Parse a stored slot. Text that is not an entry (for example a
    /// serializer sentinel) is kept verbatim under [`Level::None`].
    pub fn from_stored(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_else(|_| LogEntry::new("", text, Level::None))
    }

    /// Structural identity used to find a submitted entry again after the
    /// store has shifted: payload, level and timestamp.
    pub fn same_as(&self, other: &LogEntry) -> bool {
        self.txt == other.txt && self.lv == other.lv && self.date == other.date
    }
}

/// Render a capture timestamp as `YYYY-MM-DD HH:mm:ss.SSS`
pub fn render_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
