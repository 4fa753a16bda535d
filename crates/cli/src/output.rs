// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use ringlog_core::LogEntry;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A stored entry as `show` prints it
#[derive(Serialize)]
#[serde(transparent)]
pub struct EntryLine(pub LogEntry);

impl fmt::Display for EntryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = &self.0;
        write!(f, "{} {:<9} {}", entry.date, entry.lv.as_str(), entry.txt)?;
        for details in entry.err_infos.iter().flatten() {
            for location in &details.source_locations {
                write!(
                    f,
                    "\n    at {}:{}:{}",
                    location.file, location.line, location.column
                )?;
            }
        }
        Ok(())
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}
