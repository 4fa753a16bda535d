// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ringlog show` and `ringlog count` - read the stored history

use crate::adapters::CliLogger;
use crate::output::{print_list, EntryLine, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct ShowArgs {
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Only the newest N entries
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

pub fn handle(args: ShowArgs, logger: &CliLogger) -> Result<()> {
    let mut entries = logger.entries().context("reading stored entries")?;
    if let Some(limit) = args.limit {
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
    }
    let lines: Vec<EntryLine> = entries.into_iter().map(EntryLine).collect();
    print_list(&lines, args.format);
    Ok(())
}

pub fn count(logger: &CliLogger) -> Result<()> {
    println!("{}", logger.stored());
    Ok(())
}
