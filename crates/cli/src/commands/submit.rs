// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ringlog submit` - deliver the stored history to a collector

use crate::adapters::CliLogger;
use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use ringlog_adapters::{HttpSender, Sender, StdioSink, TracedSender};
use ringlog_engine::SubmitOutcome;
use std::sync::Arc;

#[derive(Args)]
pub struct SubmitArgs {
    /// Collector endpoint that accepts a JSON array of entries
    #[arg(long)]
    pub url: String,
}

pub async fn handle(args: SubmitArgs, logger: &CliLogger) -> Result<()> {
    // "nothing to submit" is reported through the console
    let _console = logger.install(Arc::new(StdioSink));
    let sender: Arc<dyn Sender> = Arc::new(TracedSender::new(HttpSender::new(&args.url)));

    match logger.submit(Some(sender)).await? {
        SubmitOutcome::NothingToSubmit | SubmitOutcome::NoSender => {}
        SubmitOutcome::Spawned { entries } => {
            println!("Sent {entries} entries");
        }
        SubmitOutcome::Delivered { entries, evicted } => {
            println!("Submitted {entries} entries, evicted {evicted}");
        }
        SubmitOutcome::Rejected { entries, reason } => {
            return Err(CliError::collector_rejected(&args.url, entries, &reason).into());
        }
    }
    Ok(())
}
