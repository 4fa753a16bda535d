// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ringlog pipe` - capture stdin line by line on the timer schedule

use super::{call, Method};
use crate::adapters::CliLogger;
use anyhow::Result;
use clap::Args;
use ringlog_adapters::StdioSink;
use ringlog_core::Captured;
use ringlog_engine::{spawn_timer_driver, PanicCapture};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args)]
pub struct PipeArgs {
    /// Console method each line goes through
    #[arg(long, short, value_enum, default_value = "log")]
    pub level: Method,
}

pub async fn handle(args: PipeArgs, logger: &CliLogger) -> Result<()> {
    let console = logger.install(Arc::new(StdioSink));
    let panics = PanicCapture::install(console.clone());
    let driver = spawn_timer_driver(logger.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut captured = 0usize;
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    call(&console, args.level, &[Captured::String(line)]);
                    captured += 1;
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    driver.shutdown().await;
    panics.uninstall();
    tracing::debug!(captured, "pipe closed");
    Ok(())
}
