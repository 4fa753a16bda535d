// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ringlog - capture console output into a persistent ring and submit it

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod adapters;
mod commands;
mod error;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{log, pipe, show, submit};
use ringlog_core::DeliveryMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ringlog",
    version,
    about = "Ring-buffered console capture with deferred submission"
)]
struct Cli {
    /// Store directory (defaults to the platform data directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Config file (defaults to config.toml in the store directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture one console call
    Log(log::LogArgs),
    /// Capture stdin line by line until EOF or interrupt
    Pipe(pipe::PipeArgs),
    /// Print stored entries, oldest first
    Show(show::ShowArgs),
    /// Print the number of stored entries
    Count,
    /// Send stored entries to a collector and evict what it accepted
    Submit(submit::SubmitArgs),
    /// Drop every stored entry
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let dir = adapters::store_dir(cli.dir)?;
    let mut config = adapters::load_config(cli.config.as_deref(), &dir)?;
    if matches!(cli.command, Commands::Submit(_)) {
        // A detached send would not outlive the process
        config.delivery = DeliveryMode::Acknowledged;
    }
    let logger = adapters::make_logger(&dir, config)?;

    match cli.command {
        Commands::Log(args) => log::handle(args, &logger)?,
        Commands::Pipe(args) => pipe::handle(args, &logger).await?,
        Commands::Show(args) => show::handle(args, &logger)?,
        Commands::Count => show::count(&logger)?,
        Commands::Submit(args) => submit::handle(args, &logger).await?,
        Commands::Clear => {
            logger.clear().context("clearing the store")?;
            println!("Cleared");
        }
    }

    Ok(())
}

/// Diagnostics go to stderr, filtered by `RINGLOG_LOG` (default `warn`)
fn setup_logging() {
    let filter = EnvFilter::try_from_env("RINGLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
