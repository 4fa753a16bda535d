// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ringlog log` - capture one console call

use super::{call, Method};
use crate::adapters::CliLogger;
use anyhow::Result;
use clap::Args;
use ringlog_adapters::StdioSink;
use ringlog_core::Captured;
use std::sync::Arc;

#[derive(Args)]
pub struct LogArgs {
    /// Console method to call
    #[arg(long, short, value_enum, default_value = "log")]
    pub level: Method,

    /// Parse each argument as JSON, falling back to a plain string
    #[arg(long)]
    pub json: bool,

    /// Arguments of the call
    pub args: Vec<String>,
}

pub fn handle(args: LogArgs, logger: &CliLogger) -> Result<()> {
    let console = logger.install(Arc::new(StdioSink));
    let captured: Vec<Captured> = args
        .args
        .into_iter()
        .map(|arg| to_captured(arg, args.json))
        .collect();

    call(&console, args.level, &captured);
    logger.flush()?;
    Ok(())
}

pub(crate) fn to_captured(arg: String, json: bool) -> Captured {
    if json {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&arg) {
            return Captured::Json(value);
        }
    }
    Captured::String(arg)
}
