// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod log;
pub mod pipe;
pub mod show;
pub mod submit;

use clap::ValueEnum;
use ringlog_core::{Captured, Clock};
use ringlog_engine::Console;
use ringlog_storage::KvStore;

/// Console method a captured line goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    Log,
    Warn,
    Error,
}

pub(crate) fn call<K: KvStore + 'static, C: Clock>(
    console: &Console<K, C>,
    method: Method,
    args: &[Captured],
) {
    match method {
        Method::Log => console.log(args),
        Method::Warn => console.warn(args),
        Method::Error => console.error(args),
    }
}
