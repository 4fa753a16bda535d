// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ringlog-core: shared types for the ringlog log interceptor
//!
//! This crate provides:
//! - Log entries and levels in their stored form
//! - The captured-value model and the serializer that renders it
//! - Configuration
//! - A clock abstraction for deterministic timer tests

pub mod captured;
pub mod clock;
pub mod config;
pub mod entry;
pub mod serializer;

pub use captured::{Captured, ErrorEvent, ErrorValue, FileInfo, SharedValue};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{Config, ConfigError, DeliveryMode};
pub use entry::{render_timestamp, ErrorDetails, Level, LogEntry, SourceLocation};
pub use serializer::{Converter, SerializeError, Serializer, SENTINEL};
