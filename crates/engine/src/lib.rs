// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ringlog engine: capture, debounced persistence and submission

mod buffer;
mod console;
mod driver;
mod error;
mod layer;
mod logger;
mod panic;
mod scheduler;

pub use buffer::StagingBuffer;
pub use console::Console;
pub use driver::{spawn_timer_driver, TimerDriver};
pub use error::{FlushError, SubmitError};
pub use layer::CaptureLayer;
pub use logger::{Logger, SubmitOutcome};
pub use panic::PanicCapture;
pub use scheduler::{FlushScheduler, TimerKind, TimerToken};
