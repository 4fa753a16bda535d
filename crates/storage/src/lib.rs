// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable storage for ringlog: the key-value interface and the ring of
//! log slots built on it

mod file;
mod kv;
mod ring;

pub use file::FileKv;
pub use kv::{KvError, KvStore, MemoryKv};
pub use ring::{RingError, RingStore};
