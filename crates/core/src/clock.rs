// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Timers run off the monotonic [`Instant`]; entry timestamps are rendered
//! from the wall clock. A clock provides both so tests can drive them together.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync + 'static {
    /// Monotonic time, used for flush timers
    fn now(&self) -> Instant;

    /// Wall-clock time, used for rendering entry timestamps
    fn wall(&self) -> DateTime<Local>;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<Local> {
        Local::now()
    }
}

struct FakeTime {
    instant: Instant,
    wall: DateTime<Utc>,
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        // 2024-01-01T00:00:00Z; any fixed point works
        let wall = Utc
            .timestamp_opt(1_704_067_200, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self {
            current: Arc::new(Mutex::new(FakeTime {
                instant: Instant::now(),
                wall,
            })),
        }
    }

    /// Advance both the monotonic and the wall clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.instant += duration;
        if let Ok(delta) = chrono::Duration::from_std(duration) {
            current.wall += delta;
        }
    }

    /// Set the wall clock to a specific time without moving the monotonic clock
    pub fn set_wall(&self, wall: DateTime<Utc>) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.wall = wall;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .instant
    }

    fn wall(&self) -> DateTime<Local> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .wall
            .with_timezone(&Local)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
