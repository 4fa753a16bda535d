// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic flush timers
//!
//! Timers are plain deadlines polled against a clock, so tests drive them
//! with a fake clock instead of sleeping.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

/// Which flush timer fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Fires after a quiet period following the last capture
    Debounce,
    /// Fires periodically whether or not captures keep arriving
    Floor,
}

/// Handle used to cancel a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Clone)]
struct ScheduledTimer {
    token: TimerToken,
    fire_at: Instant,
    kind: TimerKind,
}

impl PartialEq for ScheduledTimer {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.token == other.token
    }
}

impl Eq for ScheduledTimer {}

impl PartialOrd for ScheduledTimer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTimer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap: earliest first, then in scheduling order
        Reverse((self.fire_at, self.token.0)).cmp(&Reverse((other.fire_at, other.token.0)))
    }
}

/// Holds at most one pending timer per [`TimerKind`]
#[derive(Debug, Default)]
pub struct FlushScheduler {
    items: BinaryHeap<ScheduledTimer>,
    armed: HashMap<TimerKind, TimerToken>,
    next_token: u64,
}

impl FlushScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `fire_at`, replacing any pending timer of
    /// the same kind
    pub fn arm(&mut self, kind: TimerKind, fire_at: Instant) -> TimerToken {
        self.disarm(kind);
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.items.push(ScheduledTimer {
            token,
            fire_at,
            kind,
        });
        self.armed.insert(kind, token);
        token
    }

    /// Cancel the pending timer of `kind`, if any
    pub fn disarm(&mut self, kind: TimerKind) {
        if let Some(token) = self.armed.remove(&kind) {
            self.cancel(token);
        }
    }

    /// Cancel a timer by token. Unknown or already fired tokens are ignored.
    pub fn cancel(&mut self, token: TimerToken) {
        self.items.retain(|item| item.token != token);
        self.armed.retain(|_, armed| *armed != token);
    }

    /// Timers due at or before `now`, earliest first
    pub fn poll(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut ready = Vec::new();

        while let Some(item) = self.items.peek() {
            if item.fire_at > now {
                break;
            }
            let Some(item) = self.items.pop() else {
                break;
            };
            self.armed.remove(&item.kind);
            ready.push(item.kind);
        }

        ready
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.armed.contains_key(&kind)
    }

    /// Check if any timer is pending
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the next fire time, if any
    pub fn next_fire_time(&self) -> Option<Instant> {
        self.items.peek().map(|item| item.fire_at)
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
