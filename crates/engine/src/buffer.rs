// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-local staging of serialized entries awaiting a flush

/// Ordered entries captured since the last successful flush
#[derive(Debug, Default)]
pub struct StagingBuffer {
    items: Vec<String>,
}

impl StagingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: String) {
        self.items.push(text);
    }

    /// Take everything staged, leaving the buffer empty
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.items)
    }

    /// Put back items whose merge failed, ahead of anything captured since
    pub fn restore_front(&mut self, mut items: Vec<String>) {
        items.append(&mut self.items);
        self.items = items;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
