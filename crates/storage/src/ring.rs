// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-capacity ring of log slots over a key-value store
//!
//! Slots are numbered `1..=capacity` and addressed through two persisted
//! indices:
//!
//! ```text
//!   capacity = 5, start = 4, end = 2
//!
//!   slot:   1    2    3    4    5
//!         [ D ][ E ][   ][ A ][ B ]...
//!                ^end      ^start
//!
//!   read order: 4, 5, 1, 2
//! ```
//!
//! `end == 0` means the store has never been written (or was emptied).
//!
//! Slot data is written before the indices. A crash between the two can
//! drop the newest slots of a batch or, once the ring has wrapped, leave an
//! overwritten slot in place of an older one. The store does not try to
//! repair either case.

use crate::kv::{KvError, KvStore};
use ringlog_core::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RingError {
    #[error("storage error: {0}")]
    Kv(#[from] KvError),
    #[error("slot {slot} is not occupied (start {start}, end {end})")]
    SlotNotOccupied { slot: usize, start: usize, end: usize },
}

pub struct RingStore<K> {
    kv: K,
    capacity: usize,
    key_prefix: String,
    start_key: String,
    end_key: String,
    max_entry_size: Option<usize>,
    start: usize,
    end: usize,
}

impl<K: KvStore> RingStore<K> {
    /// Open the ring described by `config`, recovering persisted indices
    pub fn open(kv: K, config: &Config) -> Result<Self, RingError> {
        let mut store = Self {
            kv,
            capacity: config.capacity.max(1),
            key_prefix: config.storage_key_prefix.clone(),
            start_key: config.start_index_key.clone(),
            end_key: config.end_index_key.clone(),
            max_entry_size: config.max_entry_size_bytes.filter(|m| *m > 0),
            start: 1,
            end: 0,
        };
        let start = store.read_index(&store.start_key)?;
        let end = store.read_index(&store.end_key)?;
        let (start, end) = store.recover_indices(start.as_deref(), end.as_deref());
        store.start = start;
        store.end = end;
        store.persist_indices()?;
        tracing::debug!(start, end, count = store.count(), "ring store opened");
        Ok(store)
    }

    /// An index value that cannot be decoded reads as empty text, which
    /// [`Self::recover_indices`] treats as corrupt
    fn read_index(&self, key: &str) -> Result<Option<String>, RingError> {
        match self.kv.get(key) {
            Ok(value) => Ok(value),
            Err(KvError::Corrupt { reason, .. }) => {
                tracing::warn!(key, reason = %reason, "unreadable ring index");
                Ok(Some(String::new()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn recover_indices(&self, start: Option<&str>, end: Option<&str>) -> (usize, usize) {
        let (Some(start_text), Some(end_text)) = (start, end) else {
            return (1, 0);
        };
        let start = start_text.trim().parse::<usize>().ok();
        let end = end_text.trim().parse::<usize>().ok();
        match (start, end) {
            (Some(_), Some(0)) => (1, 0),
            (Some(s), Some(e)) if (1..=self.capacity).contains(&s) && e <= self.capacity => (s, e),
            _ => {
                tracing::warn!(
                    start = start_text,
                    end = end_text,
                    capacity = self.capacity,
                    "corrupt ring indices, resetting to empty"
                );
                (1, 0)
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current `(start, end)` indices
    pub fn indices(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Number of occupied slots, including empty reserved ones
    pub fn count(&self) -> usize {
        if self.end == 0 {
            0
        } else if self.end >= self.start {
            self.end - self.start + 1
        } else {
            self.capacity - self.start + 1 + self.end
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Slots an entry of this text occupies
    pub fn slots_for(&self, text: &str) -> usize {
        match self.max_entry_size {
            Some(max) => text.len().div_ceil(max).clamp(1, self.capacity),
            None => 1,
        }
    }

    /// Append texts in order; empty texts consume a slot without storing
    /// anything. Indices are durable when this returns `Ok`.
    pub fn append(&mut self, texts: &[String]) -> Result<(), RingError> {
        if texts.is_empty() {
            return Ok(());
        }
        let mut slots: Vec<&str> = Vec::with_capacity(texts.len());
        for text in texts {
            let reserved = self.slots_for(text);
            slots.extend(std::iter::repeat("").take(reserved - 1));
            slots.push(text);
        }
        // Anything before the last `capacity` slots would be overwritten by this same batch
        let skip = slots.len().saturating_sub(self.capacity);

        let saved = (self.start, self.end);
        let result = self.write_slots(&slots[skip..]);
        if let Err(e) = result {
            (self.start, self.end) = saved;
            tracing::error!(error = %e, slots = slots.len(), "ring append failed");
            return Err(e);
        }
        tracing::debug!(
            slots = slots.len(),
            start = self.start,
            end = self.end,
            "ring append"
        );
        Ok(())
    }

    fn write_slots(&mut self, slots: &[&str]) -> Result<(), RingError> {
        for text in slots {
            self.advance();
            let key = self.slot_key(self.end);
            if text.is_empty() {
                self.kv.remove(&key)?;
            } else {
                self.kv.set(&key, text)?;
            }
        }
        self.persist_indices()
    }

    fn advance(&mut self) {
        let count = self.count();
        self.end = self.next(self.end);
        if count == 0 {
            self.start = self.end;
        } else if count == self.capacity {
            self.start = self.next(self.start);
        }
    }

    fn next(&self, slot: usize) -> usize {
        if slot >= self.capacity {
            1
        } else {
            slot + 1
        }
    }

    /// Stored texts, oldest first
    pub fn read_all(&self) -> Result<Vec<String>, RingError> {
        Ok(self.read_slots()?.into_iter().map(|(_, text)| text).collect())
    }

    /// Stored texts with their slot numbers, oldest first. Empty and
    /// undecodable slots are skipped.
    pub fn read_slots(&self) -> Result<Vec<(usize, String)>, RingError> {
        let count = self.count();
        let mut out = Vec::with_capacity(count);
        let mut slot = self.start;
        for _ in 0..count {
            match self.kv.get(&self.slot_key(slot)) {
                Ok(Some(text)) if !text.is_empty() => out.push((slot, text)),
                Ok(_) => {}
                Err(KvError::Corrupt { reason, .. }) => {
                    tracing::warn!(slot, reason = %reason, "skipping unreadable slot");
                }
                Err(e) => return Err(e.into()),
            }
            slot = self.next(slot);
        }
        Ok(out)
    }

    /// Drop every slot from the oldest up to and including `slot`.
    /// Returns the number of slots released.
    pub fn evict_through(&mut self, slot: usize) -> Result<usize, RingError> {
        let count = self.count();
        let offset = (slot + self.capacity - self.start) % self.capacity;
        if count == 0 || slot == 0 || slot > self.capacity || offset >= count {
            return Err(RingError::SlotNotOccupied {
                slot,
                start: self.start,
                end: self.end,
            });
        }
        let mut current = self.start;
        for _ in 0..=offset {
            self.kv.remove(&self.slot_key(current))?;
            current = self.next(current);
        }
        if offset + 1 == count {
            (self.start, self.end) = (1, 0);
        } else {
            self.start = current;
        }
        self.persist_indices()?;
        tracing::debug!(released = offset + 1, remaining = self.count(), "ring evicted");
        Ok(offset + 1)
    }

    /// Remove every stored slot and return to the empty state
    pub fn clear(&mut self) -> Result<(), RingError> {
        let mut slot = self.start;
        for _ in 0..self.count() {
            self.kv.remove(&self.slot_key(slot))?;
            slot = self.next(slot);
        }
        (self.start, self.end) = (1, 0);
        self.persist_indices()
    }

    fn slot_key(&self, slot: usize) -> String {
        format!("{}{}", self.key_prefix, slot)
    }

    fn persist_indices(&self) -> Result<(), RingError> {
        self.kv.set(&self.start_key, &self.start.to_string())?;
        self.kv.set(&self.end_key, &self.end.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "ring_tests.rs"]
mod tests;
