// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host key-value store interface
//!
//! The ring store persists through this narrow interface. No atomicity
//! across calls is assumed.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("quota exceeded writing {key}: {needed} bytes over a {limit} byte limit")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The stored value exists but cannot be decoded
    #[error("corrupt value at {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

/// A persistent string-to-string store
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;
    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;
    fn remove(&self, key: &str) -> Result<(), KvError>;
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        (**self).remove(key)
    }
}

#[derive(Default)]
struct MemoryState {
    values: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
    fail_writes: bool,
}

impl MemoryState {
    fn used_bytes(&self) -> usize {
        self.values.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

/// In-memory store with an optional byte quota, like a browser's local storage
#[derive(Clone, Default)]
pub struct MemoryKv {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total size of keys plus values
    pub fn with_quota(self, bytes: usize) -> Self {
        self.lock().quota_bytes = Some(bytes);
        self
    }

    /// Make every `set` and `remove` fail until turned off again
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Copy of all stored pairs
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock().values.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.lock().values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(KvError::Unavailable(format!("write to {key} refused")));
        }
        if let Some(limit) = state.quota_bytes {
            let current = state.values.get(key).map_or(0, |v| key.len() + v.len());
            let needed = state.used_bytes() - current + key.len() + value.len();
            if needed > limit {
                return Err(KvError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        state.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(KvError::Unavailable(format!("remove of {key} refused")));
        }
        state.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "kv_tests.rs"]
mod tests;
