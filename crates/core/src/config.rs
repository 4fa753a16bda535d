// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger configuration
//!
//! Every option has a default, so an empty TOML file is a valid config:
//!
//! ```toml
//! capacity = 2000
//! debounce_interval = "1s"
//! floor_interval = "0s"      # disables the floor timer
//! delivery = "fire-and-forget"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What submission does once the sender has been called
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    /// Call the sender and move on; the store is left as is
    FireAndForget,
    /// Wait for the sender and evict what it accepted
    #[default]
    Acknowledged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of slots in the ring store
    pub capacity: usize,
    /// Quiet period after the last capture before a flush
    #[serde(with = "humantime_serde")]
    pub debounce_interval: Duration,
    /// Longest time between flushes under constant activity; zero disables it
    #[serde(with = "humantime_serde")]
    pub floor_interval: Duration,
    /// Echo console calls without collecting them
    pub disable_capture: bool,
    /// Collect console calls without echoing them
    pub disable_echo: bool,
    /// Prefix of slot keys; slot `n` lives at `{prefix}{n}`
    pub storage_key_prefix: String,
    pub start_index_key: String,
    pub end_index_key: String,
    /// Entries larger than this reserve extra slots
    pub max_entry_size_bytes: Option<usize>,
    /// Payload text longer than this is truncated
    pub max_text_len: Option<usize>,
    pub delivery: DeliveryMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            debounce_interval: Duration::from_secs(2),
            floor_interval: Duration::from_secs(5),
            disable_capture: false,
            disable_echo: false,
            storage_key_prefix: "_v".to_string(),
            start_index_key: "_sk".to_string(),
            end_index_key: "_ek".to_string(),
            max_entry_size_bytes: Some(1024),
            max_text_len: None,
            delivery: DeliveryMode::Acknowledged,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Invalid("capacity must be at least 1".into()));
        }
        if self.max_entry_size_bytes == Some(0) {
            return Err(ConfigError::Invalid(
                "max_entry_size_bytes must be positive".into(),
            ));
        }
        if self.storage_key_prefix.is_empty() {
            return Err(ConfigError::Invalid("storage_key_prefix is empty".into()));
        }
        let keys = [&self.start_index_key, &self.end_index_key];
        if keys[0] == keys[1] {
            return Err(ConfigError::Invalid(
                "start and end index keys must differ".into(),
            ));
        }
        // A slot key must never collide with an index key
        for key in keys {
            if let Some(rest) = key.strip_prefix(self.storage_key_prefix.as_str()) {
                if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ConfigError::Invalid(format!(
                        "index key {key} collides with slot keys"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_debounce(mut self, interval: Duration) -> Self {
        self.debounce_interval = interval;
        self
    }

    pub fn with_floor(mut self, interval: Duration) -> Self {
        self.floor_interval = interval;
        self
    }

    pub fn with_delivery(mut self, delivery: DeliveryMode) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn with_max_entry_size(mut self, bytes: Option<usize>) -> Self {
        self.max_entry_size_bytes = bytes;
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_key_prefix = prefix.into();
        self
    }

    /// Key of the storage slot with the given 1-based index
    pub fn slot_key(&self, slot: usize) -> String {
        format!("{}{}", self.storage_key_prefix, slot)
    }

    /// Floor interval, or `None` when the floor timer is disabled
    pub fn floor(&self) -> Option<Duration> {
        (!self.floor_interval.is_zero()).then_some(self.floor_interval)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
