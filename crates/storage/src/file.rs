// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed key-value store, one file per key

use crate::kv::{KvError, KvStore};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Stores each key as a file under a base directory
#[derive(Debug, Clone)]
pub struct FileKv {
    base_path: PathBuf,
}

impl FileKv {
    /// Open a store at the given path, creating the directory if needed
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, KvError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Check if a key exists
    pub fn exists(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(file_name(key))
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let bytes = match fs::read(self.path_for(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| KvError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let path = self.path_for(key);
        // Write then rename so a reader never sees a half-written value
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Escape a key into a portable file name
fn file_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
            name.push(b as char);
        } else {
            name.push_str(&format!("%{b:02X}"));
        }
    }
    name.push_str(".val");
    name
}
