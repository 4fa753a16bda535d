// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger factory for CLI commands

use crate::error::CliError;
use anyhow::{Context, Result};
use ringlog_core::{Config, SystemClock};
use ringlog_engine::Logger;
use ringlog_storage::FileKv;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the store directory
const CONFIG_FILE: &str = "config.toml";

pub type CliLogger = Logger<FileKv, SystemClock>;

/// Store directory: `--dir`, or `ringlog` under the local data directory
pub fn store_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => Ok(dirs::data_local_dir()
            .ok_or_else(CliError::no_data_dir)?
            .join("ringlog")),
    }
}

/// Config from `--config`, else `config.toml` in the store directory, else defaults
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = dir.join(CONFIG_FILE);
            if !path.exists() {
                return Ok(Config::default());
            }
            path
        }
    };
    let config = Config::load(&path).map_err(|e| CliError::invalid_config(&path, e))?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Create a logger over the file store in `dir`
pub fn make_logger(dir: &Path, config: Config) -> Result<CliLogger> {
    let kv = FileKv::open(dir).with_context(|| format!("opening store at {}", dir.display()))?;
    Logger::new(kv, config, SystemClock).context("reading store indices")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_file_in_store_dir_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "capacity = 7\n").unwrap();
        assert_eq!(load_config(None, dir.path()).unwrap().capacity, 7);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "capacity = 0\n").unwrap();
        let err = load_config(Some(&path), dir.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn explicit_dir_wins() {
        let dir = store_dir(Some(PathBuf::from("/tmp/x"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/x"));
    }
}
