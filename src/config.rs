//! Stride configuration.
//!
//! Loaded from `~/.stride/config.toml`. Every field is optional and a
//! missing file means defaults, so a fresh install works with no setup.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::storage::SqliteStore;

/// Stride configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Directory holding the history database.
    /// Defaults to `~/.stride`.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from `~/.stride/config.toml`.
    /// Returns defaults when the file is missing.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.stride/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".stride").join("config.toml"))
    }

    /// Resolved history database path, honoring `data-dir`.
    pub fn history_db_path(&self) -> Option<PathBuf> {
        match &self.data_dir {
            Some(dir) => Some(dir.join("history.sqlite")),
            None => SqliteStore::default_path(),
        }
    }
}
