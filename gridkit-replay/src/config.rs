//! Replay configuration.
//!
//! Read from `--config` or `<config dir>/config.json`. Every field is
//! optional; a missing default file means defaults.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

use crate::error::ReplayError;
use crate::paths;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Level for the log file; the terminal only ever shows warnings and errors.
    pub log_level: String,
    /// Write a log file under the cache directory.
    pub log_to_file: bool,
    /// Widest a printed column may get before it is truncated. `0` disables the cap.
    pub column_width: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
            column_width: 24,
        }
    }
}

impl ReplayConfig {
    /// Load the explicit config file, or the default one if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ReplayError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match paths::config_file() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ReplayError> {
        let text = fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ReplayError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Effective log level: the command-line value wins over the file.
    pub fn level(&self, cli_override: Option<&str>) -> Result<LevelFilter, ReplayError> {
        let raw = cli_override.unwrap_or(&self.log_level);
        LevelFilter::from_str(raw.trim()).map_err(|_| ReplayError::LogLevel(raw.to_string()))
    }
}
