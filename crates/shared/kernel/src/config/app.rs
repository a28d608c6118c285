use super::{ConfigError, load_config};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level settings for `PinVault` binaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads the file at `path` (or the default file, if present) plus `PINVAULT__` overrides.
    ///
    /// # Errors
    /// See [`load_config`].
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        load_config(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory holding one subdirectory per account.
    pub data_dir: PathBuf,
    pub account: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from(".pinvault"), account: "default".to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub console: bool,
    /// Directory for rolling log files; no file output when unset.
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_owned(), console: true, dir: None, json: false, max_files: 7 }
    }
}
