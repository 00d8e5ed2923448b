//! Configuration loading and management
//!
//! Handles parsing of the `taskday.toml` file kept in the data root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lock::DEFAULT_LOCK_TIMEOUT_MS;

/// File name of the configuration inside the data root
pub const CONFIG_FILE: &str = "taskday.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Defaults applied to new tasks
    #[serde(default)]
    pub tasks: TasksConfig,
}

/// Store-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// How long to wait for a day or counter lock
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

/// Task defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Length of a new task when only a start time is given
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
}

fn default_duration_minutes() -> u32 {
    60
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration_minutes(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `taskday.toml` from the data root, or return defaults when absent
    pub fn load_from_root(root: &Path) -> Result<Self> {
        let path = Self::path_in(root);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn path_in(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.store.lock_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "store.lock_timeout_ms must be > 0".to_string(),
            ));
        }
        if self.tasks.default_duration_minutes == 0 {
            return Err(Error::InvalidConfig(
                "tasks.default_duration_minutes must be > 0".to_string(),
            ));
        }
        if self.tasks.default_duration_minutes >= 24 * 60 {
            return Err(Error::InvalidConfig(
                "tasks.default_duration_minutes must be under one day".to_string(),
            ));
        }
        Ok(())
    }
}
