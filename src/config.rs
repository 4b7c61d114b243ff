//! Configuration management for Trailbook
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file with CLI overrides.

use crate::cli::Cli;
use crate::error::{Result, TrailbookError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Trailbook
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Diary storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Terminal output settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Diary storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the diary backing file
    ///
    /// The parent directory is created on demand at every save.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    "data/travel_diary.trd".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Terminal output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Whether to color prompts and error lines
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, applying CLI overrides
    ///
    /// A missing config file is not an error: defaults are used so the
    /// binary works out of the box. The `--data` CLI flag (and the
    /// `TRAILBOOK_DATA` environment variable behind it) overrides the
    /// configured storage path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed CLI arguments providing overrides
    pub fn load<P: AsRef<Path>>(path: P, cli: &Cli) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&contents).map_err(TrailbookError::Yaml)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        if let Some(data) = &cli.data {
            config.storage.path = data.to_string_lossy().to_string();
        }

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a Config error when the storage path is empty or points at
    /// a directory.
    pub fn validate(&self) -> Result<()> {
        if self.storage.path.trim().is_empty() {
            return Err(TrailbookError::Config(
                "storage.path must not be empty".to_string(),
            )
            .into());
        }
        if Path::new(&self.storage.path).is_dir() {
            return Err(TrailbookError::Config(format!(
                "storage.path '{}' is a directory, expected a file path",
                self.storage.path
            ))
            .into());
        }
        Ok(())
    }
}
