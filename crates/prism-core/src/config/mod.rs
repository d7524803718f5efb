//! Configuration management for Prism.
//!
//! Configuration is loaded from a TOML file with sensible defaults; every
//! value can also be overridden by the CLI. The file location itself can
//! be overridden with the `PRISM_CONFIG` environment variable, which is
//! how deployments point one binary at several model/catalog pairs.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an alternate config file location.
pub const CONFIG_ENV_VAR: &str = "PRISM_CONFIG";

/// Root configuration structure for Prism.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classification model settings
    pub model: ModelConfig,

    /// Label catalog settings
    pub catalog: CatalogConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// A missing file is not an error — it means defaults; any other read
    /// or parse failure is reported.
    pub fn load() -> Result<Self, ConfigError> {
        match std::fs::read_to_string(Self::default_path()) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::ReadError(e)),
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the config file path: `PRISM_CONFIG` if set, otherwise the
    /// platform config directory, otherwise `~/.prism/config.toml`.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }
        directories::ProjectDirs::from("dev", "prism", "prism")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".prism").join("config.toml")
            })
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ValidationError(format!("Config not serializable: {e}")))
    }

    /// The artifact files this configuration points at, by role.
    /// Both must exist before the classifier can start serving.
    pub fn artifacts(&self) -> [(&'static str, &Path); 2] {
        [
            ("model", self.model.path.as_path()),
            ("catalog", self.catalog.path.as_path()),
        ]
    }
}
