//! Configuration validation.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.model.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "model.path must not be empty".into(),
            ));
        }
        if self.catalog.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "catalog.path must not be empty".into(),
            ));
        }
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "logging.level must be one of trace/debug/info/warn/error, got {other:?}"
                )));
            }
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "logging.format must be \"pretty\" or \"json\", got {other:?}"
                )));
            }
        }
        Ok(())
    }
}
