//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default tournament file name.
pub const DEFAULT_TOURNAMENT_FILE: &str = "mktm-tournament.json";

/// Environment variable overriding the tournament file.
pub const TOURNAMENT_FILE_ENV: &str = "MKTM_FILE";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tournament file to read from / write to
    #[serde(default = "default_file")]
    pub file: PathBuf,

    /// Round count used by `new` when none is given
    #[serde(default = "default_rounds")]
    pub default_rounds: u32,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_file() -> PathBuf {
    PathBuf::from(DEFAULT_TOURNAMENT_FILE)
}

fn default_rounds() -> u32 {
    3
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            file: default_file(),
            default_rounds: default_rounds(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "default_rounds must be greater than 0".to_string(),
            ));
        }

        if self.file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "file must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
