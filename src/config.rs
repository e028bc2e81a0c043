//! Configuration loading.
//!
//! Reads `<config_dir>/listing-desk/config.toml` when present, then applies
//! environment overrides. The backend base URL is normally supplied through
//! `LISTING_DESK_API_URL`.

use crate::api::normalize_base_url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_API_URL: &str = "LISTING_DESK_API_URL";
pub const ENV_TOKEN_STORE: &str = "LISTING_DESK_TOKEN_STORE";
pub const ENV_TIMEOUT_SECS: &str = "LISTING_DESK_TIMEOUT_SECS";

const APP_DIR: &str = "listing-desk";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Where the client-side key-value store lives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub token_store: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            token_store: data_dir.join(APP_DIR).join("storage.json"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// `~/.config/listing-desk/config.toml` or the platform equivalent.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join(APP_DIR).join("config.toml")
    }

    /// Load from the default file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path(), |key| std::env::var(key).ok())
    }

    /// Load from `path` (skipped when missing), then apply overrides looked
    /// up through `env`, then validate.
    pub fn load_from<F>(path: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            Config::default()
        };

        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(path) = non_empty(ENV_TOKEN_STORE) {
            self.storage.token_store = PathBuf::from(path);
        }
        if let Some(raw) = non_empty(ENV_TIMEOUT_SECS) {
            self.api.timeout_seconds =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::ValidationError {
                        message: format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw),
                    })?;
        }
        Ok(())
    }

    /// Checks:
    /// - The base URL parses as an http(s) URL
    /// - The timeout is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_base_url(&self.api.base_url).map_err(|e| ConfigError::ValidationError {
            message: e.to_string(),
        })?;

        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "api.timeout_seconds must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
