//! Configuration module
//!
//! Settings are read from a TOML file, by default
//! `~/.config/posts-crud/config.toml`. Every section is optional:
//!
//! ```toml
//! [remote]
//! base_url = "https://jsonplaceholder.typicode.com"
//! timeout_secs = 30
//!
//! [pagination]
//! page_size = 10
//!
//! [logging]
//! level = "info"
//! format = "pretty" # or "json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::validations::{validate_page_size, DEFAULT_PAGE_SIZE};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub remote: RemoteConfig,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

/// Where the posts resource lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL, `/posts` is appended
    pub base_url: String,
    /// Per-request timeout in seconds, 0 disables it
    pub timeout_secs: u64,
    /// Sent as `userId` with new posts when set
    pub user_id: Option<i64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, overridden by `RUST_LOG`
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl RemoteConfig {
    /// Request timeout, `None` when `timeout_secs` is 0
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Page size after clamping into the accepted range
    pub fn page_size(&self) -> usize {
        validate_page_size(Some(self.pagination.page_size))
    }
}

/// `~/.config/posts-crud/config.toml`, or `./config.toml` when there is no config dir
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("posts-crud"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}
