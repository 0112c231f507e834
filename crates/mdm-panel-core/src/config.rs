//! Client configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! explicit overrides supplied by the caller (environment or CLI flags).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Name of the config file inside the platform config directory.
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Base URL of the device API, e.g. `http://localhost:3001/api`
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Optional bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            token: None,
        }
    }
}

/// Values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub token: Option<String>,
}

impl ClientConfig {
    /// Read a config file. Missing keys fall back to defaults.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).await?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !fs::try_exists(&path).await.unwrap_or(false) {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config file");
        Self::load(&path).await
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(url) = overrides.base_url {
            self.base_url = url;
        }
        if let Some(timeout) = overrides.timeout_ms {
            self.timeout_ms = timeout;
        }
        if let Some(token) = overrides.token {
            self.token = Some(token);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "baseUrl".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeoutMs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Platform-specific config file location, e.g. `~/.config/mdm-panel/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "mdm-panel", "mdm-panel")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
