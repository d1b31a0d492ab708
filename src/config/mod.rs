use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::*;

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/taikai-chat/config.toml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Chatbot backend URL receiving the POST
    pub endpoint: String,
    /// Value sent as `user_id` in every request
    pub user_id: String,
    /// Request timeout in seconds (0 = no timeout)
    pub request_timeout_secs: u64,
    /// Theme name (built-in or custom)
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            theme: "default".to_string(),
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional — missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    endpoint: Option<String>,
    user_id: Option<String>,
    request_timeout_secs: Option<u64>,
    theme: Option<String>,
}

impl Config {
    /// Load config from ~/.config/taikai-chat/config.toml, falling back to
    /// defaults for any missing fields. If the file doesn't exist, returns
    /// pure defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Config::default(), // No config file — use defaults
        };

        match Self::from_toml_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                Config::default()
            }
        }
    }

    /// Parse TOML text and merge it over the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file_config: FileConfig = toml::from_str(content)?;
        let mut config = Config::default();

        if let Some(v) = file_config.endpoint {
            if !v.trim().is_empty() {
                config.endpoint = v.trim().to_string();
            }
        }
        if let Some(v) = file_config.user_id {
            if !v.is_empty() {
                config.user_id = v;
            }
        }
        if let Some(v) = file_config.request_timeout_secs {
            config.request_timeout_secs = v; // 0 = no timeout
        }
        if let Some(v) = file_config.theme {
            if !v.is_empty() {
                config.theme = v;
            }
        }

        Ok(config)
    }

    /// The request timeout, if one was configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}
