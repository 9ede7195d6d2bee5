//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ClientConfig;
use crate::view::TodoMessageTtl;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub status: StatusConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// School API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl BackendConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// How long status messages stay visible
#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    #[serde(default = "default_activity_message_ms")]
    pub activity_message_ms: u64,

    #[serde(default = "default_todo_message_ms")]
    pub todo_message_ms: u64,

    #[serde(default = "default_todo_delete_message_ms")]
    pub todo_delete_message_ms: u64,
}

fn default_activity_message_ms() -> u64 {
    5000
}

fn default_todo_message_ms() -> u64 {
    5000
}

fn default_todo_delete_message_ms() -> u64 {
    3000
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            activity_message_ms: default_activity_message_ms(),
            todo_message_ms: default_todo_message_ms(),
            todo_delete_message_ms: default_todo_delete_message_ms(),
        }
    }
}

impl StatusConfig {
    pub fn activity_ttl(&self) -> Duration {
        Duration::from_millis(self.activity_message_ms)
    }

    pub fn todo_ttl(&self) -> TodoMessageTtl {
        TodoMessageTtl {
            message: Duration::from_millis(self.todo_message_ms),
            delete_success: Duration::from_millis(self.todo_delete_message_ms),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from the first usable default location, or from the environment
    /// alone. Files that exist but fail to load are skipped and returned so
    /// the caller can report them once logging is up.
    pub fn load_default() -> (Self, Vec<ConfigError>) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("mergington").join("config.toml")),
            Some(PathBuf::from("./mergington.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first of `paths` that exists and parses
    pub fn load_first(paths: &[PathBuf]) -> (Self, Vec<ConfigError>) {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => return (config, skipped),
                Err(e) => skipped.push(e),
            }
        }

        (Self::from_env(), skipped)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MERGINGTON_BASE_URL") {
            self.backend.base_url = url;
        }
        if let Ok(timeout) = std::env::var("MERGINGTON_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.backend.request_timeout_ms = ms;
            }
        }

        if let Ok(level) = std::env::var("MERGINGTON_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MERGINGTON_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Mergington Client Configuration
#
# Environment variables override these settings:
# - MERGINGTON_BASE_URL
# - MERGINGTON_TIMEOUT_MS
# - MERGINGTON_LOG_LEVEL
# - MERGINGTON_LOG_FORMAT

[backend]
# School API root
base_url = "http://localhost:8000"

# Request timeout in milliseconds
request_timeout_ms = 10000

[status]
# How long activity signup/unregister messages stay visible (ms)
activity_message_ms = 5000

# How long todo messages stay visible (ms)
todo_message_ms = 5000

# How long the "Task deleted" confirmation stays visible (ms)
todo_delete_message_ms = 3000

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
