//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::client::ClientConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_base_url() -> String {
    "https://localhost:7166/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            accept_invalid_certs: false,
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}

/// Where the login token is kept between runs
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

fn default_token_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("finadmin").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./.finadmin_session.json"))
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Locale for chart month labels (e.g. "en_US", "vi_VN")
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Offset from UTC used for account timestamps
    #[serde(default)]
    pub timezone_offset_minutes: i32,
}

fn default_locale() -> String {
    "en_US".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            timezone_offset_minutes: 0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

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

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
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

    /// Load from default locations or environment
    ///
    /// Logging is not initialised yet when this runs, so problems are
    /// returned as warnings for the caller to report.
    pub fn load_default() -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let config_paths = [
            dirs::config_dir().map(|p| p.join("finadmin").join("config.toml")),
            Some(PathBuf::from("./finadmin.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => return (config, warnings),
                    Err(e) => warnings.push(format!("Failed to load config from {:?}: {}", path, e)),
                }
            }
        }

        (Self::from_env(), warnings)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(url) = var("FINADMIN_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("FINADMIN_API_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_secs = t;
            }
        }

        // Session overrides
        if let Some(path) = var("FINADMIN_TOKEN_FILE") {
            self.session.token_file = PathBuf::from(path);
        }

        // Display overrides
        if let Some(locale) = var("FINADMIN_LOCALE") {
            self.display.locale = locale;
        }

        // Logging overrides
        if let Some(level) = var("FINADMIN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("FINADMIN_LOG_FORMAT") {
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
    r#"# Admin Finance console configuration
#
# Environment variables override these settings:
# - FINADMIN_API_URL
# - FINADMIN_API_TIMEOUT_SECS
# - FINADMIN_TOKEN_FILE
# - FINADMIN_LOCALE
# - FINADMIN_LOG_LEVEL
# - FINADMIN_LOG_FORMAT

[api]
# Backend API base URL
base_url = "https://localhost:7166/api"

# Request timeout in seconds
request_timeout_secs = 30

# Accept self-signed TLS certificates (local development only)
accept_invalid_certs = false

[session]
# File holding the login token
# token_file = "~/.local/share/finadmin/session.json"

[display]
# Locale for chart month labels
locale = "en_US"

# Offset from UTC for account timestamps, in minutes (e.g. 420 for UTC+7)
timezone_offset_minutes = 0

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
