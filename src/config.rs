//! Configuration system
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::clock::{DisplayFormat, Locale};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub clock: ClockConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Clock driver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    /// Tick period in milliseconds (nominally 1000)
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Seconds a fired alarm stays up before auto-expiry
    #[serde(default = "default_alarm_expiry")]
    pub alarm_expiry_secs: u64,

    /// Locale for date lines and greetings ("es" or "en")
    #[serde(default)]
    pub locale: Locale,

    /// Display format at startup ("24h" or "12h")
    #[serde(default = "default_format")]
    pub format: DisplayFormat,
}

fn default_tick_interval() -> u64 {
    1000
}

fn default_alarm_expiry() -> u64 {
    60
}

fn default_format() -> DisplayFormat {
    DisplayFormat::H24
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            alarm_expiry_secs: default_alarm_expiry(),
            locale: Locale::default(),
            format: default_format(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
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
    "info".to_string()
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

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("sundial").join("config.toml")),
            Some(PathBuf::from("/etc/sundial/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("SUNDIAL_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("SUNDIAL_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(locale) = std::env::var("SUNDIAL_LOCALE") {
            match locale.as_str() {
                "es" => self.clock.locale = Locale::Spanish,
                "en" => self.clock.locale = Locale::English,
                other => tracing::warn!("Unknown SUNDIAL_LOCALE {:?}, keeping config value", other),
            }
        }

        if let Ok(level) = std::env::var("SUNDIAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SUNDIAL_LOG_FORMAT") {
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
    r#"# Sundial Configuration
#
# Environment variables override these settings:
# - SUNDIAL_API_HOST
# - SUNDIAL_API_PORT
# - SUNDIAL_LOCALE
# - SUNDIAL_LOG_LEVEL
# - SUNDIAL_LOG_FORMAT

[clock]
# Tick period in milliseconds
tick_interval_ms = 1000

# How long a fired alarm stays up before auto-expiry (seconds)
alarm_expiry_secs = 60

# Locale for dates and greetings: "es" or "en"
locale = "es"

# Display format at startup: "24h" or "12h"
format = "24h"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
