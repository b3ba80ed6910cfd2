//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default backend base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub fortune: FortuneConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fortune teller backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means no client-side timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

fn default_session_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("zodiac").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./zodiac_session.json".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_file: default_session_file(),
        }
    }
}

impl StorageConfig {
    /// Session file path with a leading `~/` expanded
    pub fn session_path(&self) -> PathBuf {
        expand_home(&self.session_file)
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Fortune table configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FortuneConfig {
    /// Alternative zodiac table; the embedded table is used when unset
    pub table_path: Option<String>,
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

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let (config, report) = Self::discover();
        report.log();
        config
    }

    /// Like [`Config::load_default`], but hands back what happened instead
    /// of logging it, for callers that set up logging from the result
    pub fn discover() -> (Self, LoadReport) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("zodiac").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::discover_in(&config_paths, |key| std::env::var(key).ok())
    }

    fn discover_in(paths: &[PathBuf], var: impl Fn(&str) -> Option<String>) -> (Self, LoadReport) {
        let mut report = LoadReport::default();

        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::load(path) {
                Ok(mut config) => {
                    config.apply_overrides(&var);
                    report.source = Some(path.clone());
                    return (config, report);
                }
                Err(e) => report.skipped.push(e),
            }
        }

        let mut config = Config::default();
        config.apply_overrides(&var);
        (config, report)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("ZODIAC_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("ZODIAC_REQUEST_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = Some(secs);
            }
        }

        // Storage overrides
        if let Some(path) = var("ZODIAC_SESSION_FILE") {
            self.storage.session_file = path;
        }

        // Fortune overrides
        if let Some(path) = var("ZODIAC_TABLE_PATH") {
            self.fortune.table_path = Some(path);
        }

        // Logging overrides
        if let Some(level) = var("ZODIAC_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ZODIAC_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of searching the default config locations
#[derive(Debug, Default)]
pub struct LoadReport {
    /// File the config came from; `None` means defaults plus environment
    pub source: Option<PathBuf>,
    /// Files that exist but failed to load
    pub skipped: Vec<ConfigError>,
}

impl LoadReport {
    pub fn log(&self) {
        for error in &self.skipped {
            tracing::warn!("Skipped config: {}", error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::debug!("Using default config with environment overrides"),
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
    r#"# Zodiac Oracle Configuration
#
# Environment variables override these settings:
# - ZODIAC_API_URL
# - ZODIAC_REQUEST_TIMEOUT
# - ZODIAC_SESSION_FILE
# - ZODIAC_TABLE_PATH
# - ZODIAC_LOG_LEVEL
# - ZODIAC_LOG_FORMAT

[api]
# Fortune teller backend
base_url = "http://localhost:3000/api"

# Request timeout in seconds (unset = wait indefinitely)
# request_timeout_secs = 30

[storage]
# Where the auth token and user profile are kept
session_file = "~/.local/share/zodiac/session.json"

[fortune]
# Optional replacement for the built-in zodiac table (same TOML schema)
# table_path = "/etc/zodiac/zodiac.toml"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
