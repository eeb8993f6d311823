//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `HIFI_*` environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::data::{DEFAULT_SEED, HISTORY_DAYS, SAMPLE_ROWS};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request body limit for CSV and image uploads
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Bytes one session may hold across its dataset and gallery
    #[serde(default = "default_max_session_bytes")]
    pub max_session_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_max_upload_bytes() -> usize {
    200 * 1024 * 1024 // 200 MB
}

fn default_max_sessions() -> usize {
    1000
}

fn default_max_session_bytes() -> usize {
    100 * 1024 * 1024 // 100 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            max_sessions: default_max_sessions(),
            max_session_bytes: default_max_session_bytes(),
        }
    }
}

/// Dashboard content configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Seed of the synthetic traffic series
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_history_days")]
    pub history_days: usize,

    /// Rows in the downloadable sample CSV
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,

    /// Rows shown in the Data page preview
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    #[serde(default = "default_banner_url")]
    pub banner_url: String,
}

fn default_title() -> String {
    "Hi-Fi Dashboard".to_string()
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_history_days() -> usize {
    HISTORY_DAYS
}

fn default_sample_rows() -> usize {
    SAMPLE_ROWS
}

fn default_preview_rows() -> usize {
    100
}

fn default_banner_url() -> String {
    "https://images.unsplash.com/photo-1553877522-43269d4ea984?q=80&w=1200&auto=format&fit=crop"
        .to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            seed: default_seed(),
            history_days: default_history_days(),
            sample_rows: default_sample_rows(),
            preview_rows: default_preview_rows(),
            banner_url: default_banner_url(),
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

    pub file: Option<String>,
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
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Whether JSON log lines were requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
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

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Defaults plus environment variable overrides
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

    /// Load from default locations or environment.
    ///
    /// Nothing is logged here; the subscriber is configured from the
    /// result, so call [`ConfigLoad::log`] once it is installed.
    pub fn load_default() -> ConfigLoad {
        Self::load_first(&Self::search_paths())
    }

    /// Load the first existing file in `paths` that parses. Files that
    /// exist but fail to load are recorded and skipped.
    pub fn load_first(paths: &[PathBuf]) -> ConfigLoad {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return ConfigLoad {
                        config,
                        source: Some(path.clone()),
                        skipped,
                    };
                }
                Err(e) => skipped.push(e),
            }
        }

        ConfigLoad {
            config: Self::from_env(),
            source: None,
            skipped,
        }
    }

    /// Config file locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("hifi-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/hifi-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `HIFI_*` overrides read through `lookup`. Unparseable numbers
    /// are ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HIFI_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("HIFI_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(limit) = lookup("HIFI_MAX_UPLOAD_BYTES").and_then(|v| v.parse().ok()) {
            self.server.max_upload_bytes = limit;
        }
        if let Some(limit) = lookup("HIFI_MAX_SESSION_BYTES").and_then(|v| v.parse().ok()) {
            self.server.max_session_bytes = limit;
        }
        if let Some(seed) = lookup("HIFI_SEED").and_then(|v| v.parse().ok()) {
            self.dashboard.seed = seed;
        }
        if let Some(level) = lookup("HIFI_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("HIFI_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Result of searching the default locations
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    /// File the config came from, `None` for defaults
    pub source: Option<PathBuf>,
    /// Files found but not loaded
    pub skipped: Vec<ConfigError>,
}

impl ConfigLoad {
    /// Report where the config came from
    pub fn log(&self) {
        for error in &self.skipped {
            tracing::warn!("Skipped config file: {}", error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
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
    format!(
        r#"# Hi-Fi Dashboard Configuration
#
# Environment variables override these settings:
# - HIFI_HOST
# - HIFI_PORT
# - HIFI_MAX_UPLOAD_BYTES
# - HIFI_MAX_SESSION_BYTES
# - HIFI_SEED
# - HIFI_LOG_LEVEL
# - HIFI_LOG_FORMAT

[server]
# Address to listen on
host = "{host}"
port = {port}

# Largest accepted upload request (bytes)
max_upload_bytes = {max_upload_bytes}

# Live sessions kept in memory; the least recently seen is dropped first
max_sessions = {max_sessions}

# Bytes of uploads (CSV plus images) one session may hold
max_session_bytes = {max_session_bytes}

[dashboard]
title = "{title}"

# Seed for the synthetic traffic series
seed = {seed}

# Days of synthetic history
history_days = {history_days}

# Rows in the downloadable sample CSV
sample_rows = {sample_rows}

# Rows shown in the Data page preview
preview_rows = {preview_rows}

# Sidebar banner image
banner_url = "{banner_url}"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/hifi-dashboard/hifi.log"
"#,
        host = default_host(),
        port = default_port(),
        max_upload_bytes = default_max_upload_bytes(),
        max_sessions = default_max_sessions(),
        max_session_bytes = default_max_session_bytes(),
        title = default_title(),
        seed = default_seed(),
        history_days = default_history_days(),
        sample_rows = default_sample_rows(),
        preview_rows = default_preview_rows(),
        banner_url = default_banner_url(),
    )
}
