//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `REVIEW_DASHBOARD_*` environment variable
//! overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ClientConfig;
use crate::controller::DashboardSettings;
use crate::format::Locale;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Review backend the dashboard reads from
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Dashboard HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address to bind to
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Polling and rendering behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    #[serde(default = "default_true")]
    pub detail_enabled: bool,

    #[serde(default)]
    pub strict_refresh: bool,

    #[serde(default)]
    pub locale: Locale,

    #[serde(default)]
    pub trends_enabled: bool,

    #[serde(default = "default_trend_days")]
    pub trend_days: u32,

    #[serde(default)]
    pub repositories_enabled: bool,
}

fn default_poll_interval() -> u64 {
    30
}

fn default_recent_limit() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_trend_days() -> u32 {
    30
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            recent_limit: default_recent_limit(),
            detail_enabled: true,
            strict_refresh: false,
            locale: Locale::default(),
            trends_enabled: false,
            trend_days: default_trend_days(),
            repositories_enabled: false,
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

    /// Explicit path if given (errors are returned), otherwise the default
    /// locations
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("review-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/review-dashboard/config.toml")),
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

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `REVIEW_DASHBOARD_*` overrides from `lookup`.
    ///
    /// Values that fail to parse are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("REVIEW_DASHBOARD_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = lookup("REVIEW_DASHBOARD_API_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.api.request_timeout_secs = secs;
        }

        if let Some(host) = lookup("REVIEW_DASHBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("REVIEW_DASHBOARD_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }

        if let Some(secs) = lookup("REVIEW_DASHBOARD_POLL_INTERVAL").and_then(|v| v.parse().ok()) {
            self.dashboard.poll_interval_secs = secs;
        }
        if let Some(limit) = lookup("REVIEW_DASHBOARD_RECENT_LIMIT").and_then(|v| v.parse().ok()) {
            self.dashboard.recent_limit = limit;
        }
        if let Some(enabled) = lookup("REVIEW_DASHBOARD_DETAIL_ENABLED").and_then(|v| v.parse().ok()) {
            self.dashboard.detail_enabled = enabled;
        }
        if let Some(strict) = lookup("REVIEW_DASHBOARD_STRICT_REFRESH").and_then(|v| v.parse().ok()) {
            self.dashboard.strict_refresh = strict;
        }
        if let Some(locale) = lookup("REVIEW_DASHBOARD_LOCALE").and_then(|v| v.parse().ok()) {
            self.dashboard.locale = locale;
        }
        if let Some(enabled) = lookup("REVIEW_DASHBOARD_REPOSITORIES_ENABLED").and_then(|v| v.parse().ok()) {
            self.dashboard.repositories_enabled = enabled;
        }

        if let Some(level) = lookup("REVIEW_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("REVIEW_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            request_timeout: Duration::from_secs(self.api.request_timeout_secs),
        }
    }

    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            poll_interval: Duration::from_secs(self.dashboard.poll_interval_secs.max(1)),
            recent_limit: self.dashboard.recent_limit,
            detail_enabled: self.dashboard.detail_enabled,
            strict_refresh: self.dashboard.strict_refresh,
            locale: self.dashboard.locale,
            trends_enabled: self.dashboard.trends_enabled,
            trend_days: self.dashboard.trend_days,
            repositories_enabled: self.dashboard.repositories_enabled,
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
    r#"# Review Dashboard Configuration
#
# Environment variables override these settings:
# - REVIEW_DASHBOARD_API_URL
# - REVIEW_DASHBOARD_API_TIMEOUT
# - REVIEW_DASHBOARD_HOST
# - REVIEW_DASHBOARD_PORT
# - REVIEW_DASHBOARD_POLL_INTERVAL
# - REVIEW_DASHBOARD_RECENT_LIMIT
# - REVIEW_DASHBOARD_DETAIL_ENABLED
# - REVIEW_DASHBOARD_STRICT_REFRESH
# - REVIEW_DASHBOARD_LOCALE
# - REVIEW_DASHBOARD_REPOSITORIES_ENABLED
# - REVIEW_DASHBOARD_LOG_LEVEL
# - REVIEW_DASHBOARD_LOG_FORMAT

[api]
# Origin of the code-review assistant (serves /api/dashboard/*)
base_url = "http://localhost:8080"

# Request timeout in seconds
request_timeout_secs = 10

[server]
# Dashboard server host
host = "0.0.0.0"

# Dashboard server port
port = 8090

# Allowed CORS origins for /api/page (empty allows none)
cors_origins = []

[dashboard]
# Seconds between refreshes
poll_interval_secs = 30

# Number of recent reviews to list
recent_limit = 10

# Open the review detail modal when a row is selected
detail_enabled = true

# Skip a refresh while the previous one for the same endpoint is unresolved
strict_refresh = false

# Display language: ko or en
locale = "ko"

# Daily trend chart
trends_enabled = false
trend_days = 30

# Per-repository statistics table
repositories_enabled = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
