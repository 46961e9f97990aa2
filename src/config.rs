//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig;
use crate::chart::ChartLabels;
use crate::dashboard::LayoutConfig;
use crate::dataset::ColumnMapping;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the launch dataset lives and how its columns are named
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub columns: ColumnMapping,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/spacex_launch_dash.csv")
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            columns: ColumnMapping::default(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_max_sessions() -> usize {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl ServerConfig {
    /// Runtime settings for the API server
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.host.clone(),
            port: self.port,
            max_sessions: self.max_sessions,
        }
    }
}

/// Widget and chart text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub labels: ChartLabels,
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
    "launchdash=info,tower_http=info".to_string()
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

impl LoggingConfig {
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

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that deserialise but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dashboard
            .layout
            .validate()
            .map_err(ConfigError::Invalid)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// The first config file that exists wins. A file that exists but does
    /// not load is an error rather than a silent fallback to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("launchdash").join("config.toml")),
            Some(PathBuf::from("/etc/launchdash/config.toml")),
            Some(PathBuf::from("./launchdash.toml")),
        ];

        Self::load_first(config_paths.iter().flatten())
    }

    fn load_first<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) -> Result<Self, ConfigError> {
        for path in paths {
            if path.exists() {
                let config = Self::load_with_env(path)?;
                tracing::info!("Loaded config from {:?}", path);
                return Ok(config);
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(path) = var("LAUNCHDASH_DATASET") {
            self.dataset.path = PathBuf::from(path);
        }

        if let Some(host) = var("LAUNCHDASH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("LAUNCHDASH_PORT") {
            self.server.port = parse_env("LAUNCHDASH_PORT", &port)?;
        }
        if let Some(max) = var("LAUNCHDASH_MAX_SESSIONS") {
            self.server.max_sessions = parse_env("LAUNCHDASH_MAX_SESSIONS", &max)?;
        }

        if let Some(level) = var("LAUNCHDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("LAUNCHDASH_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid value for {name}: {value:?}")]
    Env { name: String, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Launchdash Configuration
#
# Environment variables override these settings:
# - LAUNCHDASH_DATASET
# - LAUNCHDASH_HOST
# - LAUNCHDASH_PORT
# - LAUNCHDASH_MAX_SESSIONS
# - LAUNCHDASH_LOG_LEVEL
# - LAUNCHDASH_LOG_FORMAT

[dataset]
# CSV file with one row per launch, loaded once at startup
path = "data/spacex_launch_dash.csv"

[dataset.columns]
launch_site = "Launch Site"
payload_mass = "Payload Mass (kg)"
outcome = "class"
booster_category = "Booster Version Category"
flight_number = "Flight Number"
booster_version = "Booster Version"

[server]
host = "127.0.0.1"
port = 8050

# Maximum concurrent dashboard sessions
max_sessions = 1000

[dashboard.layout]
title = "SpaceX Launch Records Dashboard"
all_sites_label = "All Sites"
placeholder = "Select a Launch Site here"
slider_min = 0.0
slider_max = 10000.0
slider_step = 1000.0
mark_interval = 2000.0

[dashboard.labels]
all_sites_pie_title = "Successful Missions per Site"
site_pie_title = "Portion of Successful Missions"
scatter_title = "Mission success with respect to payload"
payload_axis = "Payload Mass (kg)"
outcome_axis = "class"
color_legend = "Booster Version Category"

[logging]
# Filter directives, overridden by RUST_LOG
level = "launchdash=info,tower_http=info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
