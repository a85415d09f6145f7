//! Configuration management for the table guide client.
//!
//! Parses `tableguide.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Every setting has a
//! default, so a missing file is not an error.
//!
//! Values are layered, later sources winning:
//! 1. Defaults
//! 2. The config file
//! 3. The `TABLE_GUIDE_API_URL` environment variable (API base URL only)
//! 4. [`CliSettings`]
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `api.base_url`
//! - `analytics.api_key`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tableguide.toml";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "TABLE_GUIDE_API_URL";

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override API base URL.
    pub base_url: Option<String>,
    /// Override analytics enabled flag.
    pub analytics_enabled: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API configuration.
    pub api: ApiConfig,
    /// Feature flags.
    pub features: FeaturesConfig,
    /// Analytics configuration.
    pub analytics: AnalyticsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Backend API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the guide backend.
    pub base_url: String,
    /// Request timeout in seconds. Zero leaves the transport default in place.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: 0,
        }
    }
}

impl ApiConfig {
    /// Request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Feature flags.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Whether guide generation is available.
    pub table_guide: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self { table_guide: true }
    }
}

/// Analytics configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Whether analytics events are emitted.
    pub enabled: bool,
    /// Key of the analytics project, if the sink needs one.
    pub api_key: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`api.base_url`").
        field: String,
        /// Error message (e.g., "${`GUIDE_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tableguide.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        config.apply_env_override(std::env::var(API_URL_ENV).ok());
        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Apply the API URL environment override, ignoring empty values.
    fn apply_env_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.api.base_url = url;
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.api.base_url.clone_from(base_url);
        }
        if let Some(enabled) = settings.analytics_enabled {
            self.analytics.enabled = enabled;
        }
    }

    /// Trim whitespace and trailing slashes from the base URL.
    fn normalize(&mut self) {
        let trimmed = self.api.base_url.trim().trim_end_matches('/');
        self.api.base_url = trimmed.to_owned();
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.api.base_url, "api.base_url")?;
        require_http_url(&self.api.base_url, "api.base_url")?;
        if let Some(key) = &self.analytics.api_key {
            require_non_empty(key, "analytics.api_key")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.api.base_url = expand::expand_env(&self.api.base_url, "api.base_url")?;
        if let Some(ref key) = self.analytics.api_key {
            self.analytics.api_key = Some(expand::expand_env(key, "analytics.api_key")?);
        }
        Ok(())
    }
}

/// Search for a config file in `start` and its parents.
fn discover_config_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
