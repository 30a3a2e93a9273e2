//! Configuration management for Snooze
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, SnoozeError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Snooze
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Hack or Snooze API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Where the login session is persisted
    #[serde(default)]
    pub session: SessionConfig,
    /// Rendering and interaction settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Hack or Snooze API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://hack-or-snooze-v3.herokuapp.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("snooze/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Session persistence backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionBackend {
    /// JSON key-value file in the user's data directory
    #[default]
    File,
    /// OS keyring
    Keyring,
    /// Process memory only; forgotten on exit
    Memory,
}

impl std::str::FromStr for SessionBackend {
    type Err = SnoozeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(SessionBackend::File),
            "keyring" => Ok(SessionBackend::Keyring),
            "memory" => Ok(SessionBackend::Memory),
            other => Err(SnoozeError::Config(format!(
                "Invalid session backend: {}. Must be one of: file, keyring, memory",
                other
            ))),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Which backend stores the token and username
    #[serde(default)]
    pub backend: SessionBackend,

    /// Session file location (file backend only)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl SessionConfig {
    /// Resolved session file path for the file backend
    ///
    /// Falls back to `session.json` in the platform data directory.
    pub fn file_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let dirs = project_dirs()?;
        Ok(dirs.data_dir().join("session.json"))
    }
}

/// How a favorite toggle is reflected before the API confirms it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteUpdate {
    /// Update favorites only after the API call succeeds
    #[default]
    Pessimistic,
    /// Update favorites immediately and revert if the API call fails
    Optimistic,
}

impl std::str::FromStr for FavoriteUpdate {
    type Err = SnoozeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pessimistic" => Ok(FavoriteUpdate::Pessimistic),
            "optimistic" => Ok(FavoriteUpdate::Optimistic),
            other => Err(SnoozeError::Config(format!(
                "Invalid favorite update mode: {}. Must be one of: pessimistic, optimistic",
                other
            ))),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Favorite toggle strategy
    #[serde(default)]
    pub favorite_update: FavoriteUpdate,

    /// Colorize terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            favorite_update: FavoriteUpdate::default(),
            color: default_color(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "snooze", "snooze")
        .ok_or_else(|| SnoozeError::Config("Could not determine data directory".into()).into())
}

/// Default configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "snooze", "snooze").map(|d| d.config_dir().join("config.yaml"))
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error: defaults are used and the fallback is
    /// logged at debug level. A file that exists but cannot be parsed is
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SnoozeError::Config(format!("Failed to read config file: {}", e)))?;
        let config: Config = serde_yaml::from_str(&contents).map_err(SnoozeError::Yaml)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base) = std::env::var("SNOOZE_API_BASE") {
            self.api.base_url = base;
        }

        if let Ok(timeout) = std::env::var("SNOOZE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid SNOOZE_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(backend) = std::env::var("SNOOZE_SESSION_BACKEND") {
            match backend.parse() {
                Ok(v) => self.session.backend = v,
                Err(e) => tracing::warn!("{}", e),
            }
        }

        if let Ok(file) = std::env::var("SNOOZE_SESSION_FILE") {
            self.session.path = Some(PathBuf::from(file));
        }

        if let Ok(mode) = std::env::var("SNOOZE_FAVORITE_UPDATE") {
            match mode.parse() {
                Ok(v) => self.ui.favorite_update = v,
                Err(e) => tracing::warn!("{}", e),
            }
        }

        if std::env::var_os("SNOOZE_NO_COLOR").is_some() {
            self.ui.color = false;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base) = &cli.api_base {
            tracing::debug!(base = %base, "CLI override: api base");
            self.api.base_url = base.clone();
        }
        if let Some(file) = &cli.session_file {
            self.session.path = Some(file.clone());
        }
        if cli.no_color {
            self.ui.color = false;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            SnoozeError::Config(format!("Invalid API base URL {}: {}", self.api.base_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SnoozeError::Config(format!(
                "API base URL must use http or https, got {}",
                url.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(
                SnoozeError::Config("timeout_seconds must be greater than 0".to_string()).into(),
            );
        }

        if self.api.timeout_seconds > 600 {
            return Err(SnoozeError::Config(
                "timeout_seconds must be less than or equal to 600".to_string(),
            )
            .into());
        }

        if self.session.path.is_some() && self.session.backend != SessionBackend::File {
            tracing::warn!(
                "session.path is ignored for the {:?} backend",
                self.session.backend
            );
        }

        Ok(())
    }
}
