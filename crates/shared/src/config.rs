//! Configuration management for the report tool.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings. Provider credentials can also be
//! supplied through the environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `tmdb.api_key`
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

/// Environment variable that overrides `tvdb.api_key`
pub const TVDB_API_KEY_ENV: &str = "TVDB_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input log settings
    #[serde(default)]
    pub input: InputConfig,

    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// TMDb settings (movies and collections)
    #[serde(default)]
    pub tmdb: TmdbConfig,

    /// TVDb settings (series)
    #[serde(default)]
    pub tvdb: TvdbConfig,
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path of the unmatched-assets log produced by the library manager
    pub log_file: String,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives the batch files
    pub dir: String,

    /// Maximum number of entries per batch file
    pub batch_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// TMDb configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// API key (v3 auth)
    pub api_key: String,

    /// API base URL
    pub base_url: String,

    /// Public site URL used to build canonical links
    pub site_url: String,
}

/// TVDb configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TvdbConfig {
    /// API key (v4)
    pub api_key: String,

    /// Subscriber PIN, only needed for user-supported keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,

    /// API base URL
    pub base_url: String,

    /// Public site URL used to build canonical links
    pub site_url: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            log_file: "unmatched_assets.log".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            batch_size: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "info".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            site_url: "https://www.themoviedb.org".to_string(),
        }
    }
}

impl Default for TvdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            pin: None,
            base_url: "https://api4.thetvdb.com/v4".to_string(),
            site_url: "https://www.thetvdb.com".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match Self::load(path)? {
            Some(config) => Ok(config),
            None => {
                tracing::warn!(
                    path = %path.display(),
                    "Config file not found, using defaults"
                );
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a TOML file, or `None` if it doesn't exist
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(Some(config))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Replace provider credentials with values from the environment, when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(TMDB_API_KEY_ENV).ok(),
            std::env::var(TVDB_API_KEY_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, tmdb_key: Option<String>, tvdb_key: Option<String>) {
        if let Some(key) = tmdb_key.filter(|k| !k.trim().is_empty()) {
            self.tmdb.api_key = key;
        }
        if let Some(key) = tvdb_key.filter(|k| !k.trim().is_empty()) {
            self.tvdb.api_key = key;
        }
    }

    /// Path of the input log
    pub fn log_file(&self) -> PathBuf {
        PathBuf::from(&self.input.log_file)
    }

    /// Directory receiving batch files
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output.dir)
    }

    /// Effective batch size (never zero)
    pub fn batch_size(&self) -> usize {
        self.output.batch_size.max(1)
    }

    /// Get the path for the log directory
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.logging.log_dir)
    }
}
