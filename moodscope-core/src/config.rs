//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/moodscope/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/moodscope/` (~/.config/moodscope/)
//! - State/Logs: `$XDG_STATE_HOME/moodscope/` (~/.local/state/moodscope/)

use crate::analytics::{RECENT_FEED_LIMIT, TOP_EMOTIONS};
use crate::dates::{DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Insights panel sizes
    #[serde(default)]
    pub insights: InsightsSection,

    /// Date, time and confidence display
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sizes of the ranked and recency panels
#[derive(Debug, Deserialize)]
pub struct InsightsSection {
    /// Number of categories in the top-emotions ranking
    #[serde(default = "default_top_emotions")]
    pub top_emotions: usize,

    /// Number of detections in the recency feed
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for InsightsSection {
    fn default() -> Self {
        Self {
            top_emotions: default_top_emotions(),
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_top_emotions() -> usize {
    TOP_EMOTIONS
}

fn default_recent_limit() -> usize {
    RECENT_FEED_LIMIT
}

/// Time zone used for calendar days and labels
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewerZone {
    /// The host's local zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
}

/// Display configuration
#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    /// strftime pattern for dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// strftime pattern for times
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Zone used to bucket days and render labels
    #[serde(default)]
    pub timezone: ViewerZone,

    /// Clamp confidences into 0..=1 before rendering
    #[serde(default)]
    pub clamp_confidence: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            time_format: default_time_format(),
            timezone: ViewerZone::default(),
            clamp_confidence: false,
        }
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

/// Returns true when every item of a strftime pattern is recognized.
fn is_valid_strftime(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.insights.top_emotions == 0 {
            return Err(Error::Config(
                "insights.top_emotions must be at least 1".to_string(),
            ));
        }
        if self.insights.recent_limit == 0 {
            return Err(Error::Config(
                "insights.recent_limit must be at least 1".to_string(),
            ));
        }
        if !is_valid_strftime(&self.display.date_format) {
            return Err(Error::Config(format!(
                "display.date_format is not a valid strftime pattern: {:?}",
                self.display.date_format
            )));
        }
        if !is_valid_strftime(&self.display.time_format) {
            return Err(Error::Config(format!(
                "display.time_format is not a valid strftime pattern: {:?}",
                self.display.time_format
            )));
        }
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/moodscope/config.toml` (~/.config/moodscope/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("moodscope").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/moodscope/` (~/.local/state/moodscope/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("moodscope")
    }
}
