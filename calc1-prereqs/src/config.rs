use std::path::Path;
use std::time::Duration;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::module::catalog::{
    DEFAULT_API_BASE, DEFAULT_BACKOFF, DEFAULT_MAX_ATTEMPTS, DEFAULT_SHEET_NAME,
};

/// Runtime settings for a scrape. Every field has a default, so an empty
/// (or missing) config file yields a working setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: f64,

    /// Pause between per-subject fetches in exhaustive mode
    #[serde(default = "default_subject_delay_ms")]
    pub subject_delay_ms: u64,

    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for rolling log files; console-only logging when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_retry_backoff_secs() -> f64 {
    DEFAULT_BACKOFF.as_secs_f64()
}

fn default_subject_delay_ms() -> u64 {
    300
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_backoff_secs: default_retry_backoff_secs(),
            subject_delay_ms: default_subject_delay_ms(),
            sheet_name: default_sheet_name(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl ScraperConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ScraperConfig = toml::from_str(&content)?;
        config.retry_backoff()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Fails on negative, NaN or out-of-range values, all of which TOML
    /// happily parses.
    pub fn retry_backoff(&self) -> anyhow::Result<Duration> {
        Duration::try_from_secs_f64(self.retry_backoff_secs)
            .map_err(|e| anyhow!("Invalid retry_backoff_secs {}: {}", self.retry_backoff_secs, e))
    }

    pub fn subject_delay(&self) -> Duration {
        Duration::from_millis(self.subject_delay_ms)
    }
}
