//! Site runtime configuration.
//!
//! # Invariants
//! - Defaults work without any environment set.
//! - Blank environment values are ignored, never treated as overrides.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Slot name the registry has always used for its account collection.
pub const DEFAULT_STORAGE_SLOT: &str = "living_with_logic_users";

const DB_FILE_NAME: &str = "living_logic.sqlite3";
const DEFAULT_SUBMIT_DELAY_MS: u64 = 1000;
const DEFAULT_SLOW_SUBMIT_DELAY_MS: u64 = 1500;

pub const ENV_DB_PATH: &str = "LIVING_LOGIC_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "LIVING_LOGIC_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LIVING_LOGIC_LOG_DIR";
pub const ENV_SUBMIT_DELAY_MS: &str = "LIVING_LOGIC_SUBMIT_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative integer, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub storage_slot: String,
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    /// Pacing delay for login, signup, contact and booking submits.
    pub submit_delay: Duration,
    /// Pacing delay for newsletter and forgot-password submits.
    pub slow_submit_delay: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_slot: DEFAULT_STORAGE_SLOT.to_string(),
            db_path: std::env::temp_dir().join(DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
            slow_submit_delay: Duration::from_millis(DEFAULT_SLOW_SUBMIT_DELAY_MS),
        }
    }
}

impl SiteConfig {
    /// Defaults overlaid with `LIVING_LOGIC_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = read(ENV_SUBMIT_DELAY_MS) {
            let millis = raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: ENV_SUBMIT_DELAY_MS,
                    value: raw.clone(),
                })?;
            config.submit_delay = Duration::from_millis(millis);
            config.slow_submit_delay = Duration::from_millis(millis);
        }
        Ok(config)
    }

    /// Configuration with pacing delays removed.
    pub fn without_delays(mut self) -> Self {
        self.submit_delay = Duration::ZERO;
        self.slow_submit_delay = Duration::ZERO;
        self
    }
}
