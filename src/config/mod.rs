//! Layered client configuration.
//!
//! Sources, highest priority first:
//!
//! 1. Environment variables with the `STUDIOFLOW_` prefix, `__` separating
//!    nested sections (`STUDIOFLOW_API__TOKEN` maps to `api.token`)
//! 2. `studioflow.toml` in the working directory
//! 3. `studioflow/config.toml` in the user configuration directory
//! 4. Built-in defaults

mod error;

pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "STUDIOFLOW_";

/// Project-local configuration file name.
pub const LOCAL_CONFIG_FILE: &str = "studioflow.toml";

/// Longest accepted reminder window, one hundred years in hours.
pub const MAX_REMINDER_WINDOW_HOURS: u32 = 8760 * 100;

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Remote service settings.
    #[serde(default)]
    pub api: ApiSettings,
    /// Logging settings.
    #[serde(default)]
    pub log: LogSettings,
    /// Reminder banner settings.
    #[serde(default)]
    pub reminders: ReminderSettings,
}

/// Connection settings for the remote workflow service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the REST API, without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to every request.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            token: None,
            timeout_secs: 30,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// `tracing-subscriber` filter directive.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

/// Reminder banner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    /// Tasks due within this many hours are considered urgent.
    pub window_hours: u32,
    /// Number of urgent tasks listed before the overflow link.
    pub max_entries: usize,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            window_hours: 48,
            max_entries: 3,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from every source and validates it.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is
    /// invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Loads `.env` from the working directory, then every other source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is
    /// invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env file is the common case.
        if let Err(err) = dotenvy::dotenv() {
            tracing::debug!(error = %err, "no .env file loaded");
        }
        Self::load()
    }

    /// Extracts and validates configuration from a prepared figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = Path::new(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["LOG"]).split("__"))
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty base URL, a zero
    /// timeout, a reminder window that is zero or longer than a century, or
    /// a banner that lists no entries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(invalid("api.base_url", "must not be empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be greater than zero"));
        }
        if self.reminders.window_hours == 0 {
            return Err(invalid("reminders.window_hours", "must be greater than zero"));
        }
        if self.reminders.window_hours > MAX_REMINDER_WINDOW_HOURS {
            return Err(invalid("reminders.window_hours", "must be at most 876000 (100 years)"));
        }
        if self.reminders.max_entries == 0 {
            return Err(invalid("reminders.max_entries", "must be greater than zero"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("studioflow").join("config.toml"))
}
