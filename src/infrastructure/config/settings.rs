//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file with environment variable
//! overrides for deployment-specific values like `DATABASE_URL` and
//! `CUBEJS_API_SECRET`.
//!
//! # Example
//!
//! ```no_run
//! use salesforecast::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::database::{DatabaseConfig, DATABASE_URL_ENV};
use super::logging::{LoggingConfig, LOG_FORMATS};
use super::pipeline::{ForecastConfig, LockConfig, RetryConfig};
use crate::adapter::outbound::cube::settings::{CubeConfig, API_TOKEN_ENV};
use crate::application::pipeline::PipelineSettings;
use crate::error::{ConfigError, Result};

/// Name of the run lock row shared by every pipeline instance.
pub const LOCK_NAME: &str = "sales-forecast";

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// SQLite database holding history and forecasts.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Cube API used for the cache refresh.
    #[serde(default)]
    pub cube: CubeConfig,

    /// Retry policy for seeding and verification.
    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub lock: LockConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies environment overrides before validating.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Like [`Config::load`], but a missing file means "all defaults".
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be used.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(url) = non_empty_env(DATABASE_URL_ENV) {
            self.database.url = url;
        }
        if let Some(token) = non_empty_env(API_TOKEN_ENV) {
            self.cube.api_token = token;
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.pool_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.database.is_in_memory() && self.database.pool_size > 1 {
            return Err(ConfigError::InvalidValue {
                field: "database.pool_size",
                reason: "must be 1 for an in-memory database".to_string(),
            }
            .into());
        }

        if self.cube.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "cube.base_url",
            }
            .into());
        }
        url::Url::parse(&self.cube.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "cube.base_url",
            reason: e.to_string(),
        })?;
        if self.cube.cube.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "cube.cube" }.into());
        }
        if self.cube.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cube.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.forecast.model_version.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "forecast.model_version",
            }
            .into());
        }
        if self.forecast.sample_size <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "forecast.sample_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.lock.enabled && self.lock.stale_after_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "lock.stale_after_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected one of {LOG_FORMATS:?}"),
            }
            .into());
        }

        Ok(())
    }

    /// Stage settings derived from this configuration.
    #[must_use]
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            retry: self.retry.policy(),
            model_version: self.forecast.model_version.clone(),
            sample_size: self.forecast.sample_size,
            cube: self.cube.cube.clone(),
            lock_name: LOCK_NAME.to_string(),
            lock_stale_after: self.lock.stale_after(),
        }
    }

    /// Log a warning for settings that are valid but unsafe in production.
    pub fn warn_insecure_defaults(&self) {
        if self.cube.uses_placeholder_token() {
            warn!(
                env = API_TOKEN_ENV,
                "Cube API token is the placeholder default; set it before deploying"
            );
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
