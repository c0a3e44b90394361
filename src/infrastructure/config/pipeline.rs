//! Pipeline tuning sections: retry, forecast, and run lock.

use std::time::Duration;

use serde::Deserialize;

use crate::application::pipeline::RetryPolicy;

/// Retry behaviour for seeding and verification.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed delay between attempts (seconds).
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_backoff_secs() -> u64 {
    30
}

impl RetryConfig {
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_secs(self.backoff_secs))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_secs: default_backoff_secs(),
        }
    }
}

/// Forecast model settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    /// Tag stored with every prediction.
    #[serde(default = "default_model_version")]
    pub model_version: String,
    /// Rows read when verifying source data.
    #[serde(default = "default_sample_size")]
    pub sample_size: i64,
}

fn default_model_version() -> String {
    "v1.1-dynamic".into()
}

const fn default_sample_size() -> i64 {
    5
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            model_version: default_model_version(),
            sample_size: default_sample_size(),
        }
    }
}

/// Run lock preventing overlapping invocations.
#[derive(Debug, Clone, Deserialize)]
pub struct LockConfig {
    #[serde(default = "default_lock_enabled")]
    pub enabled: bool,
    /// Held locks older than this are taken over (seconds).
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
}

const fn default_lock_enabled() -> bool {
    true
}

const fn default_stale_after_secs() -> u64 {
    3600
}

impl LockConfig {
    #[must_use]
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            enabled: default_lock_enabled(),
            stale_after_secs: default_stale_after_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_defaults_match_three_attempts_thirty_seconds() {
        let policy = RetryConfig::default().policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff, Duration::from_secs(30));
    }

    #[test]
    fn lock_stale_after_is_seconds() {
        let lock = LockConfig {
            enabled: true,
            stale_after_secs: 90,
        };
        assert_eq!(lock.stale_after(), Duration::from_secs(90));
    }
}
