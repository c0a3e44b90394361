//! Canonical pipeline settings for tests.

use std::time::Duration;

use chrono::NaiveDate;

use crate::application::pipeline::{PipelineSettings, RetryPolicy};

/// Model tag used by [`fast_settings`].
pub const TEST_MODEL_VERSION: &str = "test-model";

/// Default settings with three attempts and no backoff.
#[must_use]
pub fn fast_settings() -> PipelineSettings {
    PipelineSettings {
        retry: RetryPolicy::new(3, Duration::ZERO),
        model_version: TEST_MODEL_VERSION.to_string(),
        ..PipelineSettings::default()
    }
}

/// Fixed clock for forecast dates.
#[must_use]
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap_or_default()
}
