//! The current forecast row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Forecast written by the most recent successful run.
///
/// Exactly one of these exists in storage at a time; each run replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Calendar date the forecast was produced.
    pub prediction_date: NaiveDate,
    /// Period being forecast (latest observed period + 1).
    pub predicted_period: i32,
    /// Forecast value rounded to two decimals.
    pub predicted_sales: f64,
    /// Tag of the model that produced the value.
    pub model_version: String,
}
