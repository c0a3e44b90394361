//! Historical sales observations.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Periods of the baseline dataset written when history is missing.
const SEED_PERIODS: [i32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Sales figures matching [`SEED_PERIODS`] one to one.
const SEED_SALES: [f64; 10] = [
    100.0, 150.0, 120.0, 200.0, 210.0, 250.0, 240.0, 300.0, 320.0, 350.0,
];

/// One month of observed sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSalesRecord {
    /// Month index; unique within a dataset.
    pub period: i32,
    /// Observed sales for the month.
    pub actual_sales: f64,
}

impl HistoricalSalesRecord {
    #[must_use]
    pub const fn new(period: i32, actual_sales: f64) -> Self {
        Self {
            period,
            actual_sales,
        }
    }
}

/// The fixed ten-month baseline used to bootstrap an empty store.
#[must_use]
pub fn seed_records() -> Vec<HistoricalSalesRecord> {
    SEED_PERIODS
        .iter()
        .zip(SEED_SALES.iter())
        .map(|(&period, &sales)| HistoricalSalesRecord::new(period, sales))
        .collect()
}

/// The period that follows the latest observation, if any.
///
/// # Errors
/// [`DomainError::PeriodOverflow`] when the latest period is `i32::MAX`.
pub fn next_period(records: &[HistoricalSalesRecord]) -> Result<Option<i32>, DomainError> {
    records
        .iter()
        .map(|r| r.period)
        .max()
        .map(|p| p.checked_add(1).ok_or(DomainError::PeriodOverflow { period: p }))
        .transpose()
}
