//! Single-feature ordinary least squares.
//!
//! Fits `actual_sales = intercept + slope * period` in closed form. Rows
//! are summed in period order so the same dataset always produces the
//! same bits regardless of how storage returned them.

use std::collections::HashSet;

use super::error::DomainError;
use super::sales::HistoricalSalesRecord;

/// A fitted straight line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
    /// Number of observations the model was fitted on.
    pub samples: usize,
}

impl LinearModel {
    /// Fit the line by ordinary least squares.
    ///
    /// With a single observation (or no spread in periods) the slope is
    /// zero and the intercept is the mean of the observed sales.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyDataset`] for an empty input, and a
    /// validation error for duplicate periods or non-finite sales.
    pub fn fit(records: &[HistoricalSalesRecord]) -> Result<Self, DomainError> {
        if records.is_empty() {
            return Err(DomainError::EmptyDataset);
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in records {
            if !record.actual_sales.is_finite() {
                return Err(DomainError::NonFiniteSales {
                    period: record.period,
                    value: record.actual_sales,
                });
            }
            if !seen.insert(record.period) {
                return Err(DomainError::DuplicatePeriod {
                    period: record.period,
                });
            }
        }

        let mut ordered = records.to_vec();
        ordered.sort_by_key(|r| r.period);

        let n = ordered.len() as f64;
        let mean_x = ordered.iter().map(|r| f64::from(r.period)).sum::<f64>() / n;
        let mean_y = ordered.iter().map(|r| r.actual_sales).sum::<f64>() / n;

        let (sxy, sxx) = ordered.iter().fold((0.0, 0.0), |(sxy, sxx), r| {
            let dx = f64::from(r.period) - mean_x;
            (sxy + dx * (r.actual_sales - mean_y), sxx + dx * dx)
        });

        let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };

        Ok(Self {
            slope,
            intercept: mean_y - slope * mean_x,
            samples: ordered.len(),
        })
    }

    /// Predicted sales for a period.
    #[must_use]
    pub fn predict(&self, period: i32) -> f64 {
        self.intercept + self.slope * f64::from(period)
    }
}

/// Round to two decimal places, half away from zero.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
