//! Domain validation errors for sales records and the forecast model.
//!
//! # Examples
//!
//! ```
//! use salesforecast::domain::error::DomainError;
//! use salesforecast::domain::regression::LinearModel;
//!
//! let result = LinearModel::fit(&[]);
//! assert!(matches!(result, Err(DomainError::EmptyDataset)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A model cannot be fitted without observations.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Sales figures must be finite numbers.
    #[error("non-finite sales value {value} for period {period}")]
    NonFiniteSales {
        /// The period carrying the invalid value.
        period: i32,
        /// The invalid value.
        value: f64,
    },

    /// The latest period has no successor.
    #[error("period {period} has no next period")]
    PeriodOverflow {
        /// The latest observed period.
        period: i32,
    },

    /// Each period may appear at most once per dataset.
    #[error("duplicate period {period}")]
    DuplicatePeriod {
        /// The repeated period.
        period: i32,
    },
}
