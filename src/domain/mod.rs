//! Storage-agnostic domain types: sales history, forecasts, run outcomes.

pub mod error;
pub mod outcome;
pub mod prediction;
pub mod regression;
pub mod sales;

pub use outcome::{PipelineRunOutcome, Stage, StageRecord, StageStatus};
pub use prediction::PredictionRecord;
pub use regression::{round_to_cents, LinearModel};
pub use sales::{next_period, seed_records, HistoricalSalesRecord};
