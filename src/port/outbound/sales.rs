//! Persistence port for sales history and the current forecast.

use async_trait::async_trait;

use crate::domain::{HistoricalSalesRecord, PredictionRecord};
use crate::error::Result;

/// Storage operations backing the pipeline.
///
/// The history table may not exist yet: read operations on a missing
/// table return an error, which callers treat as "needs seeding" or
/// "not ready" rather than as fatal.
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Count rows in the history table.
    async fn count_history(&self) -> Result<i64>;

    /// Read at most `limit` history rows, lowest periods first.
    async fn sample_history(&self, limit: i64) -> Result<Vec<HistoricalSalesRecord>>;

    /// Read the full history ordered by period.
    async fn load_history(&self) -> Result<Vec<HistoricalSalesRecord>>;

    /// Insert rows into an existing history table. Returns rows written.
    ///
    /// # Errors
    ///
    /// Fails when the table does not exist.
    async fn append_history(&self, records: &[HistoricalSalesRecord]) -> Result<usize>;

    /// Drop and recreate the history table with exactly `records`.
    async fn replace_history(&self, records: &[HistoricalSalesRecord]) -> Result<usize>;

    /// Atomically replace the forecast table with a single row.
    async fn replace_prediction(&self, record: &PredictionRecord) -> Result<()>;

    /// Read the stored forecast, `None` when the table is absent or empty.
    async fn current_prediction(&self) -> Result<Option<PredictionRecord>>;
}
