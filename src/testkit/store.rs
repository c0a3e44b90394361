//! In-memory [`SalesStore`] with fault injection.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{HistoricalSalesRecord, PredictionRecord};
use crate::error::{Error, Result};
use crate::port::outbound::sales::SalesStore;

#[derive(Default)]
struct MemoryState {
    /// `None` models a history table that does not exist.
    history: Option<Vec<HistoricalSalesRecord>>,
    prediction: Option<PredictionRecord>,
}

/// Thread-safe store double mirroring the SQLite store's table semantics.
#[derive(Default)]
pub struct MemorySalesStore {
    state: Mutex<MemoryState>,
    outage: AtomicBool,
    transient_failures: AtomicU32,
    fail_appends: AtomicBool,
    fail_prediction_writes: AtomicBool,
    fail_samples: AtomicBool,
    count_calls: AtomicU32,
    sample_calls: AtomicU32,
    replace_history_calls: AtomicU32,
}

impl MemorySalesStore {
    /// Store without a history table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose history table exists but holds no rows.
    #[must_use]
    pub fn with_empty_table() -> Self {
        Self::with_history(Vec::new())
    }

    #[must_use]
    pub fn with_history(records: Vec<HistoricalSalesRecord>) -> Self {
        let store = Self::default();
        store.state.lock().history = Some(records);
        store
    }

    /// Every operation fails while set.
    pub fn set_outage(&self, down: bool) {
        self.outage.store(down, Ordering::SeqCst);
    }

    /// The next `n` operations fail, then the store recovers.
    pub fn fail_next(&self, n: u32) {
        self.transient_failures.store(n, Ordering::SeqCst);
    }

    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_prediction_writes(&self, fail: bool) {
        self.fail_prediction_writes.store(fail, Ordering::SeqCst);
    }

    /// Sample reads fail while set; counts and full loads still work.
    pub fn set_fail_samples(&self, fail: bool) {
        self.fail_samples.store(fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn history(&self) -> Option<Vec<HistoricalSalesRecord>> {
        self.state.lock().history.clone()
    }

    #[must_use]
    pub fn prediction(&self) -> Option<PredictionRecord> {
        self.state.lock().prediction.clone()
    }

    #[must_use]
    pub fn count_calls(&self) -> u32 {
        self.count_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn sample_calls(&self) -> u32 {
        self.sample_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn replace_history_calls(&self) -> u32 {
        self.replace_history_calls.load(Ordering::SeqCst)
    }

    fn check_faults(&self) -> Result<()> {
        if self.outage.load(Ordering::SeqCst) {
            return Err(Error::Connection("storage unavailable".into()));
        }
        let transient = self
            .transient_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if transient {
            return Err(Error::Connection("transient storage failure".into()));
        }
        Ok(())
    }

    fn missing_table() -> Error {
        Error::MissingTable {
            table: "ventas_historicas",
        }
    }
}

#[async_trait]
impl SalesStore for MemorySalesStore {
    async fn count_history(&self) -> Result<i64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check_faults()?;
        let state = self.state.lock();
        let history = state.history.as_ref().ok_or_else(Self::missing_table)?;
        Ok(history.len() as i64)
    }

    async fn sample_history(&self, limit: i64) -> Result<Vec<HistoricalSalesRecord>> {
        self.sample_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_samples.load(Ordering::SeqCst) {
            return Err(Error::Database("database is locked".into()));
        }
        let mut rows = self.load_history().await?;
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn load_history(&self) -> Result<Vec<HistoricalSalesRecord>> {
        self.check_faults()?;
        let state = self.state.lock();
        let mut rows = state.history.clone().ok_or_else(Self::missing_table)?;
        rows.sort_by_key(|r| r.period);
        Ok(rows)
    }

    async fn append_history(&self, records: &[HistoricalSalesRecord]) -> Result<usize> {
        self.check_faults()?;
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(Error::Database("append rejected".into()));
        }
        let mut state = self.state.lock();
        let history = state.history.as_mut().ok_or_else(Self::missing_table)?;
        if let Some(dup) = records
            .iter()
            .find(|r| history.iter().any(|h| h.period == r.period))
        {
            return Err(Error::Database(format!(
                "UNIQUE constraint failed: ventas_historicas.historical_period ({})",
                dup.period
            )));
        }
        history.extend_from_slice(records);
        Ok(records.len())
    }

    async fn replace_history(&self, records: &[HistoricalSalesRecord]) -> Result<usize> {
        self.replace_history_calls.fetch_add(1, Ordering::SeqCst);
        self.check_faults()?;
        self.state.lock().history = Some(records.to_vec());
        Ok(records.len())
    }

    async fn replace_prediction(&self, record: &PredictionRecord) -> Result<()> {
        self.check_faults()?;
        if self.fail_prediction_writes.load(Ordering::SeqCst) {
            return Err(Error::Database("disk I/O error".into()));
        }
        self.state.lock().prediction = Some(record.clone());
        Ok(())
    }

    async fn current_prediction(&self) -> Result<Option<PredictionRecord>> {
        self.check_faults()?;
        Ok(self.state.lock().prediction.clone())
    }
}
