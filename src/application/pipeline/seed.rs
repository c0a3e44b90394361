//! Historical data seeding.

use std::sync::Arc;

use tracing::{info, warn};

use super::retry::RetryPolicy;
use crate::domain::seed_records;
use crate::error::{Error, Result};
use crate::port::outbound::sales::SalesStore;

/// Makes sure the history table exists and holds data.
pub struct Seeder {
    store: Arc<dyn SalesStore>,
    retry: RetryPolicy,
}

impl Seeder {
    #[must_use]
    pub fn new(store: Arc<dyn SalesStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// Seed the history table if it is missing or empty.
    ///
    /// Existing data is never touched: the table is only recreated when
    /// the append found no table at all. The whole check-and-write is
    /// retried under the configured policy.
    ///
    /// # Errors
    ///
    /// Returns the last storage error once retries are exhausted.
    pub async fn seed(&self) -> Result<bool> {
        self.retry.run("seed", || self.seed_once()).await
    }

    async fn seed_once(&self) -> Result<bool> {
        info!("Checking historical sales table");

        match self.store.count_history().await {
            Ok(count) if count > 0 => {
                info!(rows = count, "Historical data present, using existing rows");
                return Ok(true);
            }
            Ok(_) => info!("Historical table is empty, seeding baseline data"),
            Err(err) => info!(error = %err, "Historical table unreadable, seeding baseline data"),
        }

        let seed = seed_records();
        match self.store.append_history(&seed).await {
            Ok(rows) => info!(rows, "Historical data seeded"),
            Err(err @ Error::MissingTable { .. }) => {
                warn!(error = %err, "Append failed, creating historical table");
                let rows = self.store.replace_history(&seed).await?;
                info!(rows, "Historical table created and seeded");
            }
            Err(err) => {
                warn!(error = %err, "Append failed, keeping historical table");
                return Err(err);
            }
        }

        Ok(true)
    }
}
