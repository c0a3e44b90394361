//! Source data verification.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::retry::RetryPolicy;
use crate::port::outbound::sales::SalesStore;

/// Checks that history can be read and is not empty.
pub struct Verifier {
    store: Arc<dyn SalesStore>,
    retry: RetryPolicy,
    sample_size: i64,
}

impl Verifier {
    #[must_use]
    pub fn new(store: Arc<dyn SalesStore>, retry: RetryPolicy, sample_size: i64) -> Self {
        Self {
            store,
            retry,
            sample_size: sample_size.max(1),
        }
    }

    /// Read a small sample of history.
    ///
    /// Read errors are retried; an empty sample is final. Never errors:
    /// anything other than a non-empty sample yields `false`.
    pub async fn verify(&self) -> bool {
        info!(sample_size = self.sample_size, "Verifying source data");

        let sample = self
            .retry
            .run("verify", || self.store.sample_history(self.sample_size))
            .await;

        match sample {
            Ok(rows) if rows.is_empty() => {
                warn!("Historical sales table is empty");
                false
            }
            Ok(rows) => {
                info!(rows = rows.len(), "Source data verified");
                true
            }
            Err(err) => {
                error!(error = %err, "Source data verification failed");
                false
            }
        }
    }
}
