//! Best-effort analytics cache refresh.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::port::outbound::cache::{CacheRefresher, RefreshRequest};

/// What happened to the refresh request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshReport {
    /// The cache answered; the status is informational only.
    Sent { status: u16 },
    /// The cache could not be reached. The pipeline carries on.
    Skipped { warning: String },
}

impl RefreshReport {
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        match self {
            RefreshReport::Skipped { warning } => Some(warning),
            RefreshReport::Sent { .. } => None,
        }
    }
}

/// Tells the downstream cache that a new forecast is available.
pub struct CacheRefreshNotifier {
    refresher: Arc<dyn CacheRefresher>,
    cube: String,
}

impl CacheRefreshNotifier {
    #[must_use]
    pub fn new(refresher: Arc<dyn CacheRefresher>, cube: impl Into<String>) -> Self {
        Self {
            refresher,
            cube: cube.into(),
        }
    }

    /// Request a forced refresh of the configured cube.
    ///
    /// Network failures are reported as [`RefreshReport::Skipped`], never
    /// as errors.
    ///
    /// # Errors
    ///
    /// [`PipelineError::UpstreamNotReady`] when called without a
    /// successful forecast.
    pub async fn refresh(&self, upstream_ok: bool) -> Result<RefreshReport> {
        if !upstream_ok {
            return Err(PipelineError::UpstreamNotReady {
                stage: "refreshing",
            }
            .into());
        }

        let request = RefreshRequest::forced(self.cube.as_str());
        info!(
            provider = self.refresher.name(),
            cube = %self.cube,
            "Requesting cache refresh"
        );

        match self.refresher.refresh(&request).await {
            Ok(status) => {
                if (200..300).contains(&status) {
                    info!(status, "Cache refresh acknowledged");
                } else {
                    warn!(status, "Cache answered refresh with a non-success status");
                }
                Ok(RefreshReport::Sent { status })
            }
            Err(err) => {
                warn!(error = %err, "Could not reach cache, continuing without refresh");
                Ok(RefreshReport::Skipped {
                    warning: format!("cache refresh failed: {err}"),
                })
            }
        }
    }
}
