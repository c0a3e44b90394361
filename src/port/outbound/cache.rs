//! Downstream analytics cache refresh port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Body of a pre-aggregation refresh request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Cubes whose pre-aggregations should be rebuilt.
    pub cubes: Vec<String>,
    /// Rebuild even if the cache believes it is fresh.
    pub force: bool,
}

impl RefreshRequest {
    /// Forced refresh of a single cube.
    #[must_use]
    pub fn forced(cube: impl Into<String>) -> Self {
        Self {
            cubes: vec![cube.into()],
            force: true,
        }
    }
}

/// Client for an OLAP cache that can rebuild its aggregates on demand.
#[async_trait]
pub trait CacheRefresher: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Send the refresh request and return the HTTP status received.
    ///
    /// The status is reported, not validated: any response counts.
    ///
    /// # Errors
    ///
    /// Returns an error when no response arrives (timeout, refused
    /// connection, malformed exchange).
    async fn refresh(&self, request: &RefreshRequest) -> Result<u16>;
}
