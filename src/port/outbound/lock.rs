//! Run-level mutual exclusion across pipeline invocations.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// How a lock was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockGrant {
    /// No one held the lock.
    Fresh,
    /// A holder older than the staleness window was displaced.
    Stolen { previous_holder: String },
}

/// Named lock shared by every process pointed at the same store.
#[async_trait]
pub trait RunLock: Send + Sync {
    /// Take the lock `name` for `holder`.
    ///
    /// A lock held for longer than `stale_after` is taken over.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RunInProgress`](crate::error::Error::RunInProgress)
    /// when a live holder owns the lock.
    async fn acquire(&self, name: &str, holder: &str, stale_after: Duration) -> Result<LockGrant>;

    /// Release `name` if `holder` still owns it. Returns whether a row was removed.
    async fn release(&self, name: &str, holder: &str) -> Result<bool>;
}
