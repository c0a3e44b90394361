//! Fixed-backoff retry around fallible async operations.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::error::Result;

/// How many times an operation is attempted and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between a failed attempt and the next one.
    pub backoff: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// A single attempt, no backoff.
    #[must_use]
    pub const fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Run `operation` until it succeeds or attempts are exhausted.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt.
    pub async fn run<T, F, Fut>(&self, name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt >= max_attempts => {
                    warn!(
                        operation = name,
                        attempts = attempt,
                        error = %err,
                        "Retries exhausted"
                    );
                    return Err(err);
                }
                Err(err) => self.backoff(name, attempt, max_attempts, &err).await,
            }
        }
    }

    async fn backoff(&self, name: &str, attempt: u32, max_attempts: u32, err: &impl Display) {
        warn!(
            operation = name,
            attempt,
            max_attempts,
            backoff_secs = self.backoff.as_secs_f64(),
            error = %err,
            "Operation failed, retrying"
        );
        if !self.backoff.is_zero() {
            sleep(self.backoff).await;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn default_policy_is_three_attempts_thirty_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result = policy
            .run("flaky", || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(Error::Connection(format!("attempt {n}")))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn returns_last_error_when_exhausted() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(3, Duration::from_millis(1));

        let result: Result<()> = policy
            .run("down", || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Err(Error::Connection(format!("attempt {n}")))
            })
            .await;

        assert!(matches!(result, Err(Error::Connection(msg)) if msg == "attempt 3"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn zero_attempts_still_runs_once() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(0, Duration::ZERO);

        let _: Result<()> = policy
            .run("once", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::Database("boom".into()))
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
