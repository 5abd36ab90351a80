//! Bounded retry for background writes and exponential backoff for polls.
//!
//! Geometry writes retry transient failures with linear backoff
//! (`attempt * base`). Everything else gets a single attempt. Polls never retry
//! inside a tick; instead the delay before the next tick doubles per consecutive
//! failure up to a cap and resets on the first success.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::store::StoreError;

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;

/// Attempt budget for one write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub attempts: u32,
    pub base: Duration,
}

impl RetryPolicy {
    /// One attempt, no retry.
    pub const ONCE: Self = Self { attempts: 1, base: Duration::ZERO };

    /// Sleep before retry number `attempt` (1-based count of failures so far).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base.saturating_mul(attempt)
    }

    /// Run `op` until it succeeds, fails permanently or the budget runs out.
    ///
    /// # Errors
    ///
    /// Returns the last error from `op`.
    pub async fn run<T, F, Fut>(&self, what: &'static str, mut op: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts && e.is_transient() => {
                    warn!(error = %e, attempt, total = attempts, what, "store write failed; retrying");
                    tokio::time::sleep(self.delay_for(attempt)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Shortest poll interval; anything below it would spin against the store.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Poll delay that grows while the store is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBackoff {
    interval: Duration,
    max: Duration,
    failures: u32,
}

impl PollBackoff {
    /// `interval` is raised to [`MIN_POLL_INTERVAL`] when shorter.
    #[must_use]
    pub fn new(interval: Duration, max: Duration) -> Self {
        Self { interval: interval.max(MIN_POLL_INTERVAL), max, failures: 0 }
    }

    #[must_use]
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn record_success(&mut self) {
        self.failures = 0;
    }

    pub fn record_failure(&mut self) {
        self.failures = self.failures.saturating_add(1);
    }

    /// `interval * 2^failures`, never above the cap (and never below the interval).
    #[must_use]
    pub fn delay(&self) -> Duration {
        let factor = 1u32.checked_shl(self.failures).unwrap_or(u32::MAX);
        self.interval.saturating_mul(factor).min(self.max.max(self.interval))
    }
}
