//! Sync timing configuration parsed from environment variables.

use std::time::Duration;

use crate::retry::{MIN_POLL_INTERVAL, PollBackoff, RetryPolicy};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_AUTHOR_POLL_MS: u64 = 2000;
pub const DEFAULT_VIEWER_POLL_MS: u64 = 1000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_WRITE_ATTEMPTS: u32 = 2;
pub const DEFAULT_WRITE_RETRY_BASE_MS: u64 = 100;
pub const DEFAULT_MAX_POLL_BACKOFF_MS: u64 = 30_000;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

/// Poll intervals, debounce window, write retry and HTTP timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    pub author_poll: Duration,
    pub viewer_poll: Duration,
    /// Trailing debounce window for geometry writes.
    pub debounce: Duration,
    /// Total attempts for a background geometry write, including the first.
    pub write_attempts: u32,
    pub write_retry_base: Duration,
    /// Upper bound for the poll delay after consecutive failures.
    pub max_poll_backoff: Duration,
    pub http_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            author_poll: Duration::from_millis(DEFAULT_AUTHOR_POLL_MS),
            viewer_poll: Duration::from_millis(DEFAULT_VIEWER_POLL_MS),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            write_attempts: DEFAULT_WRITE_ATTEMPTS,
            write_retry_base: Duration::from_millis(DEFAULT_WRITE_RETRY_BASE_MS),
            max_poll_backoff: Duration::from_millis(DEFAULT_MAX_POLL_BACKOFF_MS),
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
        }
    }
}

impl SyncConfig {
    /// Build from environment variables. Missing or unparsable values use the default.
    /// Poll intervals are floored at [`MIN_POLL_INTERVAL`] and write attempts at 1.
    ///
    /// - `SLIDECAST_AUTHOR_POLL_MS` (2000)
    /// - `SLIDECAST_VIEWER_POLL_MS` (1000)
    /// - `SLIDECAST_DEBOUNCE_MS` (300)
    /// - `SLIDECAST_WRITE_ATTEMPTS` (2)
    /// - `SLIDECAST_WRITE_RETRY_BASE_MS` (100)
    /// - `SLIDECAST_MAX_POLL_BACKOFF_MS` (30000)
    /// - `SLIDECAST_HTTP_TIMEOUT_MS` (5000)
    #[must_use]
    pub fn from_env() -> Self {
        let ms = |key: &str, default: u64| Duration::from_millis(env_parse(key, default));
        Self {
            author_poll: ms("SLIDECAST_AUTHOR_POLL_MS", DEFAULT_AUTHOR_POLL_MS).max(MIN_POLL_INTERVAL),
            viewer_poll: ms("SLIDECAST_VIEWER_POLL_MS", DEFAULT_VIEWER_POLL_MS).max(MIN_POLL_INTERVAL),
            debounce: ms("SLIDECAST_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS),
            write_attempts: env_parse("SLIDECAST_WRITE_ATTEMPTS", DEFAULT_WRITE_ATTEMPTS).max(1),
            write_retry_base: ms("SLIDECAST_WRITE_RETRY_BASE_MS", DEFAULT_WRITE_RETRY_BASE_MS),
            max_poll_backoff: ms("SLIDECAST_MAX_POLL_BACKOFF_MS", DEFAULT_MAX_POLL_BACKOFF_MS),
            http_timeout: ms("SLIDECAST_HTTP_TIMEOUT_MS", DEFAULT_HTTP_TIMEOUT_MS),
        }
    }

    #[must_use]
    pub fn write_retry(&self) -> RetryPolicy {
        RetryPolicy { attempts: self.write_attempts, base: self.write_retry_base }
    }

    #[must_use]
    pub fn author_backoff(&self) -> PollBackoff {
        PollBackoff::new(self.author_poll, self.max_poll_backoff)
    }

    #[must_use]
    pub fn viewer_backoff(&self) -> PollBackoff {
        PollBackoff::new(self.viewer_poll, self.max_poll_backoff)
    }
}

/// Parse an environment variable, falling back to `default` when it is missing or
/// does not parse.
pub fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
