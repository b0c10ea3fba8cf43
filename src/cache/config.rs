//! Query cache configuration.
//!
//! Populated from the `[cache]` section of `homeservice.toml`.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Deserialize;

const DEFAULT_MAX_ENTRIES: usize = 256;
const DEFAULT_STALE_TIME_MS: u64 = 0;
const DEFAULT_QUERY_RETRIES: u32 = 0;
const DEFAULT_DASHBOARD_REFETCH_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum cached query results before LRU eviction.
    pub max_entries: usize,
    /// How long a stored result is served without refetching.
    pub stale_time_ms: u64,
    /// Retry budget for retryable query failures.
    pub query_retries: u32,
    /// Polling interval for dashboard statistics.
    pub dashboard_refetch_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            stale_time_ms: DEFAULT_STALE_TIME_MS,
            query_retries: DEFAULT_QUERY_RETRIES,
            dashboard_refetch_ms: DEFAULT_DASHBOARD_REFETCH_MS,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            max_entries: settings.max_entries.get(),
            stale_time_ms: settings.stale_time_ms,
            query_retries: settings.query_retries,
            dashboard_refetch_ms: settings.dashboard_refetch_ms,
        }
    }
}

impl CacheConfig {
    /// Returns the entry limit as NonZeroUsize, clamping to 1 if zero.
    pub fn max_entries_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.max_entries).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_millis(self.stale_time_ms)
    }

    /// Dashboard polling interval; zero disables polling.
    pub fn dashboard_refetch(&self) -> Option<Duration> {
        (self.dashboard_refetch_ms > 0).then(|| Duration::from_millis(self.dashboard_refetch_ms))
    }
}
