//! Read descriptors.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::api::QueryKey;
use crate::error::ApiError;

const RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(30);

pub(crate) type Fetcher<T> =
    Arc<dyn Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Disabled queries never touch the network.
    pub enabled: bool,
    /// How long a stored result is served without refetching.
    pub stale_time: Duration,
    /// Observers poll at this interval when set.
    pub refetch_interval: Option<Duration>,
    /// Additional attempts for retryable failures.
    pub retry: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            stale_time: Duration::ZERO,
            refetch_interval: None,
            retry: 0,
        }
    }
}

/// Delay before retry number `attempt` (zero-based).
pub fn retry_delay(attempt: u32) -> Duration {
    let factor = 1_u32.checked_shl(attempt).unwrap_or(u32::MAX);
    RETRY_BASE_DELAY
        .checked_mul(factor)
        .map_or(RETRY_MAX_DELAY, |delay| delay.min(RETRY_MAX_DELAY))
}

/// A keyed read: the key identifies the cached result, the fetcher produces it.
pub struct Query<T> {
    key: QueryKey,
    options: QueryOptions,
    fetcher: Fetcher<T>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            options: self.options.clone(),
            fetcher: self.fetcher.clone(),
        }
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("key", &self.key)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Query<T> {
    pub fn new<F, Fut>(key: QueryKey, fetcher: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        Self {
            key,
            options: QueryOptions::default(),
            fetcher: Arc::new(move || fetcher().boxed()),
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.options.enabled = enabled;
        self
    }

    pub fn stale_time(mut self, stale_time: Duration) -> Self {
        self.options.stale_time = stale_time;
        self
    }

    pub fn refetch_interval(mut self, interval: Option<Duration>) -> Self {
        self.options.refetch_interval = interval;
        self
    }

    pub fn retry(mut self, retry: u32) -> Self {
        self.options.retry = retry;
        self
    }

    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Runs the fetcher directly, bypassing the cache. Retryable failures are
    /// retried up to `retry` times with exponential backoff.
    pub async fn run(&self) -> Result<T, ApiError> {
        let mut attempt = 0;
        loop {
            match (self.fetcher)().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.options.retry && err.is_retryable() => {
                    let delay = retry_delay(attempt);
                    tracing::debug!(
                        key = %self.key,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying query"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Snapshot published by an [`Observer`](super::Observer).
pub enum QueryState<T> {
    /// The query is disabled.
    Idle { key: QueryKey },
    Loading { key: QueryKey },
    Ready { key: QueryKey, data: Arc<T> },
    Failed { key: QueryKey, error: ApiError },
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            QueryState::Idle { key } => QueryState::Idle { key: key.clone() },
            QueryState::Loading { key } => QueryState::Loading { key: key.clone() },
            QueryState::Ready { key, data } => QueryState::Ready {
                key: key.clone(),
                data: data.clone(),
            },
            QueryState::Failed { key, error } => QueryState::Failed {
                key: key.clone(),
                error: error.clone(),
            },
        }
    }
}

impl<T> fmt::Debug for QueryState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryState::Idle { key } => write!(f, "Idle({key})"),
            QueryState::Loading { key } => write!(f, "Loading({key})"),
            QueryState::Ready { key, .. } => write!(f, "Ready({key})"),
            QueryState::Failed { key, error } => write!(f, "Failed({key}: {error})"),
        }
    }
}

impl<T> QueryState<T> {
    pub fn key(&self) -> &QueryKey {
        match self {
            QueryState::Idle { key }
            | QueryState::Loading { key }
            | QueryState::Ready { key, .. }
            | QueryState::Failed { key, .. } => key,
        }
    }

    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            QueryState::Ready { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            QueryState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading { .. })
    }

    /// Nothing is outstanding for this state.
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(retry_delay(0), Duration::from_secs(1));
        assert_eq!(retry_delay(1), Duration::from_secs(2));
        assert_eq!(retry_delay(4), Duration::from_secs(16));
        assert_eq!(retry_delay(5), Duration::from_secs(30));
        assert_eq!(retry_delay(40), Duration::from_secs(30));
    }

    #[test]
    fn defaults_match_a_plain_read() {
        let options = QueryOptions::default();
        assert!(options.enabled);
        assert_eq!(options.retry, 0);
        assert!(options.refetch_interval.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures_only() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let query = Query::new(QueryKey::from_url("/api/admin/icons/list"), move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(ApiError::Transport("reset".into()))
                } else {
                    Ok(7_u8)
                }
            }
        })
        .retry(3);

        assert_eq!(query.run().await.expect("value"), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let query = Query::new(QueryKey::default(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err::<u8, _>(ApiError::MissingPrecondition("id")) }
        })
        .retry(3);

        assert!(query.run().await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
