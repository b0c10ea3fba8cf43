//! De-duplicating query cache.
//!
//! One handle is shared by every consumer in the process. Reads for the same
//! key join a single in-flight request; results are stored under the key and
//! served while fresh; invalidation marks entries stale and tells active
//! observers to refetch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use metrics::counter;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::config::CacheConfig;
use super::lock::mutex_lock;
use super::planner::InvalidationPlan;
use super::query::Query;
use super::store::{AnyValue, QueryStore};
use crate::api::QueryKey;
use crate::error::ApiError;
use crate::telemetry::{
    METRIC_QUERY_DEDUP_TOTAL, METRIC_QUERY_HIT_TOTAL, METRIC_QUERY_INVALIDATION_TOTAL,
    METRIC_QUERY_MISS_TOTAL,
};

const SOURCE: &str = "cache::query_cache";
const EVENT_CHANNEL_CAPACITY: usize = 64;

type SharedFetch = Shared<BoxFuture<'static, Result<AnyValue, ApiError>>>;

/// What observers hear from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CacheEvent {
    /// Entries under this prefix went stale.
    Invalidated(QueryKey),
    /// Everything was dropped; observers go idle without refetching.
    Cleared,
}

struct InFlight {
    id: u64,
    future: SharedFetch,
}

struct Inner {
    config: CacheConfig,
    store: QueryStore,
    in_flight: Mutex<HashMap<QueryKey, InFlight>>,
    next_request_id: AtomicU64,
    events: broadcast::Sender<CacheEvent>,
}

#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("config", &self.inner.config)
            .field("entries", &self.inner.store.len())
            .finish_non_exhaustive()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                store: QueryStore::new(&config),
                config,
                in_flight: Mutex::new(HashMap::new()),
                next_request_id: AtomicU64::new(1),
                events,
            }),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    /// Returns the result for `query`.
    ///
    /// Disabled queries resolve to `Ok(None)` without any request. A stored
    /// result younger than the query's stale time is returned as is; otherwise
    /// the caller joins the in-flight request for the key or starts one.
    pub async fn fetch<T>(&self, query: &Query<T>) -> Result<Option<Arc<T>>, ApiError>
    where
        T: Send + Sync + 'static,
    {
        self.fetch_inner(query, false).await
    }

    /// Like [`fetch`](Self::fetch) but never serves a stored result.
    pub async fn refetch<T>(&self, query: &Query<T>) -> Result<Option<Arc<T>>, ApiError>
    where
        T: Send + Sync + 'static,
    {
        self.fetch_inner(query, true).await
    }

    async fn fetch_inner<T>(
        &self,
        query: &Query<T>,
        force: bool,
    ) -> Result<Option<Arc<T>>, ApiError>
    where
        T: Send + Sync + 'static,
    {
        if !query.options().enabled {
            debug!(key = %query.key(), "query disabled; skipping fetch");
            return Ok(None);
        }

        let future = match self.lookup(query, force) {
            Lookup::Fresh(value) => return downcast(query.key(), value).map(Some),
            Lookup::Pending(future) => future,
        };
        let value = future.await?;
        downcast(query.key(), value).map(Some)
    }

    fn lookup<T>(&self, query: &Query<T>, force: bool) -> Lookup
    where
        T: Send + Sync + 'static,
    {
        let key = query.key();
        let mut in_flight = mutex_lock(&self.inner.in_flight, SOURCE, "lookup");

        if let Some(pending) = in_flight.get(key) {
            counter!(METRIC_QUERY_DEDUP_TOTAL).increment(1);
            debug!(%key, request_id = pending.id, "joining in-flight query");
            return Lookup::Pending(pending.future.clone());
        }

        if !force
            && let Some(value) = self.inner.store.get_fresh(key, query.options().stale_time)
        {
            counter!(METRIC_QUERY_HIT_TOTAL).increment(1);
            return Lookup::Fresh(value);
        }

        counter!(METRIC_QUERY_MISS_TOTAL).increment(1);
        let id = self.inner.next_request_id.fetch_add(1, Ordering::Relaxed);
        let future = self.spawn_fetch(query.clone(), id);
        in_flight.insert(
            key.clone(),
            InFlight {
                id,
                future: future.clone(),
            },
        );
        debug!(%key, request_id = id, "query request started");
        Lookup::Pending(future)
    }

    fn spawn_fetch<T>(&self, query: Query<T>, id: u64) -> SharedFetch
    where
        T: Send + Sync + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let key = query.key().clone();
        let handle = tokio::spawn(async move {
            let result = query
                .run()
                .await
                .map(|value| Arc::new(value) as AnyValue);

            let key = query.key();
            let mut in_flight = mutex_lock(&inner.in_flight, SOURCE, "complete");
            let current = in_flight.get(key).is_some_and(|pending| pending.id == id);
            if current {
                in_flight.remove(key);
                if let Ok(value) = &result {
                    inner.store.insert(key.clone(), value.clone());
                }
            } else {
                debug!(%key, request_id = id, "detached query finished; result not stored");
            }
            result
        });

        let inner = Arc::clone(&self.inner);
        async move {
            match handle.await {
                Ok(result) => result,
                Err(err) => {
                    // The task never reached its own cleanup.
                    let mut in_flight = mutex_lock(&inner.in_flight, SOURCE, "abort");
                    if in_flight.get(&key).is_some_and(|pending| pending.id == id) {
                        in_flight.remove(&key);
                    }
                    warn!(%key, request_id = id, error = %err, "query task failed");
                    Err(ApiError::Transport(format!("query task failed: {err}")))
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Marks every entry under `prefix` stale and detaches in-flight requests
    /// under it so their late results are not stored. Active observers whose
    /// key falls under `prefix` refetch.
    pub fn invalidate(&self, prefix: &QueryKey) {
        let detached = {
            let mut in_flight = mutex_lock(&self.inner.in_flight, SOURCE, "invalidate");
            let before = in_flight.len();
            in_flight.retain(|key, _| !key.starts_with(prefix));
            before - in_flight.len()
        };
        let marked = self.inner.store.invalidate(prefix);

        counter!(METRIC_QUERY_INVALIDATION_TOTAL).increment(1);
        debug!(%prefix, marked, detached, "query keys invalidated");

        // No receivers simply means nothing is observing right now.
        let _ = self
            .inner
            .events
            .send(CacheEvent::Invalidated(prefix.clone()));
    }

    pub fn apply(&self, plan: &InvalidationPlan) {
        for key in plan.keys() {
            self.invalidate(key);
        }
    }

    /// Last stored result for `key`, fresh or not.
    pub fn get_query_data<T>(&self, key: &QueryKey) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.inner
            .store
            .peek(key)
            .and_then(|value| value.downcast::<T>().ok())
    }

    /// `Some(true)` once `key` has been invalidated and not yet refetched.
    pub fn is_invalidated(&self, key: &QueryKey) -> Option<bool> {
        self.inner.store.is_invalidated(key)
    }

    /// Drops every stored result and detaches all in-flight requests.
    /// Active observers go idle and stay idle until asked to fetch again.
    pub fn clear(&self) {
        mutex_lock(&self.inner.in_flight, SOURCE, "clear").clear();
        self.inner.store.clear();
        let _ = self.inner.events.send(CacheEvent::Cleared);
    }

    pub fn len(&self) -> usize {
        self.inner.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_flight_len(&self) -> usize {
        mutex_lock(&self.inner.in_flight, SOURCE, "in_flight_len").len()
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.inner.events.subscribe()
    }

    pub(crate) fn default_stale_time(&self) -> Duration {
        self.inner.config.stale_time()
    }

    pub(crate) fn default_retry(&self) -> u32 {
        self.inner.config.query_retries
    }
}

enum Lookup {
    Fresh(AnyValue),
    Pending(SharedFetch),
}

fn downcast<T>(key: &QueryKey, value: AnyValue) -> Result<Arc<T>, ApiError>
where
    T: Send + Sync + 'static,
{
    value.downcast::<T>().map_err(|_| {
        warn!(%key, "cached value has a different type than the query expects");
        ApiError::Decode(format!("cached value for {key} has an unexpected type"))
    })
}
