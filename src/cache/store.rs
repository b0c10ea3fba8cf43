//! Result storage for the query cache.

use std::any::Any;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use lru::LruCache;
use metrics::counter;

use super::config::CacheConfig;
use super::lock::{rw_read, rw_write};
use crate::api::QueryKey;
use crate::telemetry::METRIC_QUERY_EVICT_TOTAL;

const SOURCE: &str = "cache::store";

pub(crate) type AnyValue = Arc<dyn Any + Send + Sync>;

struct CacheEntry {
    value: AnyValue,
    updated_at: Instant,
    invalidated: bool,
}

impl CacheEntry {
    fn is_fresh(&self, stale_time: Duration) -> bool {
        !self.invalidated && self.updated_at.elapsed() < stale_time
    }
}

/// LRU-bounded map from query key to the last successful result.
pub(crate) struct QueryStore {
    entries: RwLock<LruCache<QueryKey, CacheEntry>>,
}

impl QueryStore {
    pub(crate) fn new(config: &CacheConfig) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(config.max_entries_non_zero())),
        }
    }

    /// Result for `key` if it is younger than `stale_time` and has not been
    /// invalidated.
    pub(crate) fn get_fresh(&self, key: &QueryKey, stale_time: Duration) -> Option<AnyValue> {
        let mut entries = rw_write(&self.entries, SOURCE, "get_fresh");
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(stale_time))
            .map(|entry| entry.value.clone())
    }

    /// Last stored result regardless of staleness.
    pub(crate) fn peek(&self, key: &QueryKey) -> Option<AnyValue> {
        rw_read(&self.entries, SOURCE, "peek")
            .peek(key)
            .map(|entry| entry.value.clone())
    }

    pub(crate) fn is_invalidated(&self, key: &QueryKey) -> Option<bool> {
        rw_read(&self.entries, SOURCE, "is_invalidated")
            .peek(key)
            .map(|entry| entry.invalidated)
    }

    pub(crate) fn insert(&self, key: QueryKey, value: AnyValue) {
        let entry = CacheEntry {
            value,
            updated_at: Instant::now(),
            invalidated: false,
        };
        let mut entries = rw_write(&self.entries, SOURCE, "insert");
        if let Some((evicted, _)) = entries.push(key.clone(), entry)
            && evicted != key
        {
            counter!(METRIC_QUERY_EVICT_TOTAL).increment(1);
        }
    }

    /// Marks every entry under `prefix` stale; returns how many were marked.
    pub(crate) fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = rw_write(&self.entries, SOURCE, "invalidate");
        let mut marked = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                marked += 1;
            }
        }
        marked
    }

    pub(crate) fn clear(&self) {
        rw_write(&self.entries, SOURCE, "clear").clear();
    }

    pub(crate) fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(max_entries: usize) -> QueryStore {
        QueryStore::new(&CacheConfig {
            max_entries,
            ..Default::default()
        })
    }

    fn key(url: &str) -> QueryKey {
        QueryKey::from_url(url)
    }

    #[test]
    fn zero_stale_time_is_never_fresh() {
        let store = store(4);
        store.insert(key("/api/admin/icons/list"), Arc::new(1_u8));
        assert!(store.get_fresh(&key("/api/admin/icons/list"), Duration::ZERO).is_none());
        assert!(store.peek(&key("/api/admin/icons/list")).is_some());
    }

    #[test]
    fn invalidation_marks_prefix_only() {
        let store = store(4);
        store.insert(key("/api/admin/reviews/list?page=1"), Arc::new(1_u8));
        store.insert(key("/api/admin/reviews/list?page=2"), Arc::new(2_u8));
        store.insert(key("/api/admin/reviews/5"), Arc::new(3_u8));

        let marked = store.invalidate(&key("/api/admin/reviews/list"));
        assert_eq!(marked, 2);

        let hour = Duration::from_secs(3600);
        assert!(store.get_fresh(&key("/api/admin/reviews/list?page=1"), hour).is_none());
        assert!(store.get_fresh(&key("/api/admin/reviews/5"), hour).is_some());
        assert_eq!(store.is_invalidated(&key("/api/admin/reviews/list?page=2")), Some(true));
    }

    #[test]
    fn lru_bound_evicts_oldest() {
        let store = store(2);
        store.insert(key("/a"), Arc::new(1_u8));
        store.insert(key("/b"), Arc::new(2_u8));
        store.insert(key("/c"), Arc::new(3_u8));

        assert_eq!(store.len(), 2);
        assert!(store.peek(&key("/a")).is_none());
    }

    #[test]
    fn reinsert_clears_invalidation() {
        let store = store(2);
        store.insert(key("/a"), Arc::new(1_u8));
        store.invalidate(&key("/a"));
        store.insert(key("/a"), Arc::new(2_u8));
        assert_eq!(store.is_invalidated(&key("/a")), Some(false));
    }
}
