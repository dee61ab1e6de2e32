//! Bounded response cache with a staleness window.
//!
//! Entries younger than `stale_after` are served without touching the
//! network. Older entries are refetched. The cache holds at most
//! `capacity` responses and drops the least recently used one when full;
//! entries older than `evict_after` are also dropped on the next insert.

use super::client::CatalogRequest;
use crate::model::Product;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default freshness window.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5);
/// Default eviction age.
pub const DEFAULT_EVICT_AFTER: Duration = Duration::from_secs(5 * 60);
/// Default number of cached responses.
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
struct CacheEntry {
    products: Arc<Vec<Product>>,
    fetched_at: Instant,
}

/// Response cache keyed by request (query + page).
#[derive(Debug)]
pub struct CatalogCache {
    stale_after: Duration,
    evict_after: Duration,
    entries: LruCache<CatalogRequest, CacheEntry>,
}

impl CatalogCache {
    /// Create a cache with the given freshness age, eviction age and capacity.
    ///
    /// A capacity of 0 uses [`DEFAULT_CAPACITY`].
    pub fn new(stale_after: Duration, evict_after: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            stale_after,
            evict_after: evict_after.max(stale_after),
            entries: LruCache::new(capacity),
        }
    }

    /// Cached products for `request` if they are still fresh at `now`.
    ///
    /// A hit marks the entry most recently used.
    pub fn get_fresh(&mut self, request: &CatalogRequest, now: Instant) -> Option<Arc<Vec<Product>>> {
        let stale_after = self.stale_after;
        self.entries
            .get(request)
            .filter(|e| now.saturating_duration_since(e.fetched_at) < stale_after)
            .map(|e| Arc::clone(&e.products))
    }

    /// Store a fresh response, dropping expired entries first.
    ///
    /// At capacity the least recently used entry makes room.
    pub fn insert(&mut self, request: CatalogRequest, products: Arc<Vec<Product>>, now: Instant) {
        self.evict_expired(now);
        self.entries.put(
            request,
            CacheEntry {
                products,
                fetched_at: now,
            },
        );
    }

    /// Drop every entry older than the eviction age.
    pub fn evict_expired(&mut self, now: Instant) {
        let evict_after = self.evict_after;
        let expired: Vec<CatalogRequest> = self
            .entries
            .iter()
            .filter(|(_, e)| now.saturating_duration_since(e.fetched_at) >= evict_after)
            .map(|(k, _)| k.clone())
            .collect();
        for key in &expired {
            self.entries.pop(key);
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Number of entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_AFTER, DEFAULT_EVICT_AFTER, DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(query: &str, page: u32) -> CatalogRequest {
        CatalogRequest {
            query: query.to_string(),
            page,
        }
    }

    fn products() -> Arc<Vec<Product>> {
        Arc::new(vec![Product::new("1", "Shirt Pin", "Accessories")])
    }

    #[test]
    fn fresh_entry_is_served() {
        let t0 = Instant::now();
        let mut cache = CatalogCache::default();
        cache.insert(req("shirt", 1), products(), t0);
        let hit = cache.get_fresh(&req("shirt", 1), t0 + Duration::from_secs(4));
        assert_eq!(hit.map(|p| p.len()), Some(1));
    }

    #[test]
    fn stale_entry_is_not_served() {
        let t0 = Instant::now();
        let mut cache = CatalogCache::default();
        cache.insert(req("shirt", 1), products(), t0);
        assert!(cache
            .get_fresh(&req("shirt", 1), t0 + Duration::from_secs(5))
            .is_none());
        assert_eq!(cache.len(), 1, "Stale entries linger until evicted");
    }

    #[test]
    fn key_includes_page() {
        let t0 = Instant::now();
        let mut cache = CatalogCache::default();
        cache.insert(req("shirt", 1), products(), t0);
        assert!(cache.get_fresh(&req("shirt", 2), t0).is_none());
        assert!(cache.get_fresh(&req("jacket", 1), t0).is_none());
    }

    #[test]
    fn insert_evicts_expired_entries() {
        let t0 = Instant::now();
        let mut cache = CatalogCache::new(Duration::from_secs(5), Duration::from_secs(60), 8);
        cache.insert(req("old", 1), products(), t0);
        cache.insert(req("new", 1), products(), t0 + Duration::from_secs(61));
        assert_eq!(cache.len(), 1);
        assert!(cache
            .get_fresh(&req("new", 1), t0 + Duration::from_secs(61))
            .is_some());
    }

    #[test]
    fn eviction_age_never_below_staleness() {
        let t0 = Instant::now();
        let mut cache = CatalogCache::new(Duration::from_secs(10), Duration::from_secs(1), 8);
        cache.insert(req("a", 1), products(), t0);
        cache.evict_expired(t0 + Duration::from_secs(5));
        assert!(!cache.is_empty());
    }

    // ===== Capacity =====

    #[test]
    fn zero_capacity_uses_default() {
        let cache = CatalogCache::new(DEFAULT_STALE_AFTER, DEFAULT_EVICT_AFTER, 0);
        assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn many_distinct_queries_stay_within_capacity() {
        // GIVEN: a default cache and 10,000 distinct queries over 10 seconds
        let t0 = Instant::now();
        let mut cache = CatalogCache::default();

        // WHEN: every response is inserted before the eviction age passes
        for i in 0..10_000u64 {
            let now = t0 + Duration::from_millis(i);
            cache.insert(req(&format!("query {i}"), 1), products(), now);
        }

        // THEN: only the most recent responses are kept
        assert_eq!(cache.len(), DEFAULT_CAPACITY);
        let end = t0 + Duration::from_millis(9_999);
        assert!(cache.get_fresh(&req("query 9999", 1), end).is_some());
        assert!(cache.get_fresh(&req("query 0", 1), end).is_none());
    }

    #[test]
    fn hit_protects_entry_from_lru_eviction() {
        let t0 = Instant::now();
        let mut cache = CatalogCache::new(DEFAULT_STALE_AFTER, DEFAULT_EVICT_AFTER, 2);
        cache.insert(req("a", 1), products(), t0);
        cache.insert(req("b", 1), products(), t0);

        assert!(cache.get_fresh(&req("a", 1), t0).is_some());
        cache.insert(req("c", 1), products(), t0);

        assert_eq!(cache.len(), 2);
        assert!(cache.get_fresh(&req("a", 1), t0).is_some());
        assert!(cache.get_fresh(&req("b", 1), t0).is_none(), "b was least recently used");
    }
}
