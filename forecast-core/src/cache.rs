use moka::future::Cache;
use std::time::Duration;

/// Upper bound on memoized lookups; one entry per distinct query.
const MAX_ENTRIES: u64 = 256;

/// Time-boxed memoization of lookups, keyed by query.
///
/// Expired entries are never returned and are reclaimed by moka's
/// housekeeping, not only when their own key is read again.
#[derive(Debug, Clone)]
pub struct MemoCache<V: Clone + Send + Sync + 'static> {
    cache: Cache<String, V>,
}

impl<V: Clone + Send + Sync + 'static> MemoCache<V> {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .eviction_listener(|key, _value, cause| {
                tracing::debug!(key = %key, ?cause, "cache entry evicted");
            })
            .build();

        Self { cache }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let hit = self.cache.get(key).await;
        if hit.is_some() {
            tracing::debug!(key, "cache hit");
        }
        hit
    }

    pub async fn put(&self, key: String, value: V) {
        self.cache.insert(key, value).await;
    }

    /// Number of live entries after pending housekeeping has run.
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_entry_is_returned() {
        let cache = MemoCache::new(Duration::from_secs(60));
        cache.put("k".into(), 7).await;

        assert_eq!(cache.get("k").await, Some(7));
        assert_eq!(cache.get("other").await, None);
    }

    #[tokio::test]
    async fn expired_entry_is_not_returned() {
        let cache = MemoCache::new(Duration::from_millis(50));
        cache.put("k".into(), 7).await;
        assert_eq!(cache.get("k").await, Some(7));

        std::thread::sleep(Duration::from_millis(120));
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn expired_entries_are_reclaimed_without_being_read() {
        let cache = MemoCache::new(Duration::from_millis(50));
        for i in 0..100 {
            cache.put(format!("city-{i}"), i).await;
        }

        std::thread::sleep(Duration::from_millis(120));
        cache.put("fresh".into(), 1).await;

        assert_eq!(cache.get("fresh").await, Some(1));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn put_replaces_existing_value() {
        let cache = MemoCache::new(Duration::from_secs(60));
        cache.put("k".into(), 1).await;
        cache.put("k".into(), 2).await;

        assert_eq!(cache.get("k").await, Some(2));
        assert_eq!(cache.len().await, 1);
    }
}
