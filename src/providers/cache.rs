use std::collections::{hash_map::Entry, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Shared key/value cache whose entries expire `ttl` after insertion.
///
/// Cloning is cheap; clones share the same entries. Injected into a client rather than
/// living in process-wide state.
#[derive(Debug, Clone)]
pub struct ResponseCache<V> {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, CacheEntry<V>>>>,
}

#[derive(Debug)]
struct CacheEntry<V> {
    stored_at: Instant,
    value: V,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns a fresh value, evicting it instead when it has expired.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;
        match entries.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                if entry.get().stored_at.elapsed() < self.ttl {
                    Some(entry.get().value.clone())
                } else {
                    entry.remove();
                    None
                }
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Stores a value and drops every entry that has already expired.
    pub async fn insert(&self, key: String, value: V) {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("a".to_string(), 1).await;
        assert_eq!(cache.get("a").await, Some(1));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("a").await, Some(1));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("a").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_sweeps_expired_entries() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        for i in 0..81 {
            cache.insert(format!("first-{i}"), i).await;
        }
        assert_eq!(cache.len().await, 81);

        tokio::time::advance(Duration::from_secs(3600)).await;
        for i in 0..81 {
            cache.insert(format!("second-{i}"), i).await;
        }
        assert_eq!(cache.len().await, 81);
        assert_eq!(cache.get("first-0").await, None);
        assert_eq!(cache.get("second-0").await, Some(0));
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let clone = cache.clone();
        clone.insert("k".to_string(), "v".to_string()).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("missing").await, None);
    }
}
