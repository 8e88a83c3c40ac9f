//! In-memory memoization cache
//!
//! Process-lifetime, unbounded, no TTL. Entries are only ever inserted
//! whole, so a reader never observes a partially written value. Two
//! requests racing on the same key may both compute it; the values are
//! idempotent so the later insert simply overwrites an equal entry.

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

/// Concurrent memo cache backed by DashMap
pub struct MemoCache<K, V>
where
    K: Eq + Hash,
{
    cache: DashMap<K, V>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cached entries
    pub entry_count: u64,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.cache.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: K, value: V) {
        self.cache.insert(key, value);
    }

    /// Drop every entry and reset the counters
    pub fn clear(&self) {
        self.cache.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.cache.len() as u64,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<K, V> Default for MemoCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_get_insert_clear() {
        let cache: MemoCache<String, f64> = MemoCache::new();

        // Should be empty initially
        assert!(cache.get("word").is_none());

        cache.insert("word".to_string(), 0.2);
        assert_eq!(cache.get("word"), Some(0.2));
        assert_eq!(cache.len(), 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entry_count, 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_caches_absent_values() {
        let cache: MemoCache<i64, Option<String>> = MemoCache::new();
        cache.insert(404, None);

        // A cached "absent" is still a hit
        assert_eq!(cache.get(&404), Some(None));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_concurrent_inserts() {
        let cache: Arc<MemoCache<u32, u32>> = Arc::new(MemoCache::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        cache.insert(i, i * 2);
                        if let Some(v) = cache.get(&((i + t) % 100)) {
                            assert_eq!(v, ((i + t) % 100) * 2);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 100);
    }
}
