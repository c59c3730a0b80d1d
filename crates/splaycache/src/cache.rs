//! SplayCache: instrumented memoization cache over a splay tree

use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::stats::CacheStats;
use crate::tree::SplayTree;

/// Memoization cache whose shape adapts to the access pattern
///
/// Every hit and every insert moves the touched entry to the root of the
/// underlying [`SplayTree`], so recently used keys are the cheapest to find.
/// Lookups and writes are counted in [`CacheStats`].
pub struct SplayCache<K, V> {
    /// Tree holding the cached entries
    tree: SplayTree<K, V>,

    /// Cache statistics
    stats: CacheStats,

    /// Configuration the cache was built with
    config: CacheConfig,
}

impl<K, V> SplayCache<K, V>
where
    K: Ord,
{
    /// Create an empty cache with the default configuration
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create an empty cache with the given configuration
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            tree: SplayTree::with_policy(config.duplicate_policy),
            stats: CacheStats::new(),
            config,
        }
    }

    /// Get a cached value, promoting it to the root on a hit
    ///
    /// # Arguments
    /// * `key` - Key to look up
    ///
    /// # Returns
    /// * `Option<&V>` - The cached value, or `None` when not cached
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.tree.find(key) {
            Some(value) => {
                self.stats.record_hit();
                trace!("splay cache hit");
                Some(value)
            }
            None => {
                self.stats.record_miss();
                trace!("splay cache miss");
                None
            }
        }
    }

    /// Store a value and promote it to the root
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `value` - Value to cache
    ///
    /// # Returns
    /// * `Option<V>` - The overwritten value, if the key was replaced in place
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let old = self.tree.insert(key, value);
        if old.is_some() {
            self.stats.record_replacement();
        } else {
            self.stats.record_insert();
        }
        trace!(len = self.tree.len(), replaced = old.is_some(), "splay cache insert");
        old
    }

    /// Get a cached value, computing and caching it on a miss
    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &V
    where
        F: FnOnce() -> V,
    {
        let (value, found) = self.tree.find_or_insert_with(key, f);
        if found {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
            self.stats.record_insert();
        }
        trace!(found, "splay cache get_or_insert");
        value
    }
}

impl<K, V> SplayCache<K, V> {
    /// Drop every cached entry and reset statistics
    pub fn clear(&mut self) {
        debug!(len = self.tree.len(), "clearing splay cache");
        self.tree.clear();
        self.stats.reset();
    }

    /// Get the number of cached entries
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get the cache configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Read-only view of the underlying tree
    pub fn tree(&self) -> &SplayTree<K, V> {
        &self.tree
    }
}

impl<K: Ord, V> Default for SplayCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    #[test]
    fn test_cache_basic() {
        let mut cache = SplayCache::new();

        cache.insert(7, "seven");

        assert_eq!(cache.get(&7), Some(&"seven"));
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 0);
        assert_eq!(cache.stats().inserts(), 1);
    }

    #[test]
    fn test_cache_miss() {
        let mut cache: SplayCache<u64, u64> = SplayCache::new();

        assert_eq!(cache.get(&42), None);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().hit_ratio(), 0.0);
    }

    #[test]
    fn test_cache_promotes_hits() {
        let mut cache = SplayCache::new();
        for key in [5, 3, 8, 1, 4] {
            cache.insert(key, key);
        }
        assert_eq!(cache.tree().root_key(), Some(&4));

        cache.get(&8);
        assert_eq!(cache.tree().root_key(), Some(&8));

        cache.get(&100);
        assert_eq!(cache.tree().root_key(), Some(&8));
        assert_eq!(cache.stats().hit_ratio(), 0.5);
    }

    #[test]
    fn test_cache_replace() {
        let mut cache = SplayCache::new();

        assert_eq!(cache.insert(1, "a"), None);
        assert_eq!(cache.insert(1, "b"), Some("a"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&1), Some(&"b"));
        assert_eq!(cache.stats().inserts(), 1);
        assert_eq!(cache.stats().replacements(), 1);
    }

    #[test]
    fn test_cache_shadow() {
        let config = CacheConfig::new().duplicate_policy(DuplicatePolicy::Shadow);
        let mut cache = SplayCache::with_config(config);

        assert_eq!(cache.insert(1, "a"), None);
        assert_eq!(cache.insert(1, "b"), None);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), Some(&"b"));
        assert_eq!(cache.stats().inserts(), 2);
        assert_eq!(cache.config().duplicate_policy, DuplicatePolicy::Shadow);
    }

    #[test]
    fn test_cache_get_or_insert_with() {
        let mut cache = SplayCache::new();

        assert_eq!(*cache.get_or_insert_with("k", || 1), 1);
        assert_eq!(*cache.get_or_insert_with("k", || 2), 1);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().inserts(), 1);
    }

    /// Counts events carrying a `found` field
    struct FoundEvents(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for FoundEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if event.metadata().fields().field("found").is_some() {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn test_cache_get_or_insert_with_traces() {
        let events = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(FoundEvents(events.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let mut cache = SplayCache::new();
            cache.get_or_insert_with(1, || "one");
            cache.get_or_insert_with(1, || "uno");
            cache.get(&1);
        });

        assert_eq!(events.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = SplayCache::new();

        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.get(&1);
        assert_eq!(cache.len(), 2);

        cache.clear();

        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().hits(), 0);
        assert_eq!(cache.get(&1), None);
    }
}
