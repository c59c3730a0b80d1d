//! Lookup and write counters for a splay cache
//!
//! Counters are atomics so they can be bumped through `&self` while the tree
//! itself is mutably borrowed by the lookup that produced the event.

use std::sync::atomic::{AtomicU64, Ordering};

/// Running totals kept by [`SplayCache`](crate::SplayCache)
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    replacements: AtomicU64,
}

impl CacheStats {
    /// All counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// A lookup found its key and splayed it to the root
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// A lookup fell off a leaf
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// A write allocated a new node
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// A write overwrote the value of an existing key
    pub fn record_replacement(&self) {
        self.replacements.fetch_add(1, Ordering::Relaxed);
    }

    /// Lookups that found their key
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that found nothing
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Nodes allocated by writes
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Writes that updated an existing key in place.
    ///
    /// Always zero under [`DuplicatePolicy::Shadow`](crate::DuplicatePolicy::Shadow),
    /// where every write allocates.
    pub fn replacements(&self) -> u64 {
        self.replacements.load(Ordering::Relaxed)
    }

    /// Fraction of lookups that hit, or 0.0 before the first lookup
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits() + self.misses();
        match lookups {
            0 => 0.0,
            n => self.hits() as f64 / n as f64,
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in [&self.hits, &self.misses, &self.inserts, &self.replacements] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
