//! Cache Statistics Module
//!
//! Tracks lookup outcomes, removals and the memory footprint of the store.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of lookups that found nothing or an expired entry
    pub misses: u64,
    /// Number of entries evicted under memory pressure
    pub evictions: u64,
    /// Number of expired entries removed (lazily or by the sweep)
    pub expired: u64,
    /// Current number of entries in the cache
    pub total_keys: usize,
    /// Approximate bytes held by all entries
    pub memory_usage: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }

    // == Memory Accounting ==
    /// Adds a newly stored entry's footprint.
    pub fn add_memory(&mut self, bytes: usize) {
        self.memory_usage += bytes;
    }

    /// Subtracts a removed entry's footprint.
    pub fn release_memory(&mut self, bytes: usize) {
        self.memory_usage = self.memory_usage.saturating_sub(bytes);
    }

    pub fn set_total_keys(&mut self, count: usize) {
        self.total_keys = count;
    }
}
