//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiration,
//! tag-indexed invalidation and memory-bounded eviction.

use std::collections::{HashMap, HashSet};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::cache::{
    CacheEntry, CacheStats, InsertionOrder, KeyPattern, Payload, SetOptions, TagIndex,
};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Main cache storage with TTL expiry, tags and eviction under memory pressure.
///
/// The store is synchronous and not internally locked; share it through
/// [`crate::cache::Cache`], which wraps it in an `RwLock`.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Write-time order for eviction
    ages: InsertionOrder,
    /// Tag -> keys reverse index
    tags: TagIndex,
    /// Performance statistics
    stats: CacheStats,
    config: CacheConfig,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            ages: InsertionOrder::new(),
            tags: TagIndex::new(),
            stats: CacheStats::new(),
            config,
        }
    }

    // == Set ==
    /// Stores a value under `key`.
    ///
    /// The value is serialized first; if that fails nothing is written.
    /// An existing entry is replaced and its TTL restarts. While the
    /// store is over its memory budget, the oldest-written entries are
    /// evicted before the new entry goes in.
    ///
    /// # Arguments
    /// * `key` - Non-empty key
    /// * `value` - Any serde-serializable value
    /// * `options` - TTL, tags and compression overrides
    pub fn set<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
        options: SetOptions,
    ) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidRequest(
                "Key cannot be empty".to_string(),
            ));
        }

        let (payload, payload_bytes) = Payload::encode(value, options.force_compress)?;

        // Overwrite: release the old entry before checking the budget
        self.remove_entry(key);
        self.evict_for_memory();

        let ttl_seconds = options.ttl_seconds.unwrap_or(self.config.default_ttl_seconds);
        let tags: HashSet<String> = options.tags.into_iter().collect();
        let entry = CacheEntry::new(
            key,
            payload,
            payload_bytes,
            ttl_seconds.saturating_mul(1000),
            tags,
        );

        self.stats.add_memory(entry.size_bytes);
        self.ages.record(key, entry.stored_at);
        self.tags.insert(key, &entry.tags);
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_keys(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Retrieves and decodes a value by key.
    ///
    /// Returns `Ok(None)` on a miss. Expired entries are removed and
    /// counted as misses. An error is returned only when the stored value
    /// cannot be decoded as `T`.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return Ok(None);
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expired(1);
            self.stats.record_miss();
            return Ok(None);
        }

        self.stats.record_hit();
        self.entries
            .get(key)
            .map(|entry| entry.payload.decode())
            .transpose()
    }

    // == Delete ==
    /// Removes an entry by key, returning whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Has ==
    /// True if `key` holds an unexpired entry. Does not touch statistics.
    pub fn has(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Clear By Tags ==
    /// Removes every entry sharing at least one tag with `tags`.
    ///
    /// Returns the number of entries removed.
    pub fn clear_by_tags<S: AsRef<str>>(&mut self, tags: &[S]) -> usize {
        let keys = self.tags.keys_for(tags);
        let removed = keys
            .iter()
            .filter(|key| self.remove_entry(key).is_some())
            .count();

        if removed > 0 {
            let names: Vec<&str> = tags.iter().map(AsRef::as_ref).collect();
            info!(tags = ?names, removed, "Invalidated cache entries by tag");
        }
        removed
    }

    // == Clear ==
    /// Removes all entries, returning how many there were.
    /// Hit/miss counters are kept.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.ages.clear();
        self.tags.clear();
        let used = self.stats.memory_usage;
        self.stats.release_memory(used);
        self.stats.set_total_keys(0);
        debug!(removed, "Cache cleared");
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_keys(self.entries.len());
        stats
    }

    // == Keys ==
    /// Lists unexpired keys, sorted, optionally filtered by a glob pattern.
    pub fn keys(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        let pattern = pattern.map(KeyPattern::new).transpose()?;

        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .filter(|(key, _)| pattern.as_ref().map_or(true, |p| p.matches(key)))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    /// Remaining lifetime of an unexpired entry.
    pub fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(CacheEntry::ttl_remaining_ms)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expired(expired_keys.len());
        expired_keys.len()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evicts oldest-written entries until usage is within budget.
    fn evict_for_memory(&mut self) {
        while self.stats.memory_usage > self.config.max_memory_bytes {
            let Some(key) = self.ages.pop_oldest() else {
                break;
            };
            if let Some(entry) = self.remove_entry(&key) {
                self.stats.record_eviction();
                debug!(
                    key = %key,
                    size_bytes = entry.size_bytes,
                    memory_usage = self.stats.memory_usage,
                    "Evicted cache entry under memory pressure"
                );
            }
        }
    }

    /// Removes an entry and keeps indexes and accounting in step.
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.ages.remove(key);
        self.tags.remove(key, &entry.tags);
        self.stats.release_memory(entry.size_bytes);
        self.stats.set_total_keys(self.entries.len());
        Some(entry)
    }
}
