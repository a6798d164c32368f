//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::cache::codec::Payload;

/// Fixed per-entry overhead counted by memory accounting
/// (timestamp, TTL and compression flag).
const ENTRY_METADATA_BYTES: usize = 17;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub payload: Payload,
    /// Write timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Lifetime in milliseconds
    pub ttl_ms: u64,
    /// Labels used for bulk invalidation
    pub tags: HashSet<String>,
    /// Approximate footprint in bytes, fixed at insertion
    pub size_bytes: usize,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    ///
    /// # Arguments
    /// * `key` - Key the entry is stored under (counted in its size)
    /// * `payload` - Encoded value
    /// * `payload_bytes` - Encoded size of the payload
    /// * `ttl_ms` - Lifetime in milliseconds
    /// * `tags` - Invalidation tags
    pub fn new(
        key: &str,
        payload: Payload,
        payload_bytes: usize,
        ttl_ms: u64,
        tags: HashSet<String>,
    ) -> Self {
        let tag_bytes: usize = tags.iter().map(String::len).sum();

        Self {
            payload,
            stored_at: current_timestamp_ms(),
            ttl_ms,
            tags,
            size_bytes: key.len() + payload_bytes + tag_bytes + ENTRY_METADATA_BYTES,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once strictly more than `ttl_ms` milliseconds
    /// have passed since it was stored.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiry check against an explicit clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.stored_at) > self.ttl_ms
    }

    /// Returns remaining lifetime in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        let deadline = self.stored_at.saturating_add(self.ttl_ms);
        deadline.saturating_sub(current_timestamp_ms())
    }

    pub fn is_compressed(&self) -> bool {
        self.payload.is_compressed()
    }

    /// True if the entry carries any of the given tags.
    pub fn has_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag.as_ref()))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
