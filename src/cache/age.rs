//! Insertion Age Module
//!
//! Orders keys by write time for memory-pressure eviction.

use std::collections::{BTreeMap, HashMap};

// == Insertion Order ==
/// Tracks keys ordered by the timestamp they were last written.
///
/// This is least-recently-inserted, not least-recently-used: reads never
/// move a key. Keys written in the same millisecond are ordered by a
/// sequence number so the earlier write is evicted first.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    /// (stored_at, sequence) -> key, oldest first
    order: BTreeMap<(u64, u64), String>,
    /// key -> its slot in `order`
    positions: HashMap<String, (u64, u64)>,
    next_seq: u64,
}

impl InsertionOrder {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Marks `key` as written at `stored_at`, replacing any previous slot.
    pub fn record(&mut self, key: &str, stored_at: u64) {
        self.remove(key);
        let slot = (stored_at, self.next_seq);
        self.next_seq += 1;
        self.order.insert(slot, key.to_string());
        self.positions.insert(key.to_string(), slot);
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        if let Some(slot) = self.positions.remove(key) {
            self.order.remove(&slot);
        }
    }

    // == Pop Oldest ==
    /// Removes and returns the key with the oldest write time.
    pub fn pop_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.positions.remove(&key);
        Some(key)
    }

    /// Returns the oldest key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.values().next().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.positions.clear();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
