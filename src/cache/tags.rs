//! Tag Index Module
//!
//! Maps invalidation tags to the keys that carry them.

use std::collections::{HashMap, HashSet};

// == Tag Index ==
/// Reverse index from tag to keys, kept in step with the entry map.
#[derive(Debug, Default)]
pub struct TagIndex {
    by_tag: HashMap<String, HashSet<String>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key` under each of `tags`.
    pub fn insert(&mut self, key: &str, tags: &HashSet<String>) {
        for tag in tags {
            self.by_tag
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }
    }

    /// Unregisters `key` from each of `tags`, dropping tags left empty.
    pub fn remove(&mut self, key: &str, tags: &HashSet<String>) {
        for tag in tags {
            if let Some(keys) = self.by_tag.get_mut(tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.by_tag.remove(tag);
                }
            }
        }
    }

    // == Keys For Tags ==
    /// Returns every key carrying at least one of `tags`.
    pub fn keys_for<S: AsRef<str>>(&self, tags: &[S]) -> HashSet<String> {
        tags.iter()
            .filter_map(|tag| self.by_tag.get(tag.as_ref()))
            .flatten()
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.by_tag.clear();
    }

    /// Number of distinct tags currently in use.
    pub fn tag_count(&self) -> usize {
        self.by_tag.len()
    }
}
