//! Cache Module
//!
//! In-process cache for upstream football API responses: TTL expiry,
//! tag-based invalidation, memory-bounded eviction and periodic sweeps.

mod age;
mod codec;
mod entry;
mod handle;
mod options;
mod pattern;
mod stats;
mod store;
mod tags;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use age::InsertionOrder;
pub use codec::{Payload, COMPRESSION_THRESHOLD_BYTES};
pub use entry::{current_timestamp_ms, CacheEntry};
pub use handle::Cache;
pub use options::SetOptions;
pub use pattern::KeyPattern;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use tags::TagIndex;
