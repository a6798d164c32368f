//! Football Cache - in-process response cache for a football statistics API
//!
//! Provides TTL expiration, tag-based invalidation, memory-bounded
//! eviction and a small admin API over the cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod keys;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheStore, SetOptions};
pub use config::{CacheConfig, Config};
pub use error::CacheError;
pub use tasks::spawn_sweep_task;
