//! Shared Cache Handle
//!
//! Cloneable, lock-guarded access to a [`CacheStore`] plus ownership of
//! its background sweep. Construct one per process and pass clones to
//! every component that needs caching.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{CacheStats, CacheStore, SetOptions};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweep_task;

// == Cache ==
/// Thread-safe cache handle.
///
/// Every mutation runs under the store's write lock, so writes, evictions
/// and the sweep never interleave. `has`, `keys` and `stats` only take the
/// read lock.
#[derive(Debug, Clone)]
pub struct Cache {
    store: Arc<RwLock<CacheStore>>,
    sweeper: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Cache {
    // == Constructors ==
    /// Creates a cache without a background sweep.
    ///
    /// Expired entries are still never returned; they are only reclaimed
    /// lazily on read.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(config))),
            sweeper: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a cache and spawns its periodic sweep.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: CacheConfig) -> Self {
        let interval = Duration::from_millis(config.cleanup_interval_millis);
        let store = Arc::new(RwLock::new(CacheStore::new(config)));
        let handle = spawn_sweep_task(store.clone(), interval);

        Self {
            store,
            sweeper: Arc::new(Mutex::new(Some(handle))),
        }
    }

    // == Get ==
    /// Returns the cached value for `key`, or `None` on a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.store.write().await.get(key)
    }

    // == Set ==
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        options: SetOptions,
    ) -> Result<()> {
        self.store.write().await.set(key, value, options)
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    pub async fn has(&self, key: &str) -> bool {
        self.store.read().await.has(key)
    }

    pub async fn clear_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> usize {
        self.store.write().await.clear_by_tags(tags)
    }

    pub async fn clear(&self) -> usize {
        self.store.write().await.clear()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Lists unexpired keys, optionally filtered by a `*` glob.
    pub async fn keys(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        self.store.read().await.keys(pattern)
    }

    pub async fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        self.store.read().await.ttl_remaining_ms(key)
    }

    // == Get Or Set ==
    /// Returns the cached value, or computes, stores and returns it.
    ///
    /// The lock is released while `compute` runs. If `compute` fails (or
    /// the returned future is dropped before finishing) nothing is stored
    /// and the error reaches the caller unchanged. Concurrent misses on the
    /// same key may each run `compute`; the last write wins.
    pub async fn get_or_set<T, F, Fut, E>(
        &self,
        key: &str,
        compute: F,
        options: SetOptions,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: From<CacheError>,
    {
        if let Some(value) = self.get::<T>(key).await? {
            return Ok(value);
        }

        let value = compute().await?;
        self.set(key, &value, options).await?;
        Ok(value)
    }

    // == Shutdown ==
    /// Stops the sweep and drops every entry. Safe to call repeatedly.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.sweeper.lock().await.take() {
            handle.abort();
            info!("Cache sweep task stopped");
        }
        self.clear().await;
    }

    /// True while the background sweep is running.
    pub async fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
