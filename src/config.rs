//! Configuration Module
//!
//! Handles loading and managing cache and server configuration from
//! environment variables. The cache itself never reads the environment;
//! the binary builds a `CacheConfig` here and hands it over.

use std::env;
use std::str::FromStr;

/// Cache parameters, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL in seconds for entries written without an explicit TTL
    pub default_ttl_seconds: u64,
    /// Memory budget that triggers eviction on write
    pub max_memory_bytes: usize,
    /// Interval between background sweeps of expired entries
    pub cleanup_interval_millis: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: 300,
            max_memory_bytes: 100 * 1024 * 1024, // 100 MiB
            cleanup_interval_millis: 60_000,
        }
    }
}

/// Process configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache parameters
    pub cache: CacheConfig,
    /// HTTP port of the admin API
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `CACHE_MAX_MEMORY_BYTES` - Memory budget in bytes (default: 100 MiB)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep interval in milliseconds (default: 60000)
    /// - `SERVER_PORT` - Admin API port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = CacheConfig::default();
        Self {
            cache: CacheConfig {
                default_ttl_seconds: env_or("CACHE_DEFAULT_TTL", defaults.default_ttl_seconds),
                max_memory_bytes: env_or("CACHE_MAX_MEMORY_BYTES", defaults.max_memory_bytes),
                cleanup_interval_millis: env_or(
                    "CACHE_CLEANUP_INTERVAL_MS",
                    defaults.cleanup_interval_millis,
                ),
            },
            server_port: env_or("SERVER_PORT", 3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
