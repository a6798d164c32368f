//! Request DTOs for the cache admin API
//!
//! Defines the structure of incoming HTTP request bodies and queries.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::SetOptions;

/// Request body for seeding an entry (PUT /cache/entries)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
/// - `tags`: Optional invalidation tags
/// - `compress`: Force compressed storage
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub ttl: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub compress: bool,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.tags.iter().any(String::is_empty) {
            return Some("Tags cannot be empty".to_string());
        }
        None
    }

    /// Splits the request into key, value and write options.
    pub fn into_parts(self) -> (String, Value, SetOptions) {
        let options = SetOptions {
            ttl_seconds: self.ttl,
            tags: self.tags,
            force_compress: self.compress,
        };
        (self.key, self.value, options)
    }
}

/// Request body for tag invalidation (POST /cache/invalidate)
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    pub tags: Vec<String>,
}

impl InvalidateRequest {
    pub fn validate(&self) -> Option<String> {
        if self.tags.is_empty() {
            return Some("At least one tag is required".to_string());
        }
        None
    }
}

/// Query string for key listing (GET /cache/keys?pattern=)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeysQuery {
    #[serde(default)]
    pub pattern: Option<String>,
}
