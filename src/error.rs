//! Error types for the football statistics cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its admin API.
///
/// A cache miss is not an error: lookups return `None` / `false`.
/// `NotFound` only surfaces through the admin API.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Value could not be converted to or from its stored representation
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Gzip encoding or decoding of a stored payload failed
    #[error("Compression failed: {0}")]
    Compression(String),

    /// Invalid request data (empty key, malformed admin body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Key not present (admin API only)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Serialization(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::Compression(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
