//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::Cache;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{
    GetResponse, HealthResponse, InvalidateRequest, KeyResponse, KeysQuery, KeysResponse,
    RemovedResponse, SetRequest, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds a clone of the process-wide cache handle.
#[derive(Clone)]
pub struct AppState {
    pub cache: Cache,
}

impl AppState {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Creates state around a fresh cache without a background sweep.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Cache::new(config.clone()))
    }
}

/// Handler for PUT /cache/entries
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<KeyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let (key, value, options) = req.into_parts();
    state.cache.set(&key, &value, options).await?;

    Ok(Json(KeyResponse::stored(key)))
}

/// Handler for GET /cache/entries/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .cache
        .get::<Value>(&key)
        .await?
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;
    let ttl_remaining_ms = state.cache.ttl_remaining_ms(&key).await;

    Ok(Json(GetResponse::new(key, value, ttl_remaining_ms)))
}

/// Handler for DELETE /cache/entries/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KeyResponse>> {
    if state.cache.delete(&key).await {
        Ok(Json(KeyResponse::deleted(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for GET /cache/keys?pattern=
pub async fn keys_handler(
    State(state): State<AppState>,
    Query(query): Query<KeysQuery>,
) -> Result<Json<KeysResponse>> {
    let keys = state.cache.keys(query.pattern.as_deref()).await?;
    Ok(Json(KeysResponse::new(keys)))
}

/// Handler for POST /cache/invalidate
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<RemovedResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let removed = state.cache.clear_by_tags(&req.tags).await;
    Ok(Json(RemovedResponse { removed }))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<RemovedResponse> {
    let removed = state.cache.clear().await;
    Json(RemovedResponse { removed })
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
