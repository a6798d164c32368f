//! API Routes
//!
//! Configures the Axum router with all cache admin endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_handler, get_handler, health_handler, invalidate_handler,
    keys_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check
/// - `GET /cache/stats` - Cache statistics
/// - `GET /cache/keys?pattern=` - List keys, optionally by glob
/// - `PUT /cache/entries` - Seed an entry
/// - `GET /cache/entries/:key` - Look up an entry
/// - `DELETE /cache/entries/:key` - Delete an entry
/// - `POST /cache/invalidate` - Remove entries by tag
/// - `DELETE /cache` - Remove everything
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/keys", get(keys_handler))
        .route("/cache/entries", put(set_handler))
        .route("/cache/entries/:key", get(get_handler).delete(delete_handler))
        .route("/cache/invalidate", post(invalidate_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
