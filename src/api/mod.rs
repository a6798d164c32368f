//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /cache/stats` - Cache statistics
//! - `GET /cache/keys` - Key listing
//! - `PUT|GET|DELETE /cache/entries[/:key]` - Single entries
//! - `POST /cache/invalidate` - Tag invalidation
//! - `DELETE /cache` - Clear everything

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
