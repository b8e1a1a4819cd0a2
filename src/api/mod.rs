//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `GET /health` - Backing store liveness
//! - `GET /stats` - Cache statistics
//! - `PUT|GET|DELETE /cache/entries/:category/:key` - Single entries
//! - `DELETE /cache/categories[/:category]` - Clear one or all categories
//! - `POST /cache/categories/:category/evict` - Pattern eviction in a category
//! - `POST /cache/categories/:category/warm` - Warm a category
//! - `GET /cache/categories/:category/size` - Key count of a category
//! - `POST /cache/invalidate` - Pattern invalidation across categories

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
