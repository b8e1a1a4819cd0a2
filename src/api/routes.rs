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
    clear_all_handler, clear_category_handler, evict_entry_handler, evict_pattern_handler,
    get_entry_handler, health_handler, invalidate_handler, put_entry_handler,
    reset_stats_handler, size_handler, stats_handler, warm_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler).delete(reset_stats_handler))
        .route(
            "/cache/entries/:category/:key",
            put(put_entry_handler)
                .get(get_entry_handler)
                .delete(evict_entry_handler),
        )
        .route("/cache/categories", delete(clear_all_handler))
        .route("/cache/categories/:category", delete(clear_category_handler))
        .route(
            "/cache/categories/:category/evict",
            post(evict_pattern_handler),
        )
        .route("/cache/categories/:category/warm", post(warm_handler))
        .route("/cache/categories/:category/size", get(size_handler))
        .route("/cache/invalidate", post(invalidate_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
