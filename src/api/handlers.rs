//! API Handlers
//!
//! HTTP request handlers mapping admin endpoints onto the cache facade.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::cache::{is_blank, CacheFacade};
use crate::error::{CacheError, Result};
use crate::models::{
    CacheResponse, ClearResponse, EntryResponse, EvictResponse, HealthResponse, PatternRequest,
    SizeResponse, WarmResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache facade
    pub cache: Arc<CacheFacade>,
}

impl AppState {
    pub fn new(cache: CacheFacade) -> Self {
        Self::from_shared(Arc::new(cache))
    }

    pub fn from_shared(cache: Arc<CacheFacade>) -> Self {
        Self { cache }
    }

    fn require_category(&self, category: &str) -> Result<()> {
        if self.cache.registry().contains(category) {
            Ok(())
        } else {
            Err(CacheError::UnknownCategory(category.to_string()))
        }
    }
}

/// Handler for PUT /cache/entries/:category/:key
pub async fn put_entry_handler(
    State(state): State<AppState>,
    Path((category, key)): Path<(String, String)>,
    Json(value): Json<Value>,
) -> Result<Json<CacheResponse>> {
    state.require_category(&category)?;
    if is_blank(&key) {
        return Err(CacheError::InvalidArgument(
            "Key cannot be blank".to_string(),
        ));
    }
    if value.is_null() {
        return Err(CacheError::InvalidArgument(
            "Value cannot be null".to_string(),
        ));
    }

    if !state.cache.cache(&category, &key, &value).await {
        return Err(CacheError::BackingStore(format!(
            "Failed to cache '{}' in '{}'",
            key, category
        )));
    }

    Ok(Json(CacheResponse::new(true, category, key)))
}

/// Handler for GET /cache/entries/:category/:key
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path((category, key)): Path<(String, String)>,
) -> Result<Json<EntryResponse>> {
    match state.cache.get::<Value>(&category, &key).await {
        Some(value) => Ok(Json(EntryResponse::new(category, key, value))),
        None => Err(CacheError::NotFound(format!("{}:{}", category, key))),
    }
}

/// Handler for DELETE /cache/entries/:category/:key
pub async fn evict_entry_handler(
    State(state): State<AppState>,
    Path((category, key)): Path<(String, String)>,
) -> Json<EvictResponse> {
    let removed = state.cache.evict(&category, &key).await;
    Json(EvictResponse { removed })
}

/// Handler for POST /cache/categories/:category/evict
pub async fn evict_pattern_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(req): Json<PatternRequest>,
) -> Result<Json<EvictResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }
    let removed = state.cache.evict_pattern(&category, &req.pattern).await;
    Ok(Json(EvictResponse { removed }))
}

/// Handler for DELETE /cache/categories/:category
pub async fn clear_category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<ClearResponse> {
    let removed = state.cache.clear(Some(&category)).await;
    Json(ClearResponse {
        category: Some(category),
        removed,
    })
}

/// Handler for DELETE /cache/categories
pub async fn clear_all_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.clear(None).await;
    Json(ClearResponse {
        category: None,
        removed,
    })
}

/// Handler for POST /cache/invalidate
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<PatternRequest>,
) -> Result<Json<EvictResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }
    let removed = state.cache.invalidate_pattern(&req.pattern).await;
    Ok(Json(EvictResponse { removed }))
}

/// Handler for POST /cache/categories/:category/warm
pub async fn warm_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<WarmResponse> {
    let loaded = state.cache.warm_cache(Some(&category)).await;
    Json(WarmResponse { category, loaded })
}

/// Handler for GET /cache/categories/:category/size
pub async fn size_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<SizeResponse>> {
    state.require_category(&category)?;
    let size = state.cache.cache_size(&category).await;
    Ok(Json(SizeResponse { category, size }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<BTreeMap<String, Value>> {
    Json(state.cache.get_stats().await)
}

/// Handler for DELETE /stats
pub async fn reset_stats_handler(State(state): State<AppState>) -> StatusCode {
    state.cache.reset_stats();
    StatusCode::NO_CONTENT
}

/// Handler for GET /health
///
/// Responds 503 when the backing store does not answer.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let healthy = state.cache.is_healthy().await;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(HealthResponse::from_status(healthy)))
}
