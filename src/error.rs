//! Error types for the cache facade
//!
//! Provides unified error handling using thiserror. Internal components return
//! these errors; the facade turns them into false/zero results at its surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the caching subsystem.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Empty or blank category, key or pattern
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Category is not part of the registry
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Key not present in the backing store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Transport or protocol fault reported by the backing store
    #[error("Backing store unavailable: {0}")]
    BackingStore(String),

    /// Value could not be encoded or decoded
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::BackingStore(err.to_string())
    }
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
            CacheError::InvalidArgument(_) | CacheError::Serialization(_) => {
                StatusCode::BAD_REQUEST
            }
            CacheError::UnknownCategory(_) | CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::BackingStore(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching subsystem.
pub type Result<T> = std::result::Result<T, CacheError>;
