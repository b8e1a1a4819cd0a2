//! Response DTOs for the cache admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

/// Response body for GET /cache/entries/:category/:key
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub category: String,
    pub key: String,
    pub value: Value,
}

impl EntryResponse {
    pub fn new(category: impl Into<String>, key: impl Into<String>, value: Value) -> Self {
        Self {
            category: category.into(),
            key: key.into(),
            value,
        }
    }
}

/// Response body for PUT /cache/entries/:category/:key
#[derive(Debug, Clone, Serialize)]
pub struct CacheResponse {
    /// Whether the value was written
    pub stored: bool,
    pub category: String,
    pub key: String,
}

impl CacheResponse {
    pub fn new(stored: bool, category: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            stored,
            category: category.into(),
            key: key.into(),
        }
    }
}

/// Response body for single-key and pattern eviction
#[derive(Debug, Clone, Serialize)]
pub struct EvictResponse {
    /// Number of keys removed
    pub removed: u64,
}

/// Response body for category clears
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Cleared category, or None for all categories
    pub category: Option<String>,
    pub removed: u64,
}

/// Response body for POST /cache/categories/:category/warm
#[derive(Debug, Clone, Serialize)]
pub struct WarmResponse {
    pub category: String,
    pub loaded: u64,
}

/// Response body for GET /cache/categories/:category/size
#[derive(Debug, Clone, Serialize)]
pub struct SizeResponse {
    pub category: String,
    pub size: u64,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn from_status(healthy: bool) -> Self {
        Self {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_response_serialize() {
        let resp = EntryResponse::new("statistics", "daily", json!({ "count": 3 }));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["category"], "statistics");
        assert_eq!(json["value"]["count"], 3);
    }

    #[test]
    fn test_cache_response_serialize() {
        let resp = CacheResponse::new(true, "session-cache", "user:1");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"stored\":true"));
        assert!(json.contains("user:1"));
    }

    #[test]
    fn test_clear_response_all_categories() {
        let resp = ClearResponse {
            category: None,
            removed: 4,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["category"].is_null());
        assert_eq!(json["removed"], 4);
    }

    #[test]
    fn test_health_response() {
        let up = HealthResponse::from_status(true);
        assert!(up.is_healthy());
        let json = serde_json::to_string(&up).unwrap();
        assert!(json.contains("timestamp"));

        assert_eq!(HealthResponse::from_status(false).status, "unhealthy");
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
