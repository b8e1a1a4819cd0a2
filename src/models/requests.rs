//! Request DTOs for the cache admin API
//!
//! Defines the structure of incoming HTTP request bodies. Entry values are
//! taken as raw JSON and need no DTO.

use serde::Deserialize;

/// Request body for pattern eviction and invalidation
///
/// # Fields
/// - `pattern`: Redis-style glob matched against the caller key part
#[derive(Debug, Clone, Deserialize)]
pub struct PatternRequest {
    /// Glob pattern, e.g. `user:*`
    #[serde(default)]
    pub pattern: String,
}

impl PatternRequest {
    /// Returns an error message if the pattern is blank, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.pattern.trim().is_empty() {
            return Some("Pattern cannot be empty".to_string());
        }
        None
    }
}
