//! Configuration Module
//!
//! Handles loading the cache configuration from environment variables.

use std::collections::BTreeMap;
use std::env;

use crate::cache::category::{default_ttl_secs, KNOWN_CATEGORIES};

/// Default fixed prefix of every namespaced key.
pub const DEFAULT_KEY_PREFIX: &str = "cache";

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed prefix of every key written to the backing store
    pub key_prefix: String,
    /// Redis connection URL; an in-memory store is used when absent
    pub redis_url: Option<String>,
    /// HTTP server port for the admin API
    pub server_port: u16,
    /// Interval in seconds between in-memory expiry sweeps
    pub cleanup_interval: u64,
    /// Interval in seconds between background health probes
    pub health_check_interval: u64,
    /// Whether allow-listed categories are warmed at startup
    pub warm_on_startup: bool,
    /// TTL in seconds per category name
    pub category_ttls: BTreeMap<String, u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_KEY_PREFIX` - Key prefix (default: "cache")
    /// - `REDIS_URL` - Redis URL (default: unset, in-memory store)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    /// - `HEALTH_CHECK_INTERVAL` - Health probe frequency in seconds (default: 30)
    /// - `WARM_ON_STARTUP` - Warm allow-listed categories at boot (default: true)
    /// - `CACHE_TTL_<CATEGORY>` - Per-category TTL override in seconds,
    ///   e.g. `CACHE_TTL_SESSION_CACHE`. Zero is ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let category_ttls = defaults
            .category_ttls
            .into_iter()
            .map(|(name, ttl)| {
                let ttl = parse_env::<u64>(&ttl_env_var(&name))
                    .filter(|&secs| secs > 0)
                    .unwrap_or(ttl);
                (name, ttl)
            })
            .collect();

        Self {
            key_prefix: env::var("CACHE_KEY_PREFIX")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.key_prefix),
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            server_port: parse_env("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_env("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            health_check_interval: parse_env("HEALTH_CHECK_INTERVAL")
                .unwrap_or(defaults.health_check_interval),
            warm_on_startup: parse_env("WARM_ON_STARTUP").unwrap_or(defaults.warm_on_startup),
            category_ttls,
        }
    }

    /// TTL in seconds configured for `category`, if it is registered.
    pub fn ttl_for(&self, category: &str) -> Option<u64> {
        self.category_ttls.get(category).copied()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            redis_url: None,
            server_port: 3000,
            cleanup_interval: 1,
            health_check_interval: 30,
            warm_on_startup: true,
            category_ttls: KNOWN_CATEGORIES
                .iter()
                .map(|name| (name.to_string(), default_ttl_secs(name)))
                .collect(),
        }
    }
}

/// Name of the environment variable overriding a category TTL.
fn ttl_env_var(category: &str) -> String {
    format!(
        "CACHE_TTL_{}",
        category.to_ascii_uppercase().replace('-', "_")
    )
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
