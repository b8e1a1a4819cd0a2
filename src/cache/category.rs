//! Category Registry Module
//!
//! The fixed set of cache categories and the TTL each one is written with.

use std::time::Duration;

use crate::config::Config;

// == Category Names ==
pub const SESSION_CACHE: &str = "session-cache";
pub const REFERENCE_DATA: &str = "reference-data";
pub const QUERY_RESULTS: &str = "query-results";
pub const STATISTICS: &str = "statistics";
pub const USER_PROFILES: &str = "user-profiles";
pub const ACCOUNT_DATA: &str = "account-data";
pub const TRANSACTION_DATA: &str = "transaction-data";

/// Every category the cache knows about, in clearing order.
pub const KNOWN_CATEGORIES: [&str; 7] = [
    SESSION_CACHE,
    REFERENCE_DATA,
    QUERY_RESULTS,
    STATISTICS,
    USER_PROFILES,
    ACCOUNT_DATA,
    TRANSACTION_DATA,
];

/// Built-in TTL in seconds for a category name.
pub fn default_ttl_secs(category: &str) -> u64 {
    match category {
        SESSION_CACHE => 1800,
        REFERENCE_DATA => 86_400,
        QUERY_RESULTS => 600,
        STATISTICS => 300,
        USER_PROFILES => 3600,
        ACCOUNT_DATA => 900,
        TRANSACTION_DATA => 300,
        _ => 300,
    }
}

// == Category ==
/// A registered category with its resolved TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub ttl: Duration,
}

// == Category Registry ==
/// Registry of known categories, resolved once at process start.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Builds the registry with TTLs taken from the configuration.
    ///
    /// A configured TTL of zero falls back to the built-in default.
    pub fn from_config(config: &Config) -> Self {
        let categories = KNOWN_CATEGORIES
            .iter()
            .map(|&name| Category {
                name,
                ttl: Duration::from_secs(
                    config
                        .ttl_for(name)
                        .filter(|&secs| secs > 0)
                        .unwrap_or_else(|| default_ttl_secs(name)),
                ),
            })
            .collect();

        Self { categories }
    }

    /// Looks up a category by name. Unknown names yield `None`.
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// TTL for `name`, if registered.
    pub fn ttl(&self, name: &str) -> Option<Duration> {
        self.get(name).map(|c| c.ttl)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|c| c.name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
