//! Cache Module
//!
//! Category-scoped caching over a backing store: key namespacing, eviction,
//! warmup, statistics and health, composed by [`CacheFacade`].

pub mod category;
mod eviction;
mod facade;
mod health;
mod namespace;
mod stats;
mod warmup;


// Re-export public types
pub use category::{Category, CategoryRegistry, KNOWN_CATEGORIES};
pub use eviction::EvictionManager;
pub use facade::CacheFacade;
pub use health::HealthMonitor;
pub use namespace::{is_blank, KeyNamespacer, NamespacedKey};
pub use stats::{Counters, StatisticsSnapshot, StatisticsTracker};
pub use warmup::{WarmupEngine, WARMABLE_CATEGORIES};

/// Well-known keys of the statistics map.
pub mod stat_keys {
    pub use super::stats::{
        KEY_CATEGORY_SIZES, KEY_DEGRADED, KEY_ERROR, KEY_EVICTIONS, KEY_HEALTH_STATUS,
        KEY_HITS, KEY_HIT_RATIO, KEY_HIT_RATIO_VALUE, KEY_MISSES, KEY_MISS_RATIO,
        KEY_MISS_RATIO_VALUE, KEY_REDIS_HEALTHY, KEY_TOTAL,
    };
}
