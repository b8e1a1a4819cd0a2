//! Cache Statistics Module
//!
//! Tracks operations, hits, misses and evictions with atomic counters and
//! renders them as a snapshot map.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::CacheError;

// == Snapshot Keys ==
pub const KEY_TOTAL: &str = "cache.operations.total";
pub const KEY_HITS: &str = "cache.operations.hits";
pub const KEY_MISSES: &str = "cache.operations.misses";
pub const KEY_EVICTIONS: &str = "cache.operations.evictions";
pub const KEY_HIT_RATIO: &str = "cache.performance.hit-ratio";
pub const KEY_HIT_RATIO_VALUE: &str = "cache.performance.hit-ratio.value";
pub const KEY_MISS_RATIO: &str = "cache.performance.miss-ratio";
pub const KEY_MISS_RATIO_VALUE: &str = "cache.performance.miss-ratio.value";
pub const KEY_CATEGORY_SIZES: &str = "cache.categories.sizes";
pub const KEY_HEALTH_STATUS: &str = "cache.health.status";
pub const KEY_REDIS_HEALTHY: &str = "cache.redis.healthy";
pub const KEY_DEGRADED: &str = "cache.stats.degraded";
pub const KEY_ERROR: &str = "cache.stats.error";

// == Statistics Tracker ==
/// Monotonic counters shared by every facade call.
///
/// A hit or miss is always recorded after its operation, and readers load
/// hits and misses before the total, so `hits + misses <= total` holds for
/// every observed snapshot.
#[derive(Debug, Default)]
pub struct StatisticsTracker {
    total: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Plain copy of the four counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub total: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Counters {
    /// hits / total, clamped to [0, 1]. Zero when nothing was recorded.
    pub fn hit_ratio(&self) -> f64 {
        ratio(self.hits, self.total)
    }

    /// misses / total, clamped so that it never pushes the sum past 1.
    pub fn miss_ratio(&self) -> f64 {
        ratio(self.misses, self.total).min(1.0 - self.hit_ratio())
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64).clamp(0.0, 1.0)
    }
}

impl StatisticsTracker {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_operation(&self) {
        self.total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_evictions(&self, count: u64) {
        if count > 0 {
            self.evictions.fetch_add(count, Ordering::SeqCst);
        }
    }

    // == Counters ==
    /// Reads all counters. Total is loaded last.
    pub fn counters(&self) -> Counters {
        let hits = self.hits.load(Ordering::SeqCst);
        let misses = self.misses.load(Ordering::SeqCst);
        let evictions = self.evictions.load(Ordering::SeqCst);
        let total = self.total.load(Ordering::SeqCst);
        Counters {
            total,
            hits,
            misses,
            evictions,
        }
    }

    pub fn hit_ratio(&self) -> f64 {
        self.counters().hit_ratio()
    }

    pub fn miss_ratio(&self) -> f64 {
        self.counters().miss_ratio()
    }

    /// Zeroes every counter.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::SeqCst);
        self.misses.store(0, Ordering::SeqCst);
        self.evictions.store(0, Ordering::SeqCst);
        self.total.store(0, Ordering::SeqCst);
    }

    // == Snapshot ==
    /// Compiles a snapshot from the counters, per-category sizes and health.
    ///
    /// A failure while computing sizes does not fail the snapshot: the
    /// counters are still reported, with empty sizes and the error recorded.
    pub fn snapshot(
        &self,
        sizes: Result<BTreeMap<String, u64>, CacheError>,
        healthy: bool,
    ) -> StatisticsSnapshot {
        let counters = self.counters();
        let (category_sizes, error) = match sizes {
            Ok(sizes) => (sizes, None),
            Err(e) => (BTreeMap::new(), Some(e.to_string())),
        };

        StatisticsSnapshot {
            counters,
            hit_ratio: counters.hit_ratio(),
            miss_ratio: counters.miss_ratio(),
            category_sizes,
            healthy,
            error,
        }
    }
}

// == Statistics Snapshot ==
/// Point-in-time view of the cache statistics.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsSnapshot {
    pub counters: Counters,
    pub hit_ratio: f64,
    pub miss_ratio: f64,
    pub category_sizes: BTreeMap<String, u64>,
    pub healthy: bool,
    /// Set when sizes could not be compiled
    pub error: Option<String>,
}

impl StatisticsSnapshot {
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    /// Renders the snapshot under the well-known `cache.*` keys.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        map.insert(KEY_TOTAL.to_string(), json!(self.counters.total));
        map.insert(KEY_HITS.to_string(), json!(self.counters.hits));
        map.insert(KEY_MISSES.to_string(), json!(self.counters.misses));
        map.insert(KEY_EVICTIONS.to_string(), json!(self.counters.evictions));
        map.insert(KEY_HIT_RATIO.to_string(), json!(format_percent(self.hit_ratio)));
        map.insert(KEY_HIT_RATIO_VALUE.to_string(), json!(self.hit_ratio));
        map.insert(KEY_MISS_RATIO.to_string(), json!(format_percent(self.miss_ratio)));
        map.insert(KEY_MISS_RATIO_VALUE.to_string(), json!(self.miss_ratio));
        map.insert(KEY_CATEGORY_SIZES.to_string(), json!(self.category_sizes));
        map.insert(
            KEY_HEALTH_STATUS.to_string(),
            json!(if self.healthy { "UP" } else { "DOWN" }),
        );
        map.insert(KEY_REDIS_HEALTHY.to_string(), json!(self.healthy));
        map.insert(KEY_DEGRADED.to_string(), json!(self.is_degraded()));
        if let Some(error) = &self.error {
            map.insert(KEY_ERROR.to_string(), json!(error));
        }
        map
    }
}

fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
