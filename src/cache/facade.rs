//! Cache Facade Module
//!
//! Public surface of the caching subsystem. Every method returns a plain
//! value: failures below are logged and reported as false, zero or a miss,
//! so callers can always fall through to their source of truth.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::category::CategoryRegistry;
use crate::cache::eviction::EvictionManager;
use crate::cache::health::HealthMonitor;
use crate::cache::namespace::{is_blank, KeyNamespacer};
use crate::cache::stats::{Counters, StatisticsSnapshot, StatisticsTracker};
use crate::cache::warmup::WarmupEngine;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::store::BackingStore;

// == Cache Facade ==
/// Category-scoped cache over an injected backing store.
///
/// Safe to share across tasks behind an `Arc`; the only mutable state is the
/// atomic statistics tracker.
pub struct CacheFacade {
    store: Arc<dyn BackingStore>,
    namespacer: KeyNamespacer,
    registry: Arc<CategoryRegistry>,
    stats: StatisticsTracker,
    eviction: EvictionManager,
    warmup: WarmupEngine,
    health: HealthMonitor,
}

impl CacheFacade {
    // == Constructor ==
    pub fn new(
        store: Arc<dyn BackingStore>,
        namespacer: KeyNamespacer,
        registry: CategoryRegistry,
    ) -> Self {
        let registry = Arc::new(registry);
        Self {
            eviction: EvictionManager::new(store.clone(), namespacer.clone(), registry.clone()),
            warmup: WarmupEngine::new(store.clone(), namespacer.clone(), registry.clone()),
            health: HealthMonitor::new(store.clone()),
            stats: StatisticsTracker::new(),
            store,
            namespacer,
            registry,
        }
    }

    /// Creates a facade using the prefix and category TTLs from `config`.
    pub fn from_config(store: Arc<dyn BackingStore>, config: &Config) -> Self {
        Self::new(
            store,
            KeyNamespacer::new(config.key_prefix.clone()),
            CategoryRegistry::from_config(config),
        )
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    // == Cache ==
    /// Stores `value` under `(category, key)` with the category TTL.
    ///
    /// Returns false without contacting the store for blank arguments, a
    /// `null` value or an unregistered category.
    pub async fn cache<T>(&self, category: &str, key: &str, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        match self.try_cache(category, key, value).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Cache put failed for {}/{}: {}", category, key, e);
                false
            }
        }
    }

    async fn try_cache<T>(&self, category: &str, key: &str, value: &T) -> Result<bool>
    where
        T: Serialize + ?Sized,
    {
        let Some(full_key) = self.namespacer.build(category, key) else {
            return Ok(false);
        };
        let Some(ttl) = self.registry.ttl(category) else {
            debug!("Refusing to cache into unknown category {}", category);
            return Ok(false);
        };

        let encoded = serde_json::to_value(value)?;
        if encoded.is_null() {
            return Ok(false);
        }

        self.stats.record_operation();
        self.store
            .put(full_key.as_str(), encoded.to_string(), Some(ttl))
            .await?;
        debug!("Cached {}", full_key);
        Ok(true)
    }

    // == Get ==
    /// Reads and decodes the value under `(category, key)`.
    ///
    /// Records a hit or a miss; a value that fails to decode counts as a miss.
    pub async fn get<T>(&self, category: &str, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let full_key = self.namespacer.build(category, key)?;
        if !self.registry.contains(category) {
            return None;
        }

        self.stats.record_operation();
        let decoded = match self.store.get(full_key.as_str()).await {
            Ok(Some(raw)) => serde_json::from_str::<T>(&raw)
                .map_err(|e| warn!("Discarding undecodable entry {}: {}", full_key, e))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                warn!("Cache get failed for {}: {}", full_key, e);
                None
            }
        };

        if decoded.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        decoded
    }

    // == Get Or Load ==
    /// Cache-aside read: on a miss, runs `loader` and caches what it returns.
    pub async fn get_or_load<T, F, Fut>(&self, category: &str, key: &str, loader: F) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        if let Some(hit) = self.get::<T>(category, key).await {
            return Some(hit);
        }

        let loaded = loader().await?;
        self.cache(category, key, &loaded).await;
        Some(loaded)
    }

    // == Evict ==
    /// Removes one exact key. Returns 1 if it was present, 0 otherwise.
    pub async fn evict(&self, category: &str, key: &str) -> u64 {
        if is_blank(category) || is_blank(key) {
            return 0;
        }
        self.stats.record_operation();
        let removed = self
            .eviction
            .evict_one(category, key)
            .await
            .unwrap_or_else(|e| zero_on_fault("evict", &e));
        self.stats.record_evictions(removed);
        removed
    }

    /// Removes every key of one category matching a glob pattern.
    pub async fn evict_pattern(&self, category: &str, pattern: &str) -> u64 {
        if is_blank(category) || is_blank(pattern) {
            return 0;
        }
        self.stats.record_operation();
        let removed = self
            .eviction
            .evict_pattern(category, pattern)
            .await
            .unwrap_or_else(|e| zero_on_fault("evict_pattern", &e));
        self.stats.record_evictions(removed);
        removed
    }

    // == Clear ==
    /// Clears one category, or every registered category when `None`.
    pub async fn clear(&self, category: Option<&str>) -> u64 {
        self.stats.record_operation();
        let removed = self
            .eviction
            .clear(category)
            .await
            .unwrap_or_else(|e| zero_on_fault("clear", &e));
        self.stats.record_evictions(removed);
        removed
    }

    // == Invalidate Pattern ==
    /// Removes keys matching `pattern` in every registered category.
    ///
    /// A blank pattern returns 0 immediately.
    pub async fn invalidate_pattern(&self, pattern: &str) -> u64 {
        if is_blank(pattern) {
            return 0;
        }
        self.stats.record_operation();
        let removed = self
            .eviction
            .invalidate(pattern)
            .await
            .unwrap_or_else(|e| zero_on_fault("invalidate_pattern", &e));
        self.stats.record_evictions(removed);
        removed
    }

    // == Warm Cache ==
    /// Preloads an allow-listed category; anything else loads 0.
    pub async fn warm_cache(&self, category: Option<&str>) -> u64 {
        self.warmup
            .warm(category)
            .await
            .unwrap_or_else(|e| zero_on_fault("warm_cache", &e))
    }

    /// Preloads every allow-listed category.
    pub async fn warm_all(&self) -> u64 {
        self.warmup.warm_all().await
    }

    // == Statistics ==
    /// Compiles a typed statistics snapshot.
    pub async fn stats(&self) -> StatisticsSnapshot {
        let healthy = self.health.is_healthy().await;
        let sizes = self.category_sizes().await;
        if let Err(e) = &sizes {
            warn!("Reporting baseline statistics, sizes unavailable: {}", e);
        }
        self.stats.snapshot(sizes, healthy)
    }

    /// Statistics under the well-known `cache.*` keys. Never empty.
    pub async fn get_stats(&self) -> BTreeMap<String, Value> {
        self.stats().await.to_map()
    }

    async fn category_sizes(&self) -> Result<BTreeMap<String, u64>> {
        let mut sizes = BTreeMap::new();
        for name in self.registry.names() {
            sizes.insert(name.to_string(), self.try_cache_size(name).await?);
        }
        Ok(sizes)
    }

    /// Current counters, without probing the store.
    pub fn counters(&self) -> Counters {
        self.stats.counters()
    }

    /// Zeroes the statistics counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    // == Health ==
    pub async fn is_healthy(&self) -> bool {
        self.health.is_healthy().await
    }

    pub fn hit_ratio(&self) -> f64 {
        self.stats.hit_ratio()
    }

    pub fn miss_ratio(&self) -> f64 {
        self.stats.miss_ratio()
    }

    // == Cache Size ==
    /// Number of live keys in `category`; 0 when unknown or on any fault.
    pub async fn cache_size(&self, category: &str) -> u64 {
        self.try_cache_size(category)
            .await
            .unwrap_or_else(|e| zero_on_fault("cache_size", &e))
    }

    async fn try_cache_size(&self, category: &str) -> Result<u64> {
        if !self.registry.contains(category) {
            return Ok(0);
        }
        let Some(pattern) = self.namespacer.category_pattern(category) else {
            return Ok(0);
        };
        Ok(self.store.scan(&pattern).await?.len() as u64)
    }
}

fn zero_on_fault(op: &str, err: &CacheError) -> u64 {
    warn!("Cache {} failed: {}", op, err);
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn facade() -> CacheFacade {
        CacheFacade::from_config(Arc::new(MemoryStore::new()), &Config::default())
    }

    #[tokio::test]
    async fn test_cache_then_evict() {
        let cache = facade();
        let value = json!({ "userId": "123", "role": "admin" });

        assert!(cache.cache("session-cache", "user:123", &value).await);
        assert_eq!(cache.evict("session-cache", "user:123").await, 1);
        assert_eq!(cache.evict("session-cache", "user:123").await, 0);
    }

    #[tokio::test]
    async fn test_cache_rejects_invalid_arguments() {
        let cache = facade();

        assert!(!cache.cache("", "k", &1).await);
        assert!(!cache.cache("session-cache", "", &1).await);
        assert!(!cache.cache("session-cache", "k", &Value::Null).await);
        assert!(!cache.cache("session-cache", "k", &None::<u32>).await);
        assert!(!cache.cache("unknown-category", "k", &1).await);
        assert_eq!(cache.stats.counters().total, 0);
    }

    #[tokio::test]
    async fn test_get_roundtrip_and_hit_miss() {
        let cache = facade();
        cache.cache("account-data", "acct:1", &vec![1, 2, 3]).await;

        let hit: Option<Vec<u32>> = cache.get("account-data", "acct:1").await;
        assert_eq!(hit, Some(vec![1, 2, 3]));
        let miss: Option<Vec<u32>> = cache.get("account-data", "acct:2").await;
        assert!(miss.is_none());

        let counters = cache.stats.counters();
        assert_eq!(counters.total, 3);
        assert_eq!(counters.hits, 1);
        assert_eq!(counters.misses, 1);
    }

    #[tokio::test]
    async fn test_get_undecodable_counts_as_miss() {
        let cache = facade();
        cache.cache("query-results", "q", &"text").await;

        let decoded: Option<u64> = cache.get("query-results", "q").await;
        assert!(decoded.is_none());
        assert_eq!(cache.stats.counters().misses, 1);
    }

    #[tokio::test]
    async fn test_empty_and_large_values() {
        let cache = facade();
        let large = "x".repeat(500 * 1024);

        assert!(cache.cache("query-results", "empty", "").await);
        assert!(cache.cache("query-results", "list", &Vec::<u8>::new()).await);
        assert!(cache.cache("query-results", "large", &large).await);

        assert_eq!(cache.get::<String>("query-results", "empty").await.as_deref(), Some(""));
        assert_eq!(cache.get::<Vec<u8>>("query-results", "list").await, Some(vec![]));
        assert_eq!(cache.get::<String>("query-results", "large").await, Some(large));
    }

    #[tokio::test]
    async fn test_get_or_load() {
        let cache = facade();

        let loaded = cache
            .get_or_load("user-profiles", "u1", || async { Some("Alice".to_string()) })
            .await;
        assert_eq!(loaded.as_deref(), Some("Alice"));

        let cached = cache
            .get_or_load("user-profiles", "u1", || async { Some("Bob".to_string()) })
            .await;
        assert_eq!(cached.as_deref(), Some("Alice"));

        let absent: Option<String> = cache
            .get_or_load("user-profiles", "u2", || async { None })
            .await;
        assert!(absent.is_none());
    }

    #[tokio::test]
    async fn test_evict_pattern_and_invalidate() {
        let cache = facade();
        cache.cache("session-cache", "user:1", &1).await;
        cache.cache("session-cache", "user:2", &2).await;
        cache.cache("user-profiles", "user:1", &3).await;

        assert_eq!(cache.evict_pattern("session-cache", "user:*").await, 2);
        assert_eq!(cache.invalidate_pattern("user:*").await, 1);
        assert_eq!(cache.invalidate_pattern("   ").await, 0);
        assert_eq!(cache.stats.counters().evictions, 3);
    }

    #[tokio::test]
    async fn test_invalidate_leaves_nested_key_parts() {
        let cache = facade();
        cache.cache("session-cache", "admin:user:5", &5).await;

        assert_eq!(cache.invalidate_pattern("user:*").await, 0);
        assert_eq!(cache.get::<u32>("session-cache", "admin:user:5").await, Some(5));
    }

    #[tokio::test]
    async fn test_redis_glob_patterns() {
        let cache = facade();
        cache.cache("session-cache", "u1", &1).await;
        assert_eq!(cache.evict_pattern("session-cache", "u**").await, 1);

        cache.cache("session-cache", "u1", &1).await;
        assert_eq!(cache.invalidate_pattern("**").await, 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_config_still_caches() {
        let mut config = Config::default();
        config.category_ttls.insert("statistics".to_string(), 0);
        let cache = CacheFacade::from_config(Arc::new(MemoryStore::new()), &config);

        assert!(cache.cache("statistics", "s", &1).await);
        assert_eq!(cache.get::<u32>("statistics", "s").await, Some(1));
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = facade();
        cache.cache("statistics", "a", &1).await;
        cache.cache("account-data", "b", &2).await;

        assert_eq!(cache.clear(Some("statistics")).await, 1);
        assert_eq!(cache.clear(Some("non-existent")).await, 0);
        assert_eq!(cache.clear(None).await, 1);
        assert_eq!(cache.cache_size("account-data").await, 0);
    }

    #[tokio::test]
    async fn test_warm_cache() {
        let cache = facade();
        assert!(cache.warm_cache(Some("reference-data")).await > 0);
        assert_eq!(cache.warm_cache(Some("unsupported-category")).await, 0);
        assert_eq!(cache.warm_cache(None).await, 0);
        assert_eq!(cache.cache_size("reference-data").await, 4);
    }

    #[tokio::test]
    async fn test_cache_size() {
        let cache = facade();
        cache.cache("transaction-data", "t1", &1).await;
        cache.cache("transaction-data", "t2", &2).await;

        assert_eq!(cache.cache_size("transaction-data").await, 2);
        assert_eq!(cache.cache_size("unknown").await, 0);
        assert_eq!(cache.cache_size("").await, 0);
    }

    #[tokio::test]
    async fn test_get_stats() {
        let cache = facade();
        cache.cache("statistics", "s", &1).await;
        let _: Option<u32> = cache.get("statistics", "s").await;

        let stats = cache.get_stats().await;
        assert_eq!(stats["cache.operations.total"], json!(2));
        assert_eq!(stats["cache.operations.hits"], json!(1));
        assert_eq!(stats["cache.performance.hit-ratio"], json!("50.00%"));
        assert_eq!(stats["cache.categories.sizes"]["statistics"], json!(1));
        assert_eq!(stats["cache.health.status"], json!("UP"));
        assert_eq!(stats["cache.redis.healthy"], json!(true));
    }

    #[tokio::test]
    async fn test_ratios_bounded() {
        let cache = facade();
        assert_eq!(cache.hit_ratio(), 0.0);
        assert_eq!(cache.miss_ratio(), 0.0);

        cache.cache("statistics", "s", &1).await;
        let _: Option<u32> = cache.get("statistics", "s").await;
        let _: Option<u32> = cache.get("statistics", "missing").await;

        let (hit, miss) = (cache.hit_ratio(), cache.miss_ratio());
        assert!((0.0..=1.0).contains(&hit));
        assert!((0.0..=1.0).contains(&miss));
        assert!(hit + miss <= 1.0);
    }

    #[tokio::test]
    async fn test_is_healthy() {
        assert!(facade().is_healthy().await);
    }
}
