//! Cache Warmup Module
//!
//! Preloads allow-listed categories so the first reads after startup hit.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::cache::category::{CategoryRegistry, REFERENCE_DATA, STATISTICS};
use crate::cache::namespace::KeyNamespacer;
use crate::error::Result;
use crate::store::BackingStore;

/// Categories that have a preload routine.
pub const WARMABLE_CATEGORIES: [&str; 2] = [REFERENCE_DATA, STATISTICS];

// == Warmup Engine ==
/// Writes a fixed preload set for each warmable category.
#[derive(Clone)]
pub struct WarmupEngine {
    store: Arc<dyn BackingStore>,
    namespacer: KeyNamespacer,
    registry: Arc<CategoryRegistry>,
}

impl WarmupEngine {
    pub fn new(
        store: Arc<dyn BackingStore>,
        namespacer: KeyNamespacer,
        registry: Arc<CategoryRegistry>,
    ) -> Self {
        Self {
            store,
            namespacer,
            registry,
        }
    }

    pub fn is_warmable(category: &str) -> bool {
        WARMABLE_CATEGORIES.contains(&category)
    }

    // == Warm ==
    /// Preloads `category`, returning the number of entries written.
    ///
    /// Categories without a preload routine, and `None`, load nothing.
    /// The first store fault aborts the sequence.
    pub async fn warm(&self, category: Option<&str>) -> Result<u64> {
        let Some(category) = category.filter(|c| Self::is_warmable(c)) else {
            return Ok(0);
        };
        let ttl = self.registry.ttl(category);

        let mut loaded = 0;
        for (key, value) in preload_entries(category) {
            let Some(full_key) = self.namespacer.build(category, key) else {
                continue;
            };
            self.store
                .put(full_key.as_str(), value.to_string(), ttl)
                .await?;
            loaded += 1;
        }

        debug!("Warmed {} with {} entries", category, loaded);
        Ok(loaded)
    }

    /// Warms every warmable category, returning the total written.
    ///
    /// A category that fails is logged and contributes 0; the rest still run.
    pub async fn warm_all(&self) -> u64 {
        let mut total = 0;
        for category in WARMABLE_CATEGORIES {
            match self.warm(Some(category)).await {
                Ok(loaded) => total += loaded,
                Err(e) => warn!("Failed to warm category {}: {}", category, e),
            }
        }
        info!("Cache warmup loaded {} entries", total);
        total
    }
}

/// The deterministic preload sequence for a warmable category.
fn preload_entries(category: &str) -> Vec<(&'static str, Value)> {
    match category {
        REFERENCE_DATA => vec![
            (
                "transaction-types",
                json!({
                    "01": "Purchase",
                    "02": "Payment",
                    "03": "Credit",
                    "04": "Authorization",
                    "05": "Refund",
                    "06": "Reversal",
                    "07": "Adjustment",
                }),
            ),
            (
                "transaction-categories",
                json!({
                    "0001": "Regular Sales Draft",
                    "0002": "Regular Cash Advance",
                    "0003": "Convenience Check Debit",
                    "0004": "ATM Cash Advance",
                    "0005": "Interest Amount",
                }),
            ),
            ("account-statuses", json!(["ACTIVE", "INACTIVE", "CLOSED"])),
            ("card-statuses", json!(["ACTIVE", "EXPIRED", "BLOCKED"])),
        ],
        STATISTICS => vec![
            ("summary:accounts", json!({ "active": 0, "inactive": 0 })),
            ("summary:transactions", json!({ "count": 0, "amount": "0.00" })),
            (
                "summary:warmed-at",
                json!(chrono::Utc::now().to_rfc3339()),
            ),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn engine(store: Arc<MemoryStore>) -> WarmupEngine {
        WarmupEngine::new(
            store,
            KeyNamespacer::new("cache"),
            Arc::new(CategoryRegistry::default()),
        )
    }

    #[tokio::test]
    async fn test_warm_reference_data() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine(store.clone());

        let loaded = engine.warm(Some(REFERENCE_DATA)).await.unwrap();
        assert_eq!(loaded, 4);
        let raw = store
            .get("cache:reference-data:transaction-types")
            .await
            .unwrap()
            .unwrap();
        let types: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(types["02"], "Payment");
    }

    #[tokio::test]
    async fn test_warm_statistics() {
        let store = Arc::new(MemoryStore::new());
        assert_eq!(engine(store).warm(Some(STATISTICS)).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_warm_is_deterministic() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine(store.clone());

        let first = engine.warm(Some(REFERENCE_DATA)).await.unwrap();
        let second = engine.warm(Some(REFERENCE_DATA)).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn test_warm_unsupported() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine(store.clone());

        assert_eq!(engine.warm(Some("unsupported-category")).await.unwrap(), 0);
        assert_eq!(engine.warm(Some("session-cache")).await.unwrap(), 0);
        assert_eq!(engine.warm(None).await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_warm_all() {
        let store = Arc::new(MemoryStore::new());
        assert_eq!(engine(store).warm_all().await, 7);
    }
}
