//! Eviction Module
//!
//! Single-key, pattern, per-category and global removal against the backing store.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::category::CategoryRegistry;
use crate::cache::namespace::{is_blank, KeyNamespacer};
use crate::error::Result;
use crate::store::{compile_glob, BackingStore};

// == Eviction Manager ==
/// Removes entries by key, by glob pattern, or by whole category.
///
/// Unknown categories and blank input resolve to 0 without touching the store.
#[derive(Clone)]
pub struct EvictionManager {
    store: Arc<dyn BackingStore>,
    namespacer: KeyNamespacer,
    registry: Arc<CategoryRegistry>,
}

impl EvictionManager {
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

    // == Evict One ==
    /// Removes one exact key. Returns 1 if it was present, 0 otherwise.
    pub async fn evict_one(&self, category: &str, key: &str) -> Result<u64> {
        if !self.registry.contains(category) {
            return Ok(0);
        }
        let Some(full_key) = self.namespacer.build(category, key) else {
            return Ok(0);
        };

        let removed = self.store.delete(full_key.as_str()).await?;
        debug!("Evicted {} ({} removed)", full_key, removed);
        Ok(removed)
    }

    // == Evict Pattern ==
    /// Removes every key of `category` matching `glob`, returning the match count.
    pub async fn evict_pattern(&self, category: &str, glob: &str) -> Result<u64> {
        if !self.registry.contains(category) {
            return Ok(0);
        }
        let Some(pattern) = self.namespacer.scoped_pattern(category, glob) else {
            return Ok(0);
        };
        self.remove_matching(&pattern).await
    }

    // == Clear ==
    /// Clears one category, or every registered category when `None`.
    pub async fn clear(&self, category: Option<&str>) -> Result<u64> {
        match category {
            Some(name) => self.clear_category(name).await,
            None => Ok(self.clear_all().await),
        }
    }

    /// Clears a single category. Unknown or blank names clear nothing.
    pub async fn clear_category(&self, category: &str) -> Result<u64> {
        if !self.registry.contains(category) {
            return Ok(0);
        }
        let Some(pattern) = self.namespacer.category_pattern(category) else {
            return Ok(0);
        };

        let count = self.remove_matching(&pattern).await?;
        debug!("Cleared category {} ({} keys)", category, count);
        Ok(count)
    }

    /// Clears every registered category in turn.
    ///
    /// A category that fails is logged and contributes 0; the rest still run.
    pub async fn clear_all(&self) -> u64 {
        let mut total = 0;
        for name in self.registry.names() {
            match self.clear_category(name).await {
                Ok(count) => total += count,
                Err(e) => warn!("Failed to clear category {}: {}", name, e),
            }
        }
        total
    }

    // == Invalidate ==
    /// Removes keys matching `glob` across every registered category.
    ///
    /// One scan over `prefix:*:glob`. A match is kept only when its category
    /// is registered and its key part matches `glob` on its own, since the
    /// category wildcard can also swallow `:` separators of the key.
    pub async fn invalidate(&self, glob: &str) -> Result<u64> {
        if is_blank(glob) {
            return Ok(0);
        }
        let Some(pattern) = self.namespacer.global_pattern(glob) else {
            return Ok(0);
        };
        let key_matcher = compile_glob(glob)?;

        let matched: Vec<String> = self
            .store
            .scan(&pattern)
            .await?
            .into_iter()
            .filter(|key| {
                self.namespacer
                    .parse(key)
                    .is_some_and(|(category, key)| {
                        self.registry.contains(category) && key_matcher.matches(key)
                    })
            })
            .collect();

        if matched.is_empty() {
            return Ok(0);
        }

        self.store.delete_all(&matched).await?;
        debug!("Invalidated {} keys matching {}", matched.len(), pattern);
        Ok(matched.len() as u64)
    }

    async fn remove_matching(&self, pattern: &str) -> Result<u64> {
        let matched: Vec<String> = self.store.scan(pattern).await?.into_iter().collect();
        if matched.is_empty() {
            return Ok(0);
        }
        self.store.delete_all(&matched).await?;
        Ok(matched.len() as u64)
    }
}
