//! In-Memory Store Module
//!
//! Process-local backing store with TTL expiry and Redis-style glob scans.
//! Used when no Redis URL is configured, and throughout the test suite.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::store::{compile_glob, current_timestamp_ms, BackingStore, StoredEntry};

// == Memory Store ==
/// HashMap-backed store. Expired entries are dropped lazily on access and
/// eagerly by [`MemoryStore::purge_expired`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let now = current_timestamp_ms();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == Length ==
    /// Number of entries held, including ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl BackingStore for MemoryStore {
    async fn put(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        let entry = StoredEntry::new(value, ttl);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Entry expired between writes: drop it under the write lock.
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.is_expired()) {
            entries.remove(key);
            debug!("Dropped expired entry {}", key);
        }
        Ok(None)
    }

    async fn delete(&self, key: &str) -> Result<u64> {
        let removed = self.entries.write().await.remove(key);
        Ok(match removed {
            Some(entry) if !entry.is_expired() => 1,
            _ => 0,
        })
    }

    async fn delete_all(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }

        let now = current_timestamp_ms();
        let mut entries = self.entries.write().await;
        let removed = keys
            .iter()
            .filter_map(|key| entries.remove(key))
            .filter(|entry| !entry.is_expired_at(now))
            .count();
        Ok(removed as u64)
    }

    async fn scan(&self, pattern: &str) -> Result<BTreeSet<String>> {
        let matcher = compile_glob(pattern)?;
        let now = current_timestamp_ms();
        let entries = self.entries.read().await;

        Ok(entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .filter(|(key, _)| matcher.matches(key))
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[tokio::test]
    async fn test_store_put_and_get() {
        let store = MemoryStore::new();

        store.put("key1", "value1".to_string(), None).await.unwrap();
        let value = store.get("key1").await.unwrap();

        assert_eq!(value.as_deref(), Some("value1"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_get_nonexistent() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_delete() {
        let store = MemoryStore::new();

        store.put("key1", "value1".to_string(), None).await.unwrap();
        assert_eq!(store.delete("key1").await.unwrap(), 1);
        assert_eq!(store.delete("key1").await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_overwrite() {
        let store = MemoryStore::new();

        store.put("key1", "value1".to_string(), None).await.unwrap();
        store.put("key1", "value2".to_string(), None).await.unwrap();

        assert_eq!(store.get("key1").await.unwrap().as_deref(), Some("value2"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_empty_and_large_values_roundtrip() {
        let store = MemoryStore::new();
        let large = "x".repeat(500 * 1024);

        store.put("empty", String::new(), None).await.unwrap();
        store.put("large", large.clone(), None).await.unwrap();

        assert_eq!(store.get("empty").await.unwrap().as_deref(), Some(""));
        assert_eq!(store.get("large").await.unwrap(), Some(large));
    }

    #[tokio::test]
    async fn test_store_ttl_expiration() {
        let store = MemoryStore::new();

        store
            .put("key1", "value1".to_string(), Some(Duration::from_millis(50)))
            .await
            .unwrap();
        assert!(store.get("key1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(store.get("key1").await.unwrap(), None);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_store_scan_glob() {
        let store = MemoryStore::new();
        for key in ["app:a:user:1", "app:a:user:2", "app:b:user:3", "app:a:order:1"] {
            store.put(key, "v".to_string(), None).await.unwrap();
        }

        let scoped = store.scan("app:a:user:*").await.unwrap();
        assert_eq!(scoped.len(), 2);

        let global = store.scan("app:*:user:*").await.unwrap();
        assert_eq!(global.len(), 3);

        let single = store.scan("app:a:user:?").await.unwrap();
        assert_eq!(single.len(), 2);

        assert!(store.scan("nothing:*").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_scan_redis_glob_syntax() {
        let store = MemoryStore::new();
        for key in ["app:a:u1", "app:b:x*", "app:b:xy"] {
            store.put(key, "v".to_string(), None).await.unwrap();
        }

        assert_eq!(store.scan("**").await.unwrap().len(), 3);
        assert_eq!(store.scan("app:a:u**").await.unwrap().len(), 1);
        assert_eq!(store.scan("app:[^a]:*").await.unwrap().len(), 2);
        let escaped = store.scan(r"app:b:x\*").await.unwrap();
        assert_eq!(escaped.into_iter().collect::<Vec<_>>(), vec!["app:b:x*"]);
    }

    #[tokio::test]
    async fn test_store_zero_ttl_never_expires() {
        let store = MemoryStore::new();
        store
            .put("key1", "value1".to_string(), Some(Duration::ZERO))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(store.get("key1").await.unwrap().as_deref(), Some("value1"));
        assert_eq!(store.purge_expired().await, 0);
    }

    #[tokio::test]
    async fn test_store_scan_invalid_pattern() {
        let store = MemoryStore::new();
        let result = store.scan("app:[").await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_store_delete_all() {
        let store = MemoryStore::new();
        store.put("a", "1".to_string(), None).await.unwrap();
        store.put("b", "2".to_string(), None).await.unwrap();

        let keys = vec!["a".to_string(), "b".to_string(), "missing".to_string()];
        assert_eq!(store.delete_all(&keys).await.unwrap(), 2);
        assert_eq!(store.delete_all(&[]).await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_purge_expired() {
        let store = MemoryStore::new();

        store
            .put("short", "v".to_string(), Some(Duration::from_millis(20)))
            .await
            .unwrap();
        store
            .put("long", "v".to_string(), Some(Duration::from_secs(60)))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get("long").await.unwrap().is_some());
    }
}
