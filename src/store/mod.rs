//! Backing Store Module
//!
//! Thin async interface over a remote key-value store, plus the Redis and
//! in-memory adapters implementing it.
//!
//! Every adapter converts transport faults into [`CacheError::BackingStore`]
//! before returning, so callers above this layer only ever see crate errors.
//!
//! [`CacheError::BackingStore`]: crate::error::CacheError::BackingStore

mod entry;
mod memory;
mod pattern;
mod redis_store;

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use entry::{current_timestamp_ms, StoredEntry};
pub use memory::MemoryStore;
pub use pattern::compile_glob;
pub use redis_store::RedisStore;

// == Backing Store Trait ==
/// Operations the cache facade needs from a key-value store.
///
/// Keys passed here are already namespaced. Values are opaque strings and must
/// round-trip unchanged, including empty strings and large payloads.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Stores `value` under `key`, expiring after `ttl` when given.
    /// A zero `ttl` means no expiry, as does `None`.
    async fn put(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()>;

    /// Reads the value under `key`, `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes `key`, returning the number of keys removed (0 or 1).
    async fn delete(&self, key: &str) -> Result<u64>;

    /// Removes every key in `keys`, returning how many existed.
    async fn delete_all(&self, keys: &[String]) -> Result<u64>;

    /// Returns every live key matching a Redis-style glob pattern.
    async fn scan(&self, pattern: &str) -> Result<BTreeSet<String>>;

    /// Lightweight liveness round-trip.
    async fn ping(&self) -> Result<()>;
}
