//! Redis Store Module
//!
//! Backing store speaking the Redis protocol over a multiplexed tokio connection.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, error, info};

use crate::error::{CacheError, Result};
use crate::store::BackingStore;

// == Redis Store ==
/// Redis adapter. The multiplexed connection is cheap to clone and is cloned
/// per call, so the store can be shared freely across tasks.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl RedisStore {
    // == Connect ==
    /// Opens a connection to `url` and verifies it with a `PING`.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let connection = client.get_multiplexed_async_connection().await?;

        let store = Self { connection };
        store.ping().await?;

        info!("Connected to Redis backing store");
        Ok(store)
    }

    fn conn(&self) -> MultiplexedConnection {
        self.connection.clone()
    }
}

fn log_fault<T>(op: &str, key: &str, result: redis::RedisResult<T>) -> Result<T> {
    result.map_err(|e| {
        error!("Redis {} failed for {}: {}", op, key, e);
        CacheError::from(e)
    })
}

#[async_trait]
impl BackingStore for RedisStore {
    async fn put(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn();
        let result: redis::RedisResult<()> = match ttl.filter(|t| !t.is_zero()) {
            Some(ttl) => conn.pset_ex(key, value, ttl.as_millis() as u64).await,
            None => conn.set(key, value).await,
        };
        log_fault("SET", key, result)?;
        debug!("Redis SET {}", key);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn();
        let result: redis::RedisResult<Option<String>> = conn.get(key).await;
        log_fault("GET", key, result)
    }

    async fn delete(&self, key: &str) -> Result<u64> {
        let mut conn = self.conn();
        let result: redis::RedisResult<u64> = conn.del(key).await;
        log_fault("DEL", key, result)
    }

    async fn delete_all(&self, keys: &[String]) -> Result<u64> {
        // DEL without arguments is a protocol error.
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn();
        let result: redis::RedisResult<u64> = conn.del(keys).await;
        log_fault("DEL", &format!("{} keys", keys.len()), result)
    }

    async fn scan(&self, pattern: &str) -> Result<BTreeSet<String>> {
        let mut conn = self.conn();
        let result: redis::RedisResult<Vec<String>> = conn.keys(pattern).await;
        let keys = log_fault("KEYS", pattern, result)?;
        Ok(keys.into_iter().collect())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        if pong != "PONG" {
            return Err(CacheError::BackingStore(format!(
                "Unexpected PING reply: {}",
                pong
            )));
        }
        Ok(())
    }
}
