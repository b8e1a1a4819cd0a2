//! Category Cache - a category-scoped cache facade
//!
//! Namespaced keys, pattern invalidation, per-category TTLs, hit/miss
//! statistics, warmup and health monitoring over a Redis-compatible store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::CacheFacade;
pub use config::Config;
pub use store::{BackingStore, MemoryStore, RedisStore};
pub use tasks::{spawn_cleanup_task, spawn_health_task};
