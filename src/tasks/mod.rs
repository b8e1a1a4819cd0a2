//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the service is up.
//!
//! # Tasks
//! - Expiry cleanup: Purges expired entries from the in-memory store
//! - Health probe: Pings the backing store and logs status transitions

mod cleanup;
mod health;

pub use cleanup::spawn_cleanup_task;
pub use health::spawn_health_task;
