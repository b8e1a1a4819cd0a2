//! Health Monitor Module
//!
//! Liveness probe against the backing store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::store::BackingStore;

// == Health Monitor ==
/// Probes the backing store and remembers the last observed status.
pub struct HealthMonitor {
    store: Arc<dyn BackingStore>,
    last_healthy: AtomicBool,
}

impl HealthMonitor {
    /// The store is assumed healthy until the first probe says otherwise.
    pub fn new(store: Arc<dyn BackingStore>) -> Self {
        Self {
            store,
            last_healthy: AtomicBool::new(true),
        }
    }

    // == Is Healthy ==
    /// Runs a `ping` round-trip. Any fault reads as unhealthy.
    pub async fn is_healthy(&self) -> bool {
        let healthy = match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Backing store health probe failed: {}", e);
                false
            }
        };

        let was_healthy = self.last_healthy.swap(healthy, Ordering::SeqCst);
        match (was_healthy, healthy) {
            (true, false) => warn!("Backing store is DOWN"),
            (false, true) => info!("Backing store recovered"),
            _ => {}
        }
        healthy
    }

    /// Status observed by the most recent probe, without a round-trip.
    pub fn last_status(&self) -> bool {
        self.last_healthy.load(Ordering::SeqCst)
    }
}
