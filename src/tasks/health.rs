//! Health Probe Task
//!
//! Background task that periodically checks backing-store liveness so
//! outages are logged even when no caller is asking.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheFacade;

/// Spawns a task probing the backing store every `interval_secs` seconds.
///
/// Transitions between healthy and unhealthy are logged by the facade's
/// health monitor; this task only drives the probe.
pub fn spawn_health_task(cache: Arc<CacheFacade>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting health probe task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;
            let healthy = cache.is_healthy().await;
            debug!("Health probe: healthy={}", healthy);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_health_task_can_be_aborted() {
        let cache = Arc::new(CacheFacade::from_config(
            Arc::new(MemoryStore::new()),
            &Config::default(),
        ));
        let handle = spawn_health_task(cache, 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished());
    }
}
