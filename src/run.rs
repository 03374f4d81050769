//! Application execution logic.
//!
//! This module contains the main async execution loop that replays a feed
//! script through the change detector and prints genuine transitions.

use std::time::Duration;

use thiserror::Error;
use tokio::signal;

use vmnet_watch::config::ValidatedConfig;
use vmnet_watch::inventory::{InventoryClient, ScriptError, ScriptedInventory};
use vmnet_watch::monitor::{
    ChangeDetector, DedupCache, EntityObserver, LogObserver, MonitorError,
};

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to load the feed script.
    #[error("Failed to load feed script: {0}")]
    Script(#[from] ScriptError),

    /// The monitoring loop failed fatally.
    #[error("Monitoring failed: {0}")]
    Monitor(#[from] MonitorError),
}

/// Executes the main application loop.
///
/// This function:
/// 1. Loads the scripted feed source
/// 2. Builds the observer chain (dedup cache → printer, or printer alone
///    in raw mode)
/// 3. Runs the detector until the duration elapses or a shutdown signal
///    (Ctrl+C / SIGTERM) arrives
/// 4. Releases the subscription on every exit path
///
/// # Errors
///
/// Returns an error if the feed script cannot be loaded or the monitoring
/// loop fails fatally.
///
/// # Coverage Note
///
/// Excluded from coverage because it requires a real async runtime with
/// signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let client = ScriptedInventory::from_path(&config.feed)?;

    if config.raw {
        tracing::info!("Raw delivery enabled - feed events bypass the deduplication cache");
        let detector =
            ChangeDetector::new(client, LogObserver::new()).with_wait_options(config.wait);
        run_detector(detector, config.duration).await
    } else {
        let detector = ChangeDetector::new(client, DedupCache::new(LogObserver::new()))
            .with_wait_options(config.wait);
        run_detector(detector, config.duration).await
    }
}

/// Runs one detector until completion or shutdown, then releases its
/// subscription.
///
/// Excluded from coverage - requires signal handling.
#[cfg(not(tarpaulin_include))]
async fn run_detector<C, O>(
    mut detector: ChangeDetector<C, O>,
    duration: Duration,
) -> Result<(), RunError>
where
    C: InventoryClient,
    O: EntityObserver,
{
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let result = tokio::select! {
        biased;

        () = &mut shutdown => {
            tracing::info!("Shutdown signal received, stopping...");
            Ok(())
        }

        result = detector.monitor(duration) => result.map_err(RunError::from),
    };

    // Release the subscription on every exit path.
    if let Err(e) = detector.close().await {
        tracing::warn!("Failed to release subscription: {e}");
    }
    result
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
