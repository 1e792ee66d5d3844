//! Deferred startup check

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

use crate::updater::Updater;

/// Run one update check after `delay`, off the caller's task.
///
/// The handle resolves to the same summary line `Updater::check_summary`
/// produces, so hosts can await it or drop it.
pub fn schedule_startup_check(updater: Arc<Updater>, delay: Duration) -> JoinHandle<String> {
    tokio::spawn(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let summary = updater.check_summary().await;
        info!("Startup update check: {}", summary);
        summary
    })
}
