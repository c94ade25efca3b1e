//! Background scheduler for the periodic reconcile+dispatch cycle.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use crate::reconciliation::ReconciliationService;

/// Initial delay before the first cycle, giving startup a moment to settle.
const INITIAL_DELAY_SECS: u64 = 1;

/// Starts the polling scheduler. Each tick awaits one full cycle before the
/// next tick is consumed, so cycles never overlap; a long cycle delays the
/// next tick instead.
pub fn start_polling_scheduler(
    monitor: Arc<ReconciliationService>,
    interval_secs: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Tender check scheduler started ({}s interval)", interval_secs);

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut tick = interval(Duration::from_secs(interval_secs));

        loop {
            tick.tick().await;
            // A failed cycle must not take the scheduler down with it.
            if let Err(e) = monitor.run_cycle().await {
                warn!("Tender check cycle failed: {}", e);
            }
        }
    })
}
