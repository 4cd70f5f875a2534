//! Dispatcher - timer-driven batch dispatch loop.
//!
//! Every tick, while the RunController is enabled, claim up to
//! `batch_size` pending records and mark each one sent. Fire and
//! forget: nothing is returned to any caller, failures are logged and
//! the loop keeps its own schedule.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, timeout};
use tracing::{debug, info, warn};

use crate::app::RunController;
use crate::ports::{MarkSent, MessageStore};

/// Dispatch loop tuning.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Interval between ticks.
    pub tick_interval: Duration,

    /// Maximum records claimed per tick.
    pub batch_size: usize,

    /// Upper bound for any single store call. A hung backend must not
    /// freeze the loop; the tick ends and the next one retries.
    pub store_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(120),
            batch_size: 2,
            store_timeout: Duration::from_secs(5),
        }
    }
}

/// Handle for the dispatch loop task.
/// - dropping `shutdown_tx` (via `shutdown_and_join`) stops the loop
/// - shutdown is observed at tick boundaries; an in-flight tick runs
///   to completion
pub struct Dispatcher {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl Dispatcher {
    /// Spawn the loop on the current runtime.
    pub fn spawn(
        store: Arc<dyn MessageStore>,
        controller: Arc<RunController>,
        config: DispatchConfig,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let join = tokio::spawn(async move {
            dispatch_loop(store, controller, config, shutdown_rx).await;
        });

        Self { shutdown_tx, join }
    }

    /// Request shutdown without waiting.
    pub fn request_shutdown(&self) {
        // ignore send error: the loop may already have exited
        let _ = self.shutdown_tx.send(true);
    }

    /// Shutdown and wait for the loop to finish its current tick.
    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        let _ = self.join.await;
    }
}

async fn dispatch_loop(
    store: Arc<dyn MessageStore>,
    controller: Arc<RunController>,
    config: DispatchConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // interval fires immediately; consume the first tick so the loop
    // waits a full interval before its first claim
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    debug!("dispatch loop shutting down");
                    break;
                }
            }
            _ = ticker.tick() => {
                tick_once(store.as_ref(), &controller, &config).await;
            }
        }
    }
}

/// One execution of the dispatch task. Public so tests (and manual
/// triggers) can run a tick without standing up the timer.
pub async fn tick_once(store: &dyn MessageStore, controller: &RunController, config: &DispatchConfig) {
    if !controller.is_enabled() {
        return;
    }

    let batch = match timeout(config.store_timeout, store.claim_pending(config.batch_size)).await {
        Ok(Ok(batch)) => batch,
        Ok(Err(error)) => {
            warn!(%error, "claim failed; ending tick");
            return;
        }
        Err(_) => {
            warn!(timeout = ?config.store_timeout, "claim timed out; ending tick");
            return;
        }
    };

    for record in batch {
        info!(id = %record.id, recipient = %record.recipient, "dispatching message");

        // One record's failure must not abort the rest of the batch.
        match timeout(config.store_timeout, store.mark_sent(record.id)).await {
            Ok(Ok(MarkSent::Marked)) => {}
            Ok(Ok(MarkSent::AlreadySent)) => {
                debug!(id = %record.id, "already sent; skipping");
            }
            Ok(Err(error)) => {
                warn!(id = %record.id, %error, "mark_sent failed; continuing with batch");
            }
            Err(_) => {
                warn!(id = %record.id, timeout = ?config.store_timeout, "mark_sent timed out; continuing with batch");
            }
        }
    }
}
