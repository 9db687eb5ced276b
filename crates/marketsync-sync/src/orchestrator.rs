//! Sync orchestration — backfill to completion, then live subscription.
//!
//! Handlers are never active before the backfill has fully committed, so a
//! live event cannot race a not-yet-populated store during startup.

use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use marketsync_core::error::SyncError;
use marketsync_core::store::RecordStore;

use crate::backfill::BackfillReconciler;
use crate::gateway::ChainGateway;
use crate::live::LiveReconciler;
use crate::resolver::MetadataResolver;

/// Owns the backfill-then-subscribe sequence and the live dispatch loop.
pub struct SyncOrchestrator {
    gateway: Arc<dyn ChainGateway>,
    backfill: BackfillReconciler,
    live: Arc<LiveReconciler>,
}

impl SyncOrchestrator {
    pub fn new(
        gateway: Arc<dyn ChainGateway>,
        resolver: Arc<dyn MetadataResolver>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        let backfill =
            BackfillReconciler::new(Arc::clone(&gateway), Arc::clone(&resolver), Arc::clone(&store));
        let live = Arc::new(LiveReconciler::new(store, resolver));
        Self { gateway, backfill, live }
    }

    /// Run until the event stream ends (the gateway's delivery side drops).
    ///
    /// A backfill failure aborts before any subscription is registered;
    /// callers must treat that as fatal startup failure.
    pub async fn run(&self) -> Result<(), SyncError> {
        self.backfill.run().await?;

        let mut events = self.gateway.subscribe().await?;
        info!("backfill committed; live sync active");

        let mut tasks = JoinSet::new();
        while let Some(event) = events.recv().await {
            // Reap finished handlers so the set doesn't grow with uptime
            while let Some(finished) = tasks.try_join_next() {
                log_task_exit(finished);
            }

            debug!(event = event.name(), id = event.subject_id(), "event received");

            // No caller awaits a handler, and no ordering is re-established
            // across handlers: two events for the same item id can be in
            // flight at once, and the store sees last-write-wins.
            let live = Arc::clone(&self.live);
            tasks.spawn(async move {
                let name = event.name();
                let id = event.subject_id();
                if let Err(err) = live.apply(event).await {
                    warn!(event = name, id, %err, "event handler failed; event dropped");
                }
            });
        }

        // Stream closed; let in-flight handlers finish before returning
        while let Some(finished) = tasks.join_next().await {
            log_task_exit(finished);
        }

        info!("event stream closed; sync stopped");
        Ok(())
    }
}

fn log_task_exit(result: Result<(), tokio::task::JoinError>) {
    if let Err(err) = result {
        warn!(%err, "event handler task aborted");
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
