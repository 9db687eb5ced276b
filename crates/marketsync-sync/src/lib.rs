//! marketsync-sync — the event-to-state reconciliation engine.
//!
//! # Phase 1: BACKFILL
//! Replace the entire contents of each record collection with a snapshot
//! derived from current chain-queryable state. Any fetch failure aborts the
//! whole backfill; live sync must never start over a store that could not be
//! fully rebuilt.
//!
//! # Phase 2: LIVE
//! Subscribe to contract events and apply them incrementally, one handler
//! per event type. Handlers run as detached tasks; failures are logged and
//! the event dropped, never stopping the subscription.

pub mod backfill;
pub mod builder;
pub mod gateway;
pub mod live;
pub mod logging;
pub mod orchestrator;
pub mod resolver;

pub use backfill::BackfillReconciler;
pub use builder::SyncBuilder;
pub use gateway::{ChainGateway, EventStream, StaticGateway};
pub use live::LiveReconciler;
pub use logging::init_tracing;
pub use orchestrator::SyncOrchestrator;
pub use resolver::{ChainItem, ChainOffer, ItemMetadata, MetadataResolver, ResolvedItem, StaticResolver};
