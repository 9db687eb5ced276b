//! marketsync-core — foundation for the marketplace mirror engine.
//!
//! # Architecture
//!
//! ```text
//! SyncOrchestrator
//!     ├── BackfillReconciler  (full rebuild from chain-queryable state)
//!     ├── LiveReconciler      (one handler per contract event)
//!     └── RecordStore backend (memory / SQLite)
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod record;
pub mod store;

pub use config::SyncConfig;
pub use error::SyncError;
pub use event::MarketEvent;
pub use record::{CollectionRecord, ItemRecord, OfferRecord};
pub use store::RecordStore;
