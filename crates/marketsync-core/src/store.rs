//! The record-store port.
//!
//! Typed per-collection CRUD consumed by both the backfill and live
//! reconcilers. Implementations live in `marketsync-storage` (memory,
//! SQLite). Per-record write atomicity is the only consistency primitive the
//! reconcilers rely on; there are no application-level transactions.

use async_trait::async_trait;

use crate::error::SyncError;
use crate::record::{CollectionRecord, ItemRecord, OfferRecord};

/// Store of the three mirrored record collections.
///
/// `save_*` operations upsert by the record's natural key. Listing methods
/// return records ordered by key so that two identical store states compare
/// equal element-wise.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // ── Collections ──────────────────────────────────────────────────────────

    /// Delete every collection record (backfill reset).
    async fn clear_collections(&self) -> Result<(), SyncError>;

    /// Bulk-insert collection records.
    async fn insert_collections(&self, records: Vec<CollectionRecord>) -> Result<(), SyncError>;

    /// Insert a single collection record.
    async fn insert_collection(&self, record: CollectionRecord) -> Result<(), SyncError>;

    /// All collection records, ordered by id.
    async fn collections(&self) -> Result<Vec<CollectionRecord>, SyncError>;

    // ── Items ────────────────────────────────────────────────────────────────

    /// Delete every item record (backfill reset).
    async fn clear_items(&self) -> Result<(), SyncError>;

    /// Bulk-insert item records.
    async fn insert_items(&self, records: Vec<ItemRecord>) -> Result<(), SyncError>;

    /// Look up an item by id.
    async fn find_item(&self, id: u64) -> Result<Option<ItemRecord>, SyncError>;

    /// Insert or replace an item record, keyed by id.
    async fn save_item(&self, record: ItemRecord) -> Result<(), SyncError>;

    /// All item records, ordered by id.
    async fn items(&self) -> Result<Vec<ItemRecord>, SyncError>;

    // ── Offers ───────────────────────────────────────────────────────────────

    /// Delete every offer record (backfill reset).
    async fn clear_offers(&self) -> Result<(), SyncError>;

    /// Bulk-insert offer records.
    async fn insert_offers(&self, records: Vec<OfferRecord>) -> Result<(), SyncError>;

    /// Look up the active offer for `(item_id, offerer)`.
    async fn find_offer(
        &self,
        item_id: u64,
        offerer: &str,
    ) -> Result<Option<OfferRecord>, SyncError>;

    /// Insert or replace an offer record, keyed by `(item_id, offerer)`.
    async fn save_offer(&self, record: OfferRecord) -> Result<(), SyncError>;

    /// Delete all offers for an item (claim cascade).
    async fn delete_offers_for_item(&self, item_id: u64) -> Result<(), SyncError>;

    /// All offer records, ordered by `(item_id, offerer)`.
    async fn offers(&self) -> Result<Vec<OfferRecord>, SyncError>;
}
