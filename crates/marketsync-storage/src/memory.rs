//! In-memory record-store backend.
//!
//! Keeps all three record collections in RAM behind mutexes. Useful for
//! testing and short-lived runs that don't need persistence; all data is
//! lost when the process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use marketsync_core::error::SyncError;
use marketsync_core::record::{CollectionRecord, ItemRecord, OfferRecord};
use marketsync_core::store::RecordStore;

/// In-memory record store.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<u64, CollectionRecord>>,
    items: Mutex<HashMap<u64, ItemRecord>>,
    offers: Mutex<HashMap<(u64, String), OfferRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    // ── Collections ──────────────────────────────────────────────────────────

    async fn clear_collections(&self) -> Result<(), SyncError> {
        self.collections.lock().unwrap().clear();
        Ok(())
    }

    async fn insert_collections(&self, records: Vec<CollectionRecord>) -> Result<(), SyncError> {
        let mut map = self.collections.lock().unwrap();
        for record in records {
            map.insert(record.id, record);
        }
        Ok(())
    }

    async fn insert_collection(&self, record: CollectionRecord) -> Result<(), SyncError> {
        self.collections.lock().unwrap().insert(record.id, record);
        Ok(())
    }

    async fn collections(&self) -> Result<Vec<CollectionRecord>, SyncError> {
        let mut all: Vec<_> = self.collections.lock().unwrap().values().cloned().collect();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }

    // ── Items ────────────────────────────────────────────────────────────────

    async fn clear_items(&self) -> Result<(), SyncError> {
        self.items.lock().unwrap().clear();
        Ok(())
    }

    async fn insert_items(&self, records: Vec<ItemRecord>) -> Result<(), SyncError> {
        let mut map = self.items.lock().unwrap();
        for record in records {
            map.insert(record.id, record);
        }
        Ok(())
    }

    async fn find_item(&self, id: u64) -> Result<Option<ItemRecord>, SyncError> {
        Ok(self.items.lock().unwrap().get(&id).cloned())
    }

    async fn save_item(&self, record: ItemRecord) -> Result<(), SyncError> {
        self.items.lock().unwrap().insert(record.id, record);
        Ok(())
    }

    async fn items(&self) -> Result<Vec<ItemRecord>, SyncError> {
        let mut all: Vec<_> = self.items.lock().unwrap().values().cloned().collect();
        all.sort_by_key(|i| i.id);
        Ok(all)
    }

    // ── Offers ───────────────────────────────────────────────────────────────

    async fn clear_offers(&self) -> Result<(), SyncError> {
        self.offers.lock().unwrap().clear();
        Ok(())
    }

    async fn insert_offers(&self, records: Vec<OfferRecord>) -> Result<(), SyncError> {
        let mut map = self.offers.lock().unwrap();
        for record in records {
            map.insert((record.item_id, record.offerer.clone()), record);
        }
        Ok(())
    }

    async fn find_offer(
        &self,
        item_id: u64,
        offerer: &str,
    ) -> Result<Option<OfferRecord>, SyncError> {
        Ok(self
            .offers
            .lock()
            .unwrap()
            .get(&(item_id, offerer.to_string()))
            .cloned())
    }

    async fn save_offer(&self, record: OfferRecord) -> Result<(), SyncError> {
        self.offers
            .lock()
            .unwrap()
            .insert((record.item_id, record.offerer.clone()), record);
        Ok(())
    }

    async fn delete_offers_for_item(&self, item_id: u64) -> Result<(), SyncError> {
        self.offers
            .lock()
            .unwrap()
            .retain(|(id, _), _| *id != item_id);
        Ok(())
    }

    async fn offers(&self) -> Result<Vec<OfferRecord>, SyncError> {
        let mut all: Vec<_> = self.offers.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| (a.item_id, &a.offerer).cmp(&(b.item_id, &b.offerer)));
        Ok(all)
    }
}
