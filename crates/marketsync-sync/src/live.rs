//! Live sync — one handler per contract event.
//!
//! Handlers are idempotent with respect to the current record state. Updates
//! against a missing record are logged no-ops; item state is never
//! reconstructed from a partial event payload.

use std::sync::Arc;
use tracing::{info, warn};

use alloy_primitives::U256;
use marketsync_core::error::SyncError;
use marketsync_core::event::{to_decimal, MarketEvent};
use marketsync_core::record::{CollectionRecord, ItemRecord, OfferRecord};
use marketsync_core::store::RecordStore;

use crate::resolver::MetadataResolver;

/// Applies incremental contract events to the record store.
pub struct LiveReconciler {
    store: Arc<dyn RecordStore>,
    resolver: Arc<dyn MetadataResolver>,
}

impl LiveReconciler {
    pub fn new(store: Arc<dyn RecordStore>, resolver: Arc<dyn MetadataResolver>) -> Self {
        Self { store, resolver }
    }

    /// Apply one event. An `Err` means the event was not applied and should
    /// be dropped by the caller; record-absence is not an error.
    pub async fn apply(&self, event: MarketEvent) -> Result<(), SyncError> {
        match event {
            MarketEvent::CollectionAdded { id, nft_collection } => {
                self.on_collection_added(id, nft_collection).await
            }
            MarketEvent::ItemAdded { id, nft_contract, token_id, owner } => {
                self.on_item_added(id, nft_contract, token_id, owner).await
            }
            MarketEvent::ItemListed { id, price, .. } => self.on_item_listed(id, price).await,
            MarketEvent::ItemSold { id, buyer, .. } => self.on_item_sold(id, buyer).await,
            MarketEvent::OfferPlaced { id, buyer, price, .. } => {
                self.on_offer_placed(id, buyer, price).await
            }
            MarketEvent::OfferAccepted { id, offerer } => {
                self.on_offer_accepted(id, offerer).await
            }
            MarketEvent::ItemClaimed { id, claimer } => self.on_item_claimed(id, claimer).await,
        }
    }

    async fn on_collection_added(&self, id: u64, nft_collection: String) -> Result<(), SyncError> {
        self.store
            .insert_collection(CollectionRecord { id, nft_collection })
            .await?;

        info!(id, "collection saved");
        Ok(())
    }

    async fn on_item_added(
        &self,
        id: u64,
        nft_contract: String,
        token_id: U256,
        owner: String,
    ) -> Result<(), SyncError> {
        // Metadata is fetched once, at creation; a resolver failure here is a
        // handler failure since the record cannot be built without it.
        let resolved = self.resolver.resolve_item(id).await.map_err(|err| {
            SyncError::Handler { handler: "ItemAdded".into(), reason: err.to_string() }
        })?;

        self.store
            .save_item(ItemRecord {
                id,
                nft_contract,
                token_id: to_decimal(token_id),
                owner,
                price: "0".into(),
                name: resolved.metadata.name,
                description: resolved.metadata.description,
                image: resolved.metadata.image,
            })
            .await?;

        info!(id, "item saved");
        Ok(())
    }

    async fn on_item_listed(&self, id: u64, price: U256) -> Result<(), SyncError> {
        let Some(mut item) = self.store.find_item(id).await? else {
            warn!(id, "item not found; listing dropped");
            return Ok(());
        };

        item.price = to_decimal(price);
        self.store.save_item(item).await?;

        info!(id, "item listed");
        Ok(())
    }

    async fn on_item_sold(&self, id: u64, buyer: String) -> Result<(), SyncError> {
        let Some(mut item) = self.store.find_item(id).await? else {
            warn!(id, "item not found; sale dropped");
            return Ok(());
        };

        item.owner = buyer;
        item.price = "0".into();
        self.store.save_item(item).await?;

        info!(id, "item sold");
        Ok(())
    }

    async fn on_offer_placed(&self, id: u64, buyer: String, price: U256) -> Result<(), SyncError> {
        // The event does not carry the seller; it is the item's current owner.
        let seller = match self.resolver.resolve_item(id).await {
            Ok(resolved) => resolved.owner,
            Err(err) => {
                warn!(id, %err, "item not resolvable; offer dropped");
                return Ok(());
            }
        };

        if let Some(mut offer) = self.store.find_offer(id, &buyer).await? {
            if offer.seller == seller {
                // Repeat offer from the same party: replace price, drop any
                // earlier acceptance.
                offer.price = to_decimal(price);
                offer.is_accepted = false;
                self.store.save_offer(offer).await?;

                info!(id, offerer = %buyer, "offer updated");
                return Ok(());
            }
        }

        self.store
            .save_offer(OfferRecord {
                item_id: id,
                offerer: buyer.clone(),
                seller,
                price: to_decimal(price),
                is_accepted: false,
            })
            .await?;

        info!(id, offerer = %buyer, "offer saved");
        Ok(())
    }

    async fn on_offer_accepted(&self, id: u64, offerer: String) -> Result<(), SyncError> {
        let Some(mut offer) = self.store.find_offer(id, &offerer).await? else {
            warn!(id, %offerer, "offer not found; acceptance dropped");
            return Ok(());
        };

        offer.is_accepted = true;
        self.store.save_offer(offer).await?;

        info!(id, %offerer, "offer accepted");
        Ok(())
    }

    async fn on_item_claimed(&self, id: u64, claimer: String) -> Result<(), SyncError> {
        match self.store.find_item(id).await? {
            Some(mut item) => {
                item.owner = claimer;
                item.price = "0".into();
                self.store.save_item(item).await?;
                info!(id, "item claimed");
            }
            None => warn!(id, "item not found; ownership update dropped"),
        }

        // The transfer is final either way; stale offers must not survive it.
        self.store.delete_offers_for_item(id).await?;
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
