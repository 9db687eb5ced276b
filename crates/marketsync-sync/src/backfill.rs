//! Backfill — full reconstruction of store state from the chain.
//!
//! Each record collection is rebuilt the same way: clear, fan out the reads
//! concurrently, then commit a single bulk insert once every fetch has
//! resolved. One failed fetch fails the whole rebuild; a partially
//! backfilled store is a correctness bug, not a tolerated degradation.

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::info;

use marketsync_core::error::SyncError;
use marketsync_core::record::{CollectionRecord, ItemRecord, OfferRecord};
use marketsync_core::store::RecordStore;

use crate::gateway::ChainGateway;
use crate::resolver::MetadataResolver;

/// Rebuilds the entire secondary store from current chain-queryable state.
pub struct BackfillReconciler {
    gateway: Arc<dyn ChainGateway>,
    resolver: Arc<dyn MetadataResolver>,
    store: Arc<dyn RecordStore>,
}

impl BackfillReconciler {
    pub fn new(
        gateway: Arc<dyn ChainGateway>,
        resolver: Arc<dyn MetadataResolver>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self { gateway, resolver, store }
    }

    /// Rebuild all three record collections. Any error aborts; the caller
    /// must treat a failed backfill as fatal startup failure.
    pub async fn run(&self) -> Result<(), SyncError> {
        self.backfill_collections().await?;
        self.backfill_items().await?;
        self.backfill_offers().await?;
        info!("backfill complete");
        Ok(())
    }

    async fn backfill_collections(&self) -> Result<(), SyncError> {
        self.store.clear_collections().await?;

        let count = self.gateway.collection_count().await?;
        let fetches: Vec<_> = (1..=count).map(|id| self.gateway.collection(id)).collect();
        let addresses = try_join_all(fetches).await?;

        let records: Vec<CollectionRecord> = addresses
            .into_iter()
            .enumerate()
            .map(|(i, nft_collection)| CollectionRecord {
                id: i as u64 + 1,
                nft_collection,
            })
            .collect();

        self.store.insert_collections(records).await?;

        info!(count, "collections backfilled");
        Ok(())
    }

    async fn backfill_items(&self) -> Result<(), SyncError> {
        self.store.clear_items().await?;

        let (items, metadata) = self.resolver.load_all_items().await?;
        if items.len() != metadata.len() {
            return Err(SyncError::Resolver(format!(
                "item list ({}) and metadata list ({}) are not positionally aligned",
                items.len(),
                metadata.len()
            )));
        }

        let count = items.len();
        let records: Vec<ItemRecord> = items
            .into_iter()
            .zip(metadata)
            .map(|(item, meta)| ItemRecord {
                id: item.id,
                nft_contract: item.nft_contract,
                token_id: item.token_id,
                owner: item.owner,
                price: item.price,
                name: meta.name,
                description: meta.description,
                image: meta.image,
            })
            .collect();

        self.store.insert_items(records).await?;

        info!(count, "items backfilled");
        Ok(())
    }

    async fn backfill_offers(&self) -> Result<(), SyncError> {
        self.store.clear_offers().await?;

        let count = self.gateway.item_count().await?;
        let fetches: Vec<_> = (1..=count)
            .map(|item_id| {
                let resolver = Arc::clone(&self.resolver);
                async move { resolver.offers(item_id).await.map(|offers| (item_id, offers)) }
            })
            .collect();
        let results = try_join_all(fetches).await?;

        // An item surfaces at most one current offer; the rest of the list
        // is history and is not mirrored.
        let records: Vec<OfferRecord> = results
            .into_iter()
            .filter_map(|(item_id, offers)| {
                offers.into_iter().next().map(|offer| OfferRecord {
                    item_id,
                    offerer: offer.offerer,
                    seller: offer.seller,
                    price: offer.price,
                    is_accepted: offer.is_accepted,
                })
            })
            .collect();

        let offer_count = records.len();
        self.store.insert_offers(records).await?;

        info!(items = count, offers = offer_count, "offers backfilled");
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::StaticGateway;
    use crate::resolver::{ChainItem, ChainOffer, ItemMetadata, StaticResolver};
    use marketsync_storage::MemoryStore;

    fn chain_item(id: u64, owner: &str, price: &str) -> ChainItem {
        ChainItem {
            id,
            nft_contract: "0xC1".into(),
            token_id: id.to_string(),
            owner: owner.into(),
            price: price.into(),
        }
    }

    fn metadata(name: &str) -> ItemMetadata {
        ItemMetadata {
            name: Some(name.into()),
            description: Some("D".into()),
            image: Some("I".into()),
        }
    }

    fn chain_offer(offerer: &str, price: &str) -> ChainOffer {
        ChainOffer {
            offerer: offerer.into(),
            seller: "0xS".into(),
            price: price.into(),
            is_accepted: false,
        }
    }

    fn fixture() -> (Arc<StaticGateway>, Arc<StaticResolver>, Arc<MemoryStore>) {
        let gateway = Arc::new(StaticGateway::new(vec!["0xA".into(), "0xB".into()], 3));
        let resolver = Arc::new(
            StaticResolver::new()
                .with_all_items(
                    vec![
                        chain_item(1, "0xO1", "0"),
                        chain_item(2, "0xO2", "500"),
                        chain_item(3, "0xO3", "0"),
                    ],
                    vec![metadata("One"), metadata("Two"), metadata("Three")],
                )
                .with_offers(2, vec![chain_offer("0xB1", "400"), chain_offer("0xB2", "300")]),
        );
        let store = Arc::new(MemoryStore::new());
        (gateway, resolver, store)
    }

    #[tokio::test]
    async fn rebuilds_all_three_collections() {
        let (gateway, resolver, store) = fixture();
        let backfill = BackfillReconciler::new(gateway, resolver, store.clone());

        backfill.run().await.unwrap();

        let collections = store.collections().await.unwrap();
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0], CollectionRecord { id: 1, nft_collection: "0xA".into() });

        let items = store.items().await.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].name.as_deref(), Some("Two"));
        assert_eq!(items[1].price, "500");

        // Items 1 and 3 have no offers; item 2 contributes only its first
        let offers = store.offers().await.unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].item_id, 2);
        assert_eq!(offers[0].offerer, "0xB1");
        assert_eq!(offers[0].price, "400");
    }

    #[tokio::test]
    async fn backfill_is_idempotent() {
        let (gateway, resolver, store) = fixture();
        let backfill = BackfillReconciler::new(gateway, resolver, store.clone());

        backfill.run().await.unwrap();
        let first = (
            store.collections().await.unwrap(),
            store.items().await.unwrap(),
            store.offers().await.unwrap(),
        );

        backfill.run().await.unwrap();
        let second = (
            store.collections().await.unwrap(),
            store.items().await.unwrap(),
            store.offers().await.unwrap(),
        );

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn replaces_stale_records() {
        let (gateway, resolver, store) = fixture();
        store
            .insert_collections(vec![CollectionRecord { id: 99, nft_collection: "0xSTALE".into() }])
            .await
            .unwrap();

        BackfillReconciler::new(gateway, resolver, store.clone())
            .run()
            .await
            .unwrap();

        let collections = store.collections().await.unwrap();
        assert!(collections.iter().all(|c| c.id != 99));
    }

    #[tokio::test]
    async fn misaligned_metadata_aborts() {
        let gateway = Arc::new(StaticGateway::new(vec![], 0));
        let resolver = Arc::new(StaticResolver::new().with_all_items(
            vec![chain_item(1, "0xO1", "0")],
            vec![], // missing metadata entry
        ));
        let store = Arc::new(MemoryStore::new());

        let result = BackfillReconciler::new(gateway, resolver, store).run().await;
        assert!(matches!(result, Err(SyncError::Resolver(_))));
    }
}
