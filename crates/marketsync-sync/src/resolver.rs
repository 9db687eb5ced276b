//! The metadata-resolver port.
//!
//! Translates chain item identifiers into descriptive metadata and offer
//! lists. Content fetching (IPFS or otherwise) is an external concern behind
//! this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use marketsync_core::error::SyncError;

/// Descriptive metadata for one item, as resolved from content storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Current on-chain facts for one item plus its resolved metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedItem {
    /// Current holder.
    pub owner: String,
    /// Current asking price, decimal form (`"0"` = not listed).
    pub price: String,
    pub metadata: ItemMetadata,
}

/// One item as enumerated by the resolver's bulk load, decimal-form numerics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainItem {
    pub id: u64,
    pub nft_contract: String,
    pub token_id: String,
    pub owner: String,
    pub price: String,
}

/// One offer as surfaced by the resolver. The item id is implied by the
/// query, so it is not part of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOffer {
    pub offerer: String,
    pub seller: String,
    pub price: String,
    pub is_accepted: bool,
}

/// Resolver of item metadata and offer lists.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Resolve one item's current owner, price, and metadata.
    async fn resolve_item(&self, id: u64) -> Result<ResolvedItem, SyncError>;

    /// Enumerate every current item with metadata, positionally aligned:
    /// `metadata[i]` belongs to `items[i]`.
    async fn load_all_items(&self) -> Result<(Vec<ChainItem>, Vec<ItemMetadata>), SyncError>;

    /// The offer list for one item; empty if none. The first entry is the
    /// item's current offer.
    async fn offers(&self, item_id: u64) -> Result<Vec<ChainOffer>, SyncError>;
}

// ─── Fixture resolver (for tests and ephemeral runs) ──────────────────────────

/// Resolver serving fixed tables.
#[derive(Default)]
pub struct StaticResolver {
    items: HashMap<u64, ResolvedItem>,
    all_items: Vec<ChainItem>,
    all_metadata: Vec<ItemMetadata>,
    offers: HashMap<u64, Vec<ChainOffer>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, id: u64, resolved: ResolvedItem) -> Self {
        self.items.insert(id, resolved);
        self
    }

    pub fn with_all_items(mut self, items: Vec<ChainItem>, metadata: Vec<ItemMetadata>) -> Self {
        self.all_items = items;
        self.all_metadata = metadata;
        self
    }

    pub fn with_offers(mut self, item_id: u64, offers: Vec<ChainOffer>) -> Self {
        self.offers.insert(item_id, offers);
        self
    }
}

#[async_trait]
impl MetadataResolver for StaticResolver {
    async fn resolve_item(&self, id: u64) -> Result<ResolvedItem, SyncError> {
        self.items
            .get(&id)
            .cloned()
            .ok_or_else(|| SyncError::Resolver(format!("item {id} not resolvable")))
    }

    async fn load_all_items(&self) -> Result<(Vec<ChainItem>, Vec<ItemMetadata>), SyncError> {
        Ok((self.all_items.clone(), self.all_metadata.clone()))
    }

    async fn offers(&self, item_id: u64) -> Result<Vec<ChainOffer>, SyncError> {
        Ok(self.offers.get(&item_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_item_is_a_resolver_error() {
        let resolver = StaticResolver::new();
        assert!(resolver.resolve_item(1).await.is_err());
    }

    #[tokio::test]
    async fn offers_default_to_empty() {
        let resolver = StaticResolver::new().with_offers(
            7,
            vec![ChainOffer {
                offerer: "0xB".into(),
                seller: "0xS".into(),
                price: "100".into(),
                is_accepted: false,
            }],
        );
        assert_eq!(resolver.offers(7).await.unwrap().len(), 1);
        assert!(resolver.offers(8).await.unwrap().is_empty());
    }
}
