//! Persisted record types — the three entities the secondary store owns.
//!
//! The chain is the source of truth for the facts these records encode; the
//! store is the sole owner of the records themselves. None of them survives a
//! full backfill reset except by being re-derived from current chain state.

use serde::{Deserialize, Serialize};

// ─── CollectionRecord ─────────────────────────────────────────────────────────

/// One registered NFT collection. Created during backfill or on a
/// collection-added event; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    /// Chain-assigned sequential collection index (starts at 1).
    pub id: u64,
    /// Address of the NFT collection contract.
    pub nft_collection: String,
}

// ─── ItemRecord ───────────────────────────────────────────────────────────────

/// One marketplace item. `price == "0"` means the item is not listed.
///
/// Descriptive metadata is resolved once when the record is created and never
/// refetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Chain-assigned item id (starts at 1).
    pub id: u64,
    /// Address of the NFT contract the token belongs to.
    pub nft_contract: String,
    /// Token id within the contract, decimal form.
    pub token_id: String,
    /// Current holder.
    pub owner: String,
    /// Asking price in decimal form; `"0"` when not listed.
    pub price: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ItemRecord {
    /// Returns `true` if the item is currently listed for sale.
    pub fn is_listed(&self) -> bool {
        self.price != "0"
    }
}

// ─── OfferRecord ──────────────────────────────────────────────────────────────

/// One active offer, keyed by `(item_id, offerer)` — at most one per pair.
///
/// A repeat offer from the same offerer replaces price and resets
/// `is_accepted` rather than creating a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub item_id: u64,
    /// Address that placed the offer.
    pub offerer: String,
    /// Item owner at the time the offer was placed.
    pub seller: String,
    /// Offered price in decimal form.
    pub price: String,
    pub is_accepted: bool,
}

// ─── Tests ────────────────────────────────────────────────────────────────────
