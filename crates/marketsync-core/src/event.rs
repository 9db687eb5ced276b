//! The contract event enumeration.
//!
//! The marketplace contract emits a fixed, known set of events, so dispatch
//! is a closed enum + match rather than name-keyed registration. Numeric
//! payload fields arrive as 256-bit chain words and are converted to decimal
//! strings at the storage boundary.

use alloy_primitives::U256;

/// A decoded marketplace contract event.
///
/// Field names mirror the contract's event parameters. `id` is the
/// chain-assigned collection or item index, already narrowed by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketEvent {
    CollectionAdded {
        id: u64,
        nft_collection: String,
    },
    ItemAdded {
        id: u64,
        nft_contract: String,
        token_id: U256,
        owner: String,
    },
    ItemListed {
        id: u64,
        nft_contract: String,
        token_id: U256,
        seller: String,
        price: U256,
    },
    ItemSold {
        id: u64,
        nft_contract: String,
        token_id: U256,
        seller: String,
        buyer: String,
        price: U256,
    },
    OfferPlaced {
        id: u64,
        nft_contract: String,
        token_id: U256,
        buyer: String,
        price: U256,
    },
    OfferAccepted {
        id: u64,
        offerer: String,
    },
    ItemClaimed {
        id: u64,
        claimer: String,
    },
}

impl MarketEvent {
    /// The contract event name, used as a structured log field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CollectionAdded { .. } => "CollectionAdded",
            Self::ItemAdded { .. } => "ItemAdded",
            Self::ItemListed { .. } => "ItemListed",
            Self::ItemSold { .. } => "ItemSold",
            Self::OfferPlaced { .. } => "OfferPlaced",
            Self::OfferAccepted { .. } => "OfferAccepted",
            Self::ItemClaimed { .. } => "ItemClaimed",
        }
    }

    /// The collection or item id the event refers to.
    pub fn subject_id(&self) -> u64 {
        match self {
            Self::CollectionAdded { id, .. }
            | Self::ItemAdded { id, .. }
            | Self::ItemListed { id, .. }
            | Self::ItemSold { id, .. }
            | Self::OfferPlaced { id, .. }
            | Self::OfferAccepted { id, .. }
            | Self::ItemClaimed { id, .. } => *id,
        }
    }
}

/// Convert a 256-bit chain word to the decimal-string form records store.
pub fn to_decimal(value: U256) -> String {
    value.to_string()
}
