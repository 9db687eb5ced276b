//! The chain-gateway port.
//!
//! Transport, contract call encoding, and event decoding are external
//! concerns; this trait is the engine's view of them. The contract's read
//! surface is closed, so the methods are typed rather than a generic
//! call-by-name.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

use marketsync_core::error::SyncError;
use marketsync_core::event::MarketEvent;

/// Stream of decoded contract events, in emission order per subscription.
pub type EventStream = mpsc::UnboundedReceiver<MarketEvent>;

/// Read access to the marketplace contract plus event subscription.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Number of registered collections (`collectionCount`).
    async fn collection_count(&self) -> Result<u64, SyncError>;

    /// The on-chain identifier of collection `id` (`collections(id)`).
    async fn collection(&self, id: u64) -> Result<String, SyncError>;

    /// Number of items ever added (`itemCount`).
    async fn item_count(&self) -> Result<u64, SyncError>;

    /// Subscribe to all marketplace contract events.
    ///
    /// The stream ends when the gateway's delivery side is dropped.
    async fn subscribe(&self) -> Result<EventStream, SyncError>;
}

// ─── In-memory gateway (for tests and ephemeral runs) ─────────────────────────

/// Gateway serving fixed chain state and a caller-fed event stream.
///
/// Events sent through the handle from [`StaticGateway::take_sender`] are
/// delivered to the stream handed out by `subscribe`. Useful for tests and
/// dry runs; a real deployment plugs in a transport-backed implementation.
pub struct StaticGateway {
    collections: Vec<String>,
    item_count: u64,
    sender: Mutex<Option<mpsc::UnboundedSender<MarketEvent>>>,
    receiver: Mutex<Option<EventStream>>,
    subscribe_calls: AtomicUsize,
}

impl StaticGateway {
    pub fn new(collections: Vec<String>, item_count: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            collections,
            item_count,
            sender: Mutex::new(Some(tx)),
            receiver: Mutex::new(Some(rx)),
            subscribe_calls: AtomicUsize::new(0),
        }
    }

    /// Take the delivery handle. Dropping every clone of it ends the event
    /// stream, which lets callers drive a subscription to completion.
    pub fn take_sender(&self) -> mpsc::UnboundedSender<MarketEvent> {
        self.sender
            .lock()
            .unwrap()
            .take()
            .expect("delivery handle already taken")
    }

    /// How many times `subscribe` has been called.
    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ChainGateway for StaticGateway {
    async fn collection_count(&self) -> Result<u64, SyncError> {
        Ok(self.collections.len() as u64)
    }

    async fn collection(&self, id: u64) -> Result<String, SyncError> {
        // Chain indices start at 1
        id.checked_sub(1)
            .and_then(|i| self.collections.get(i as usize))
            .cloned()
            .ok_or_else(|| SyncError::Rpc(format!("unknown collection index {id}")))
    }

    async fn item_count(&self) -> Result<u64, SyncError> {
        Ok(self.item_count)
    }

    async fn subscribe(&self) -> Result<EventStream, SyncError> {
        self.subscribe_calls.fetch_add(1, Ordering::Relaxed);
        self.receiver
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| SyncError::Rpc("subscription already taken".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn collection_reads_are_one_indexed() {
        let gw = StaticGateway::new(vec!["0xA".into(), "0xB".into()], 0);
        assert_eq!(gw.collection_count().await.unwrap(), 2);
        assert_eq!(gw.collection(1).await.unwrap(), "0xA");
        assert_eq!(gw.collection(2).await.unwrap(), "0xB");
        assert!(gw.collection(0).await.is_err());
        assert!(gw.collection(3).await.is_err());
    }

    #[tokio::test]
    async fn stream_ends_when_delivery_handle_drops() {
        let gw = StaticGateway::new(vec![], 0);
        let sender = gw.take_sender();
        let mut stream = gw.subscribe().await.unwrap();

        sender
            .send(MarketEvent::CollectionAdded { id: 1, nft_collection: "0xABC".into() })
            .unwrap();
        drop(sender);

        let ev = stream.recv().await.unwrap();
        assert_eq!(ev.name(), "CollectionAdded");
        assert!(stream.recv().await.is_none());
    }

    #[tokio::test]
    async fn second_subscribe_is_rejected() {
        let gw = StaticGateway::new(vec![], 0);
        let _stream = gw.subscribe().await.unwrap();
        assert!(gw.subscribe().await.is_err());
        assert_eq!(gw.subscribe_calls(), 2);
    }
}
