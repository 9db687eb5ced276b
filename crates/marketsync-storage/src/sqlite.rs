//! SQLite record-store backend.
//!
//! Persists the three record collections to a single SQLite file. Uses
//! `sqlx` with WAL mode for concurrent read performance.
//!
//! # Usage
//! ```rust,no_run
//! use marketsync_storage::sqlite::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // File-backed (persistent)
//! let store = SqliteStore::open("./marketsync.db").await?;
//!
//! // In-memory (tests / ephemeral)
//! let store = SqliteStore::in_memory().await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use marketsync_core::error::SyncError;
use marketsync_core::record::{CollectionRecord, ItemRecord, OfferRecord};
use marketsync_core::store::RecordStore;

/// SQLite-backed record store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) a SQLite database at `path`.
    ///
    /// The path may be a plain file path (`"./marketsync.db"`) or a full
    /// SQLite URL (`"sqlite:./marketsync.db?mode=rwc"`).
    pub async fn open(path: &str) -> Result<Self, SyncError> {
        let url = if path.starts_with("sqlite:") {
            path.to_string()
        } else {
            format!("sqlite:{path}?mode=rwc")
        };

        let pool = SqlitePool::connect(&url)
            .await
            .map_err(|e| SyncError::Storage(e.to_string()))?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Open an in-memory SQLite database.
    ///
    /// All data is lost when the pool is dropped. Ideal for tests.
    pub async fn in_memory() -> Result<Self, SyncError> {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .map_err(|e| SyncError::Storage(e.to_string()))?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create tables and enable WAL mode.
    async fn init_schema(&self) -> Result<(), SyncError> {
        sqlx::query("PRAGMA journal_mode=WAL;")
            .execute(&self.pool)
            .await
            .map_err(|e| SyncError::Storage(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS collections (
                id             INTEGER PRIMARY KEY,
                nft_collection TEXT    NOT NULL
            );",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| SyncError::Storage(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS items (
                id           INTEGER PRIMARY KEY,
                nft_contract TEXT    NOT NULL,
                token_id     TEXT    NOT NULL,
                owner        TEXT    NOT NULL,
                price        TEXT    NOT NULL,
                name         TEXT,
                description  TEXT,
                image        TEXT
            );",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| SyncError::Storage(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS offers (
                item_id     INTEGER NOT NULL,
                offerer     TEXT    NOT NULL,
                seller      TEXT    NOT NULL,
                price       TEXT    NOT NULL,
                is_accepted INTEGER NOT NULL,
                PRIMARY KEY (item_id, offerer)
            );",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| SyncError::Storage(e.to_string()))?;

        // Claim cascade deletes by item_id alone
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_offers_item ON offers (item_id);")
            .execute(&self.pool)
            .await
            .map_err(|e| SyncError::Storage(e.to_string()))?;

        Ok(())
    }
}

fn item_from_row(row: &sqlx::sqlite::SqliteRow) -> ItemRecord {
    ItemRecord {
        id: row.get::<i64, _>("id") as u64,
        nft_contract: row.get("nft_contract"),
        token_id: row.get("token_id"),
        owner: row.get("owner"),
        price: row.get("price"),
        name: row.get("name"),
        description: row.get("description"),
        image: row.get("image"),
    }
}

fn offer_from_row(row: &sqlx::sqlite::SqliteRow) -> OfferRecord {
    OfferRecord {
        item_id: row.get::<i64, _>("item_id") as u64,
        offerer: row.get("offerer"),
        seller: row.get("seller"),
        price: row.get("price"),
        is_accepted: row.get("is_accepted"),
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    // ── Collections ──────────────────────────────────────────────────────────

    async fn clear_collections(&self) -> Result<(), SyncError> {
        sqlx::query("DELETE FROM collections")
            .execute(&self.pool)
            .await
            .map_err(|e| SyncError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn insert_collections(&self, records: Vec<CollectionRecord>) -> Result<(), SyncError> {
        for record in records {
            self.insert_collection(record).await?;
        }
        Ok(())
    }

    async fn insert_collection(&self, record: CollectionRecord) -> Result<(), SyncError> {
        sqlx::query(
            "INSERT OR REPLACE INTO collections (id, nft_collection) VALUES (?, ?)",
        )
        .bind(record.id as i64)
        .bind(&record.nft_collection)
        .execute(&self.pool)
        .await
        .map_err(|e| SyncError::Storage(e.to_string()))?;

        debug!(id = record.id, "collection stored");
        Ok(())
    }

    async fn collections(&self) -> Result<Vec<CollectionRecord>, SyncError> {
        let rows = sqlx::query("SELECT id, nft_collection FROM collections ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SyncError::Storage(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|row| CollectionRecord {
                id: row.get::<i64, _>("id") as u64,
                nft_collection: row.get("nft_collection"),
            })
            .collect())
    }

    // ── Items ────────────────────────────────────────────────────────────────

    async fn clear_items(&self) -> Result<(), SyncError> {
        sqlx::query("DELETE FROM items")
            .execute(&self.pool)
            .await
            .map_err(|e| SyncError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn insert_items(&self, records: Vec<ItemRecord>) -> Result<(), SyncError> {
        for record in records {
            self.save_item(record).await?;
        }
        Ok(())
    }

    async fn find_item(&self, id: u64) -> Result<Option<ItemRecord>, SyncError> {
        let row = sqlx::query(
            "SELECT id, nft_contract, token_id, owner, price, name, description, image
             FROM items WHERE id = ?",
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SyncError::Storage(e.to_string()))?;

        Ok(row.as_ref().map(item_from_row))
    }

    async fn save_item(&self, record: ItemRecord) -> Result<(), SyncError> {
        sqlx::query(
            "INSERT OR REPLACE INTO items
             (id, nft_contract, token_id, owner, price, name, description, image)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id as i64)
        .bind(&record.nft_contract)
        .bind(&record.token_id)
        .bind(&record.owner)
        .bind(&record.price)
        .bind(&record.name)
        .bind(&record.description)
        .bind(&record.image)
        .execute(&self.pool)
        .await
        .map_err(|e| SyncError::Storage(e.to_string()))?;

        debug!(id = record.id, price = %record.price, "item stored");
        Ok(())
    }

    async fn items(&self) -> Result<Vec<ItemRecord>, SyncError> {
        let rows = sqlx::query(
            "SELECT id, nft_contract, token_id, owner, price, name, description, image
             FROM items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SyncError::Storage(e.to_string()))?;

        Ok(rows.iter().map(item_from_row).collect())
    }

    // ── Offers ───────────────────────────────────────────────────────────────

    async fn clear_offers(&self) -> Result<(), SyncError> {
        sqlx::query("DELETE FROM offers")
            .execute(&self.pool)
            .await
            .map_err(|e| SyncError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn insert_offers(&self, records: Vec<OfferRecord>) -> Result<(), SyncError> {
        for record in records {
            self.save_offer(record).await?;
        }
        Ok(())
    }

    async fn find_offer(
        &self,
        item_id: u64,
        offerer: &str,
    ) -> Result<Option<OfferRecord>, SyncError> {
        let row = sqlx::query(
            "SELECT item_id, offerer, seller, price, is_accepted
             FROM offers WHERE item_id = ? AND offerer = ?",
        )
        .bind(item_id as i64)
        .bind(offerer)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SyncError::Storage(e.to_string()))?;

        Ok(row.as_ref().map(offer_from_row))
    }

    async fn save_offer(&self, record: OfferRecord) -> Result<(), SyncError> {
        sqlx::query(
            "INSERT OR REPLACE INTO offers (item_id, offerer, seller, price, is_accepted)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.item_id as i64)
        .bind(&record.offerer)
        .bind(&record.seller)
        .bind(&record.price)
        .bind(record.is_accepted)
        .execute(&self.pool)
        .await
        .map_err(|e| SyncError::Storage(e.to_string()))?;

        debug!(item_id = record.item_id, offerer = %record.offerer, "offer stored");
        Ok(())
    }

    async fn delete_offers_for_item(&self, item_id: u64) -> Result<(), SyncError> {
        sqlx::query("DELETE FROM offers WHERE item_id = ?")
            .bind(item_id as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| SyncError::Storage(e.to_string()))?;

        debug!(item_id, "offers deleted");
        Ok(())
    }

    async fn offers(&self) -> Result<Vec<OfferRecord>, SyncError> {
        let rows = sqlx::query(
            "SELECT item_id, offerer, seller, price, is_accepted
             FROM offers ORDER BY item_id, offerer",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SyncError::Storage(e.to_string()))?;

        Ok(rows.iter().map(offer_from_row).collect())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(id: u64, price: &str) -> ItemRecord {
        ItemRecord {
            id,
            nft_contract: "0xC1".into(),
            token_id: id.to_string(),
            owner: "0xO1".into(),
            price: price.into(),
            name: Some(format!("Item {id}")),
            description: None,
            image: Some("ipfs://img".into()),
        }
    }

    fn sample_offer(item_id: u64, offerer: &str, price: &str) -> OfferRecord {
        OfferRecord {
            item_id,
            offerer: offerer.into(),
            seller: "0xS".into(),
            price: price.into(),
            is_accepted: false,
        }
    }

    #[tokio::test]
    async fn item_roundtrip_with_optional_metadata() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.save_item(sample_item(7, "0")).await.unwrap();

        let loaded = store.find_item(7).await.unwrap().unwrap();
        assert_eq!(loaded.name.as_deref(), Some("Item 7"));
        assert_eq!(loaded.description, None);
        assert_eq!(loaded.price, "0");
    }

    #[tokio::test]
    async fn item_save_is_upsert() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.save_item(sample_item(1, "0")).await.unwrap();
        store.save_item(sample_item(1, "500")).await.unwrap();

        let all = store.items().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].price, "500");
    }

    #[tokio::test]
    async fn offer_natural_key_upsert() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.save_offer(sample_offer(7, "0xB", "100")).await.unwrap();

        let mut second = sample_offer(7, "0xB", "200");
        second.is_accepted = true;
        store.save_offer(second).await.unwrap();

        let all = store.offers().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].price, "200");
        assert!(all[0].is_accepted);
    }

    #[tokio::test]
    async fn delete_offers_cascade_scoped_to_item() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.save_offer(sample_offer(7, "0xB", "100")).await.unwrap();
        store.save_offer(sample_offer(7, "0xB2", "150")).await.unwrap();
        store.save_offer(sample_offer(8, "0xB", "300")).await.unwrap();

        store.delete_offers_for_item(7).await.unwrap();

        let all = store.offers().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].item_id, 8);
    }

    #[tokio::test]
    async fn clear_then_bulk_insert_replaces_contents() {
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .insert_collections(vec![CollectionRecord { id: 1, nft_collection: "0xOLD".into() }])
            .await
            .unwrap();

        store.clear_collections().await.unwrap();
        store
            .insert_collections(vec![
                CollectionRecord { id: 1, nft_collection: "0xA".into() },
                CollectionRecord { id: 2, nft_collection: "0xB".into() },
            ])
            .await
            .unwrap();

        let all = store.collections().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].nft_collection, "0xA");
    }

    #[tokio::test]
    async fn find_missing_returns_none() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.find_item(999).await.unwrap().is_none());
        assert!(store.find_offer(999, "0xB").await.unwrap().is_none());
    }
}
