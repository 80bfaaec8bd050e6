//! MySQL item repository
//!
//! Identifiers are stored as BINARY(16). `replace` wraps the delete and the
//! inserts in one transaction, so a failed write leaves the previous list in
//! place and concurrent writers do not interleave.

use async_trait::async_trait;
use sqlx::{Connection, FromRow, MySqlConnection, MySqlPool};
use uuid::Uuid;

use super::{DbError, ItemStore};
use crate::models::Item;

/// Row shape of the `items` table
#[derive(Debug, FromRow)]
struct ItemRow {
    description: String,
    uuid: Vec<u8>,
    completed: bool,
}

impl TryFrom<ItemRow> for Item {
    type Error = DbError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            description: row.description,
            uuid: decode_uuid(&row.uuid)?,
            completed: row.completed,
        })
    }
}

/// Decode a BINARY(16) column into a UUID.
pub fn decode_uuid(bytes: &[u8]) -> Result<Uuid, DbError> {
    Uuid::from_slice(bytes).map_err(|_| DbError::InvalidUuid { len: bytes.len() })
}

/// Item repository backed by MySQL
#[derive(Debug, Clone)]
pub struct MySqlItemStore {
    pool: MySqlPool,
}

impl MySqlItemStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

async fn delete_all(conn: &mut MySqlConnection) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM items").execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

async fn insert_each(conn: &mut MySqlConnection, items: &[Item]) -> Result<u64, DbError> {
    let mut written = 0;
    for item in items {
        sqlx::query("INSERT INTO items (description, uuid, completed) VALUES (?, ?, ?)")
            .bind(&item.description)
            .bind(item.uuid.as_bytes().as_slice())
            .bind(item.completed)
            .execute(&mut *conn)
            .await?;
        written += 1;
    }
    Ok(written)
}

#[async_trait]
impl ItemStore for MySqlItemStore {
    async fn list(&self) -> Result<Vec<Item>, DbError> {
        let rows: Vec<ItemRow> = sqlx::query_as("SELECT description, uuid, completed FROM items")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Item::try_from).collect()
    }

    async fn clear(&self) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;
        delete_all(&mut conn).await
    }

    async fn insert(&self, items: &[Item]) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;
        insert_each(&mut conn, items).await
    }

    async fn replace(&self, items: &[Item]) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        let removed = delete_all(&mut tx).await?;
        let written = insert_each(&mut tx, items).await?;

        tx.commit().await?;

        tracing::debug!(removed, written, "replaced items");
        Ok(written)
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.pool.acquire().await?.ping().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool;

    #[test]
    fn decodes_sixteen_byte_identifier() {
        let id = Uuid::parse_str("0191c2b4-5e6f-7a80-9b1c-2d3e4f506172").unwrap();
        assert_eq!(decode_uuid(id.as_bytes()).unwrap(), id);
    }

    #[test]
    fn rejects_wrong_length_identifier() {
        let err = decode_uuid(&[0u8; 15]).unwrap_err();
        assert!(matches!(err, DbError::InvalidUuid { len: 15 }));

        let err = decode_uuid(&[]).unwrap_err();
        assert!(matches!(err, DbError::InvalidUuid { len: 0 }));
    }

    #[test]
    fn row_converts_to_item() {
        let id = Uuid::new_v4();
        let row = ItemRow {
            description: "water plants".into(),
            uuid: id.as_bytes().to_vec(),
            completed: true,
        };

        let item = Item::try_from(row).unwrap();
        assert_eq!(item, Item::new("water plants", id, true));
    }

    // Integration tests - run with DSN_LISTA set
    // cargo test -p lista-server -- --ignored

    async fn store() -> MySqlItemStore {
        let url = std::env::var("DSN_LISTA").expect("DSN_LISTA required");
        MySqlItemStore::new(create_pool(&url).await.expect("pool creation failed"))
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn replace_round_trips_identifiers() {
        let store = store().await;
        let items = vec![
            Item::new("a", Uuid::new_v4(), false),
            Item::new("b", Uuid::nil(), true),
        ];

        store.replace(&items).await.unwrap();
        let mut fetched = store.list().await.unwrap();
        fetched.sort_by(|a, b| a.description.cmp(&b.description));

        assert_eq!(fetched, items);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn second_replace_wins() {
        let store = store().await;
        store
            .replace(&[Item::new("first", Uuid::new_v4(), false)])
            .await
            .unwrap();
        let second = vec![Item::new("second", Uuid::new_v4(), true)];
        store.replace(&second).await.unwrap();

        assert_eq!(store.list().await.unwrap(), second);
    }
}
