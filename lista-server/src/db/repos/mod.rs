//! Repository implementations for item storage
//!
//! `ItemStore` is the seam between the HTTP layer and storage:
//! - `MySqlItemStore` talks to the `items` table
//! - `MemoryItemStore` keeps items in process, for tests and local runs

pub mod items;
pub mod memory;

use async_trait::async_trait;

use super::dsn::DsnError;
use crate::models::Item;

pub use items::MySqlItemStore;
pub use memory::MemoryItemStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("stored identifier is {len} bytes, expected 16")]
    InvalidUuid { len: usize },

    #[error("invalid connection string: {0}")]
    Dsn(#[from] DsnError),
}

/// Storage operations over the full item list.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items in storage scan order.
    async fn list(&self) -> Result<Vec<Item>, DbError>;

    /// Delete every item. Returns the number of rows removed.
    async fn clear(&self) -> Result<u64, DbError>;

    /// Append items one by one. Returns the number written.
    async fn insert(&self, items: &[Item]) -> Result<u64, DbError>;

    /// Replace the stored list with `items`.
    ///
    /// The default runs `clear` then `insert` with nothing in between;
    /// implementations that can do better should.
    async fn replace(&self, items: &[Item]) -> Result<u64, DbError> {
        self.clear().await?;
        self.insert(items).await
    }

    /// Check that storage is reachable.
    async fn ping(&self) -> Result<(), DbError>;
}
