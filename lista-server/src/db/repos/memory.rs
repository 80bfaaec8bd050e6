//! In-process item store
//!
//! Same contract as the MySQL store, minus persistence. `replace` holds the
//! write lock for the whole swap.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, ItemStore};
use crate::models::Item;

#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: RwLock<Vec<Item>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list(&self) -> Result<Vec<Item>, DbError> {
        Ok(self.items.read().await.clone())
    }

    async fn clear(&self) -> Result<u64, DbError> {
        let mut items = self.items.write().await;
        let removed = items.len() as u64;
        items.clear();
        Ok(removed)
    }

    async fn insert(&self, items: &[Item]) -> Result<u64, DbError> {
        self.items.write().await.extend_from_slice(items);
        Ok(items.len() as u64)
    }

    async fn replace(&self, items: &[Item]) -> Result<u64, DbError> {
        *self.items.write().await = items.to_vec();
        Ok(items.len() as u64)
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn clear_then_insert_matches_replace() {
        let first = vec![Item::new("old", Uuid::new_v4(), false)];
        let second = vec![
            Item::new("new", Uuid::new_v4(), true),
            Item::new("newer", Uuid::nil(), false),
        ];

        let store = MemoryItemStore::with_items(first);
        assert_eq!(store.clear().await.unwrap(), 1);
        assert_eq!(store.insert(&second).await.unwrap(), 2);

        let other = MemoryItemStore::new();
        other.replace(&second).await.unwrap();

        assert_eq!(store.list().await.unwrap(), other.list().await.unwrap());
    }

    #[tokio::test]
    async fn insert_appends_duplicates() {
        let item = Item::new("same", Uuid::nil(), false);
        let store = MemoryItemStore::new();
        store.insert(&[item.clone()]).await.unwrap();
        store.insert(&[item.clone()]).await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec![item.clone(), item]);
    }
}
