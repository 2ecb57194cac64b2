use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SortPositionStore, StoreError};
use crate::models::MealItem;

/// In-memory store, keyed by item id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<Uuid, MealItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, item_id: Uuid) -> Option<MealItem> {
        self.items.read().await.get(&item_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl SortPositionStore for MemoryStore {
    async fn load_items(&self, meal_id: Uuid) -> Result<Vec<MealItem>, StoreError> {
        let items = self.items.read().await;
        let mut meal_items: Vec<MealItem> = items
            .values()
            .filter(|item| item.meal_id == meal_id)
            .cloned()
            .collect();
        meal_items.sort_by(|a, b| {
            a.sort_position
                .cmp(&b.sort_position)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(meal_items)
    }

    async fn save_item(&self, item: &MealItem) -> Result<(), StoreError> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(())
    }

    async fn delete_item(&self, item_id: Uuid) -> Result<(), StoreError> {
        self.items
            .write()
            .await
            .remove(&item_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(item_id))
    }

    async fn set_sort_position_silently(
        &self,
        item_id: Uuid,
        sort_position: i64,
    ) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let item = items
            .get_mut(&item_id)
            .ok_or(StoreError::NotFound(item_id))?;
        item.sort_position = sort_position;
        Ok(())
    }
}
