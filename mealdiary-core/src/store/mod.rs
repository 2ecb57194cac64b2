//! Storage boundary used to persist item positions.
//!
//! The ordering logic only decides *which* items need a new position; the
//! store owns how that is written. [`persist_changes`] writes each delta
//! independently so one failed write never undoes the in-memory order.

mod error;
mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::MealItem;

pub use error::StoreError;
pub use memory::MemoryStore;

#[async_trait]
pub trait SortPositionStore: Send + Sync {
    /// Items of a meal ordered by `sort_position`.
    async fn load_items(&self, meal_id: Uuid) -> Result<Vec<MealItem>, StoreError>;

    /// Inserts or replaces a whole item.
    async fn save_item(&self, item: &MealItem) -> Result<(), StoreError>;

    async fn delete_item(&self, item_id: Uuid) -> Result<(), StoreError>;

    /// Writes only `sort_position`.
    ///
    /// Must not touch `updated_at` or trigger change notifications, so that
    /// observers refreshing on changes do not feed back into another
    /// reconciliation.
    async fn set_sort_position_silently(
        &self,
        item_id: Uuid,
        sort_position: i64,
    ) -> Result<(), StoreError>;
}

/// Outcome of writing back a reconciliation's changed positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistReport {
    pub written: Vec<Uuid>,
    pub failed: Vec<Uuid>,
}

impl PersistReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Silently writes the position of every changed item.
///
/// Failures are logged and collected; the remaining writes still run.
pub async fn persist_changes<S>(store: &S, changed: &[MealItem]) -> PersistReport
where
    S: SortPositionStore + ?Sized,
{
    let mut report = PersistReport::default();

    for item in changed {
        match store
            .set_sort_position_silently(item.id, item.sort_position)
            .await
        {
            Ok(()) => report.written.push(item.id),
            Err(e) => {
                tracing::warn!(
                    item_id = %item.id,
                    sort_position = item.sort_position,
                    "Failed to persist sort position: {}",
                    e
                );
                report.failed.push(item.id);
            }
        }
    }

    report
}
