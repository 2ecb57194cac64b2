//! Applies item mutations to open meals.
//!
//! The editor is the handler side of the event flow: each operation runs the
//! matching ordering helper, persists the changed positions through the
//! store and publishes what happened on the [`EventHub`].

use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::events::{DiaryEvent, EventHub};
use crate::models::{Meal, MealItem};
use crate::ordering::{self, Reconciliation, Transfer, TransferRequest};
use crate::store::{persist_changes, PersistReport, SortPositionStore, StoreError};

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Meal not open: {0}")]
    MealNotFound(Uuid),

    #[error("Meal item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Item {item_id} already belongs to meal {meal_id}")]
    AlreadyInMeal { item_id: Uuid, meal_id: Uuid },

    #[error("Invalid sort position: {0}")]
    InvalidPosition(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of an edit within one meal.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub reconciliation: Reconciliation,
    pub persisted: PersistReport,
}

/// Result of moving an item between meals.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOutcome {
    pub transfer: Transfer,
    pub source_persisted: PersistReport,
    pub target_persisted: PersistReport,
}

pub struct MealEditor<S> {
    store: S,
    hub: EventHub,
    meals: HashMap<Uuid, Meal>,
}

impl<S: SortPositionStore> MealEditor<S> {
    pub fn new(store: S, hub: EventHub) -> Self {
        Self {
            store,
            hub,
            meals: HashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    pub fn meal(&self, meal_id: Uuid) -> Option<&Meal> {
        self.meals.get(&meal_id)
    }

    /// Opens `meal`, replacing its items with what the store holds.
    pub async fn open(&mut self, mut meal: Meal) -> Result<&Meal, EditorError> {
        meal.items = self.store.load_items(meal.id).await?;
        let meal_id = meal.id;
        self.meals.insert(meal_id, meal);
        self.meals
            .get(&meal_id)
            .ok_or(EditorError::MealNotFound(meal_id))
    }

    pub fn close(&mut self, meal_id: Uuid) -> Option<Meal> {
        self.meals.remove(&meal_id)
    }

    /// Adds `item` to its meal at the slot named by its `sort_position`.
    ///
    /// Positions below 1 are rejected and nothing is written.
    pub async fn add_item(&mut self, item: MealItem) -> Result<EditOutcome, EditorError> {
        let meal_id = item.meal_id;
        let item_id = item.id;
        let position = item.sort_position;
        let items = self.items_of(meal_id)?;

        let reconciliation = ordering::insert_item(items, item);
        if reconciliation.dropped.is_some() {
            return Err(EditorError::InvalidPosition(position));
        }
        if let Some(placed) = reconciliation
            .items
            .iter()
            .find(|candidate| candidate.id == item_id)
        {
            self.store.save_item(placed).await?;
        }

        let outcome = self.finish(meal_id, reconciliation).await;
        self.hub.publish(DiaryEvent::ItemAdded { meal_id, item_id });
        self.publish_reconciled(meal_id, &outcome);
        Ok(outcome)
    }

    /// Drag-and-drop reorder within a meal.
    pub async fn move_item(
        &mut self,
        meal_id: Uuid,
        from_index: usize,
        to_index: usize,
    ) -> Result<EditOutcome, EditorError> {
        let items = self.items_of(meal_id)?;
        let item_id = items.get(from_index).map(|item| item.id);

        let reconciliation = ordering::move_item(items, from_index, to_index);
        let outcome = self.finish(meal_id, reconciliation).await;

        if let Some(item_id) = item_id {
            self.hub.publish(DiaryEvent::ItemMoved {
                meal_id,
                item_id,
                from_index,
                to_index,
            });
        }
        self.publish_reconciled(meal_id, &outcome);
        Ok(outcome)
    }

    /// Moves an item to 1-based `new_position` within its meal. Positions
    /// past the end move it to the end; positions below 1 are rejected.
    pub async fn update_position(
        &mut self,
        item_id: Uuid,
        new_position: i64,
    ) -> Result<EditOutcome, EditorError> {
        let meal_id = self.meal_of(item_id)?;
        let items = self.items_of(meal_id)?;

        let reconciliation = ordering::update_position(items, item_id, new_position);
        if reconciliation.dropped.is_some() {
            return Err(EditorError::InvalidPosition(new_position));
        }
        let outcome = self.finish(meal_id, reconciliation).await;

        self.hub
            .publish(DiaryEvent::ItemUpdated { meal_id, item_id });
        self.publish_reconciled(meal_id, &outcome);
        Ok(outcome)
    }

    pub async fn delete_item(&mut self, item_id: Uuid) -> Result<EditOutcome, EditorError> {
        let meal_id = self.meal_of(item_id)?;
        self.store.delete_item(item_id).await?;

        let items = self.items_of(meal_id)?;
        let (_, reconciliation) = ordering::remove_item(items, item_id);
        let outcome = self.finish(meal_id, reconciliation).await;

        self.hub
            .publish(DiaryEvent::ItemDeleted { meal_id, item_id });
        self.publish_reconciled(meal_id, &outcome);
        Ok(outcome)
    }

    /// Moves an item into another open meal.
    ///
    /// Reordering within the item's own meal is refused, as are target
    /// positions below 1; both leave the store untouched.
    pub async fn transfer_item(
        &mut self,
        request: TransferRequest,
    ) -> Result<TransferOutcome, EditorError> {
        let from_meal_id = self.meal_of(request.item_id)?;
        let to_meal_id = request.target_meal_id;
        if from_meal_id == to_meal_id {
            return Err(EditorError::AlreadyInMeal {
                item_id: request.item_id,
                meal_id: to_meal_id,
            });
        }
        if !self.meals.contains_key(&to_meal_id) {
            return Err(EditorError::MealNotFound(to_meal_id));
        }

        let source = self.items_of(from_meal_id)?;
        let target = self.items_of(to_meal_id)?;
        let transfer = ordering::transfer_item(source, target, &request)
            .ok_or(EditorError::ItemNotFound(request.item_id))?;
        if transfer.target.dropped.is_some() {
            return Err(EditorError::InvalidPosition(request.position));
        }

        if transfer.item.id != transfer.previous_id {
            self.store.delete_item(transfer.previous_id).await?;
        }
        self.store.save_item(&transfer.item).await?;

        let source_persisted = persist_changes(&self.store, &transfer.source.changed).await;
        let target_persisted = persist_changes(&self.store, &transfer.target.changed).await;
        self.put_items(from_meal_id, transfer.source.items.clone());
        self.put_items(to_meal_id, transfer.target.items.clone());

        self.hub.publish(DiaryEvent::ItemTransferred {
            from_meal_id,
            to_meal_id,
            old_item_id: transfer.previous_id,
            new_item_id: transfer.item.id,
        });
        for (meal_id, report) in [
            (from_meal_id, &source_persisted),
            (to_meal_id, &target_persisted),
        ] {
            if !report.written.is_empty() {
                self.hub.publish(DiaryEvent::PositionsReconciled {
                    meal_id,
                    changed: report.written.clone(),
                });
            }
        }

        Ok(TransferOutcome {
            transfer,
            source_persisted,
            target_persisted,
        })
    }

    fn meal_of(&self, item_id: Uuid) -> Result<Uuid, EditorError> {
        self.meals
            .values()
            .find(|meal| meal.item(item_id).is_some())
            .map(|meal| meal.id)
            .ok_or(EditorError::ItemNotFound(item_id))
    }

    /// Working copy of a meal's items; the open meal is only replaced once
    /// the store accepted the edit.
    fn items_of(&self, meal_id: Uuid) -> Result<Vec<MealItem>, EditorError> {
        self.meals
            .get(&meal_id)
            .map(|meal| meal.items.clone())
            .ok_or(EditorError::MealNotFound(meal_id))
    }

    fn put_items(&mut self, meal_id: Uuid, items: Vec<MealItem>) {
        if let Some(meal) = self.meals.get_mut(&meal_id) {
            meal.items = items;
        }
    }

    async fn finish(&mut self, meal_id: Uuid, reconciliation: Reconciliation) -> EditOutcome {
        let persisted = persist_changes(&self.store, &reconciliation.changed).await;
        if !persisted.is_complete() {
            tracing::warn!(
                %meal_id,
                failed = persisted.failed.len(),
                "Some sort positions were not persisted"
            );
        }
        self.put_items(meal_id, reconciliation.items.clone());
        EditOutcome {
            reconciliation,
            persisted,
        }
    }

    fn publish_reconciled(&self, meal_id: Uuid, outcome: &EditOutcome) {
        if !outcome.persisted.written.is_empty() {
            self.hub.publish(DiaryEvent::PositionsReconciled {
                meal_id,
                changed: outcome.persisted.written.clone(),
            });
        }
    }
}
