//! List operations layered on top of [`reconcile`](super::reconcile).
//!
//! Each helper takes a meal's items as they are persisted, applies a single
//! mutation and reconciles. Changes are reported against the persisted
//! positions, so an item whose stored position moved is always included.

use uuid::Uuid;

use super::reconcile::{positions_of, reconcile_against, Reconciliation};
use crate::models::MealItem;

/// Inserts `item` at the slot named by its `sort_position`.
///
/// Positions past the end append. The new item itself is never reported in
/// `changed`; it still has to be created by the caller.
pub fn insert_item(mut items: Vec<MealItem>, item: MealItem) -> Reconciliation {
    let baseline = positions_of(&items);
    let anchor_id = item.id;
    items.push(item);
    reconcile_against(items, Some(anchor_id), false, &baseline)
}

/// Drag-and-drop move of the item at `from_index` so it lands before the
/// item currently at `to_index`. A `to_index` equal to the length moves the
/// item to the end.
///
/// An out of range `from_index` only renumbers; a `to_index` past the end
/// is treated as the end.
pub fn move_item(mut items: Vec<MealItem>, from_index: usize, to_index: usize) -> Reconciliation {
    let baseline = positions_of(&items);
    if from_index >= items.len() {
        return reconcile_against(items, None, false, &baseline);
    }

    let to_index = to_index.min(items.len());
    let item = &mut items[from_index];
    item.sort_position = to_index as i64 + 1;
    let anchor_id = item.id;
    reconcile_against(items, Some(anchor_id), to_index > from_index, &baseline)
}

/// Moves an item so that it ends up at 1-based `new_position`.
///
/// Unknown ids only renumber.
pub fn update_position(items: Vec<MealItem>, item_id: Uuid, new_position: i64) -> Reconciliation {
    let Some(from_index) = items.iter().position(|item| item.id == item_id) else {
        let baseline = positions_of(&items);
        return reconcile_against(items, None, false, &baseline);
    };

    let current = from_index as i64 + 1;
    let to_index = if new_position > current {
        new_position.min(items.len() as i64)
    } else {
        new_position.saturating_sub(1)
    };

    if to_index < 0 {
        // Keep the anchor semantics for positions below 1.
        let baseline = positions_of(&items);
        let mut items = items;
        items[from_index].sort_position = new_position;
        return reconcile_against(items, Some(item_id), false, &baseline);
    }

    move_item(items, from_index, to_index as usize)
}

/// Removes an item and closes the gap it leaves.
///
/// Returns the removed item (if any) with the reconciled remainder.
pub fn remove_item(
    mut items: Vec<MealItem>,
    item_id: Uuid,
) -> (Option<MealItem>, Reconciliation) {
    let baseline = positions_of(&items);
    let removed = items
        .iter()
        .position(|item| item.id == item_id)
        .map(|index| items.remove(index));

    (removed, reconcile_against(items, None, false, &baseline))
}

/// Parameters for moving an item into another meal.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub item_id: Uuid,
    pub target_meal_id: Uuid,
    /// 1-based slot in the target meal; past the end appends.
    pub position: i64,
    /// Give the moved item a fresh id instead of keeping its own.
    pub reassign_id: bool,
}

/// Result of a cross-meal move.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    /// The item as it now lives in the target meal.
    pub item: MealItem,
    /// Its id while it belonged to the source meal.
    pub previous_id: Uuid,
    pub source: Reconciliation,
    pub target: Reconciliation,
}

/// Moves an item from `source` into `target`.
///
/// Returns `None` when the item is not part of `source`, or when `target`
/// already holds it (a move within one meal goes through [`move_item`]).
/// Both lists are dropped unchanged in that case.
pub fn transfer_item(
    source: Vec<MealItem>,
    target: Vec<MealItem>,
    request: &TransferRequest,
) -> Option<Transfer> {
    if target.iter().any(|item| item.id == request.item_id) {
        return None;
    }

    let (removed, source) = remove_item(source, request.item_id);
    let mut item = removed?;

    let previous_id = item.id;
    if request.reassign_id {
        item.id = Uuid::new_v4();
    }
    item.meal_id = request.target_meal_id;
    item.sort_position = request.position;

    let new_id = item.id;
    let target = insert_item(target, item);
    let item = target
        .items
        .iter()
        .find(|candidate| candidate.id == new_id)
        .or(target.dropped.as_ref())?
        .clone();

    Some(Transfer {
        item,
        previous_id,
        source,
        target,
    })
}
