use std::collections::HashMap;
use uuid::Uuid;

use crate::models::MealItem;

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Items in final order, `sort_position == index + 1`.
    pub items: Vec<MealItem>,
    /// Items whose `sort_position` differs from the baseline they came in with.
    pub changed: Vec<MealItem>,
    /// The anchor, when its target index came out negative and it was not
    /// reinserted.
    // TODO: decide whether a negative target should clamp to the front
    // instead of dropping; callers currently rely on seeing the drop here.
    pub dropped: Option<MealItem>,
}

impl Reconciliation {
    /// True when nothing needs to be written back.
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty() && self.dropped.is_none()
    }

    pub fn changed_ids(&self) -> Vec<Uuid> {
        self.changed.iter().map(|item| item.id).collect()
    }
}

/// Returns true if `items[i].sort_position == i + 1` for every index.
pub fn is_dense(items: &[MealItem]) -> bool {
    items
        .iter()
        .zip(1_i64..)
        .all(|(item, expected)| item.sort_position == expected)
}

/// Restores the dense 1-based order of `items`.
///
/// When `anchor_id` names an item in the list, that item is pulled out and
/// put back at the slot its current `sort_position` asks for before the list
/// is renumbered. `moving_forwards` marks a desired position expressed in
/// pre-removal coordinates, so the target index is shifted back one more
/// slot. An anchor whose target index is negative is not reinserted and is
/// returned in [`Reconciliation::dropped`].
///
/// Without an anchor (or with an unknown one) the list is renumbered in
/// array order.
pub fn reconcile(
    items: Vec<MealItem>,
    anchor_id: Option<Uuid>,
    moving_forwards: bool,
) -> Reconciliation {
    let baseline = positions_of(&items);
    reconcile_against(items, anchor_id, moving_forwards, &baseline)
}

pub(crate) fn positions_of(items: &[MealItem]) -> HashMap<Uuid, i64> {
    items
        .iter()
        .map(|item| (item.id, item.sort_position))
        .collect()
}

/// Same as [`reconcile`], but changes are measured against `baseline`
/// (usually the positions as persisted) rather than the positions on entry.
/// Items absent from `baseline` are new and never reported as changed.
pub(crate) fn reconcile_against(
    mut items: Vec<MealItem>,
    anchor_id: Option<Uuid>,
    moving_forwards: bool,
    baseline: &HashMap<Uuid, i64>,
) -> Reconciliation {
    if is_dense(&items) {
        let changed = changed_against(&items, baseline);
        return Reconciliation {
            items,
            changed,
            dropped: None,
        };
    }

    let mut dropped = None;
    if let Some(anchor_id) = anchor_id {
        if let Some(index) = items.iter().position(|item| item.id == anchor_id) {
            let anchor = items.remove(index);
            let offset = if moving_forwards { 2 } else { 1 };
            let len = items.len() as i64;
            let new_index = anchor.sort_position.saturating_sub(offset).min(len);

            if new_index >= 0 {
                items.insert(new_index as usize, anchor);
            } else {
                tracing::warn!(
                    item_id = %anchor.id,
                    sort_position = anchor.sort_position,
                    "anchor target index is negative, item not reinserted"
                );
                dropped = Some(anchor);
            }
        } else {
            tracing::debug!(%anchor_id, "anchor not found, renumbering only");
        }
    }

    for (item, position) in items.iter_mut().zip(1_i64..) {
        item.sort_position = position;
    }

    items.sort_by_key(|item| item.sort_position);

    let changed = changed_against(&items, baseline);
    tracing::debug!(
        items = items.len(),
        changed = changed.len(),
        "reconciled sort positions"
    );

    Reconciliation {
        items,
        changed,
        dropped,
    }
}

fn changed_against(items: &[MealItem], baseline: &HashMap<Uuid, i64>) -> Vec<MealItem> {
    items
        .iter()
        .filter(|item| {
            baseline
                .get(&item.id)
                .is_some_and(|&before| before != item.sort_position)
        })
        .cloned()
        .collect()
}
