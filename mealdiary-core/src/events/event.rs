use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A mutation of a meal's items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiaryEvent {
    ItemAdded {
        meal_id: Uuid,
        item_id: Uuid,
    },
    ItemUpdated {
        meal_id: Uuid,
        item_id: Uuid,
    },
    ItemDeleted {
        meal_id: Uuid,
        item_id: Uuid,
    },
    /// Reordered within the same meal.
    ItemMoved {
        meal_id: Uuid,
        item_id: Uuid,
        from_index: usize,
        to_index: usize,
    },
    /// Moved into another meal; the id changes when it was reassigned.
    ItemTransferred {
        from_meal_id: Uuid,
        to_meal_id: Uuid,
        old_item_id: Uuid,
        new_item_id: Uuid,
    },
    /// Positions of these items were written back after a reconciliation.
    PositionsReconciled {
        meal_id: Uuid,
        changed: Vec<Uuid>,
    },
}

impl DiaryEvent {
    /// Meals whose item lists are affected.
    pub fn meal_ids(&self) -> Vec<Uuid> {
        match self {
            DiaryEvent::ItemAdded { meal_id, .. }
            | DiaryEvent::ItemUpdated { meal_id, .. }
            | DiaryEvent::ItemDeleted { meal_id, .. }
            | DiaryEvent::ItemMoved { meal_id, .. }
            | DiaryEvent::PositionsReconciled { meal_id, .. } => vec![*meal_id],
            DiaryEvent::ItemTransferred {
                from_meal_id,
                to_meal_id,
                ..
            } => vec![*from_meal_id, *to_meal_id],
        }
    }

    pub fn concerns_meal(&self, meal_id: Uuid) -> bool {
        self.meal_ids().contains(&meal_id)
    }
}
