use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::meal_item::MealItem;
use super::meal_type::MealType;

/// A meal scheduled at a point in time, holding its food items in
/// `sort_position` order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub time: DateTime<Utc>,
    pub meal_type: Option<MealType>,
    pub items: Vec<MealItem>,
}

impl Meal {
    pub fn new(name: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            time,
            meal_type: None,
            items: Vec::new(),
        }
    }

    pub fn with_meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = Some(meal_type);
        self
    }

    pub fn with_items(mut self, items: Vec<MealItem>) -> Self {
        self.items = items;
        self
    }

    pub fn item(&self, item_id: Uuid) -> Option<&MealItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodPayload;
    use chrono::TimeZone;

    #[test]
    fn test_meal_lookup_item() {
        let time = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let mut meal = Meal::new("Lunch", time).with_meal_type(MealType::Lunch);
        let item = MealItem::new(meal.id, FoodPayload::new("soup", 300.0, "ml"));
        let item_id = item.id;
        meal.items.push(item);

        assert!(meal.item(item_id).is_some());
        assert!(meal.item(Uuid::new_v4()).is_none());
    }
}
