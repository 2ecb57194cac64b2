use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::food::FoodPayload;

/// A food entry belonging to exactly one meal.
///
/// `sort_position` is 1-based and, for a meal in a valid state, unique and
/// gapless across the meal's items. It is signed so that stale or corrupt
/// values coming back from storage can still be represented and repaired.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealItem {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub sort_position: i64,
    pub food: FoodPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MealItem {
    pub fn new(meal_id: Uuid, food: FoodPayload) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            meal_id,
            sort_position: 1,
            food,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_sort_position(mut self, sort_position: i64) -> Self {
        self.sort_position = sort_position;
        self
    }
}

impl fmt::Display for MealItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.sort_position, self.food)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_item_new() {
        let meal_id = Uuid::new_v4();
        let item = MealItem::new(meal_id, FoodPayload::new("apple", 1.0, "piece"));

        assert_eq!(item.meal_id, meal_id);
        assert_eq!(item.sort_position, 1);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_meal_item_display() {
        let item = MealItem::new(Uuid::new_v4(), FoodPayload::new("rice", 150.0, "g"))
            .with_sort_position(3);
        assert_eq!(format!("{}", item), "3. rice (150 g)");
    }

    #[test]
    fn test_meal_item_json_roundtrip() {
        let item = MealItem::new(Uuid::new_v4(), FoodPayload::new("egg", 2.0, "piece"))
            .with_sort_position(2);

        let json = serde_json::to_string(&item).unwrap();
        let parsed: MealItem = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, item);
    }
}
