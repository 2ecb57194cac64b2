use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Name given to a meal logged without one.
    pub fn default_meal_name(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }

    /// The type usually eaten at a local `hour` (0-23). Anything outside the
    /// three main meal windows is a snack.
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            4..=10 => MealType::Breakfast,
            11..=15 => MealType::Lunch,
            17..=21 => MealType::Dinner,
            _ => MealType::Snack,
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        MealType::ALL
            .into_iter()
            .find(|meal_type| meal_type.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = MealType::ALL.iter().map(|t| t.as_str()).collect();
                format!(
                    "Invalid meal type '{}'. Valid options: {}",
                    s,
                    valid.join(", ")
                )
            })
    }
}
