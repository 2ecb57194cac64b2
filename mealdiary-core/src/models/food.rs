use serde::{Deserialize, Serialize};
use std::fmt;

/// What was eaten and how much of it.
///
/// The ordering logic never looks inside this; it is carried through
/// reconciliation untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodPayload {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl FoodPayload {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }
}

impl fmt::Display for FoodPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.amount, self.unit)
    }
}
