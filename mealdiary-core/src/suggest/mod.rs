//! Meal-time suggestions for a calendar day.

mod config;
mod suggester;

pub use config::SuggestionConfig;
pub use suggester::MealTimeSuggester;
