use serde::{Deserialize, Serialize};

/// Tunables for [`MealTimeSuggester`](super::MealTimeSuggester).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// How close (seconds, either direction) the latest meal must be to
    /// "now" for suggestions to be based on now instead.
    pub near_now_window_secs: i64,
    /// Suggestions spilling into the next calendar day must fall before
    /// this hour.
    pub next_day_cutoff_hour: u32,
    pub first_offset_hours: i64,
    pub second_offset_hours: i64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            near_now_window_secs: 3600,
            next_day_cutoff_hour: 6,
            first_offset_hours: 2,
            second_offset_hours: 4,
        }
    }
}
