//! Meal Diary Core Library
//!
//! Ordering and scheduling logic shared by Meal Diary front ends: keeping a
//! meal's items in a dense sort order, suggesting times for new meals, and
//! the typed events and storage boundary around them.

pub mod editor;
pub mod events;
pub mod models;
pub mod ordering;
pub mod store;
pub mod suggest;

pub use editor::{EditOutcome, EditorError, MealEditor, TransferOutcome};
pub use events::{DiaryEvent, EventHub};
pub use models::{FoodPayload, Meal, MealItem, MealType};
pub use ordering::{
    insert_item, is_dense, move_item, reconcile, remove_item, transfer_item, update_position,
    Reconciliation, Transfer, TransferRequest,
};
pub use store::{persist_changes, MemoryStore, PersistReport, SortPositionStore, StoreError};
pub use suggest::{MealTimeSuggester, SuggestionConfig};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
