use thiserror::Error;
use uuid::Uuid;

/// Errors reported by a [`SortPositionStore`](super::SortPositionStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Meal item not found: {0}")]
    NotFound(Uuid),

    #[error("Write conflict: {0}")]
    Conflict(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}
