use thiserror::Error;

use super::StoreState;

/// Errors that can occur during local store operations.
///
/// A missing row is never an error: lookups return `Ok(None)` and scans
/// return an empty list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Local storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Local storage has not been opened")]
    NotInitialized,
    #[error("Local storage has been closed")]
    Closed,
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// The error a data call gets when the store is not open.
    pub fn for_state(state: StoreState) -> Option<Self> {
        match state {
            StoreState::Unopened => Some(StoreError::NotInitialized),
            StoreState::Open => None,
            StoreState::Closed => Some(StoreError::Closed),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
