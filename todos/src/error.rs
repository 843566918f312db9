//! Error types for the todo list.

use crate::types::TodoId;
use thiserror::Error;
use todos_runtime::StoreError;

/// Errors surfaced by the todo store
///
/// Unknown ids on remove/toggle and unknown filter keys are not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// The request carried unusable input (an empty title)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The id generator handed out an id that is already in the list
    #[error("Todo with ID {0} already exists")]
    DuplicateId(TodoId),

    /// The store runtime refused the request
    #[error(transparent)]
    Store(#[from] StoreError),
}
