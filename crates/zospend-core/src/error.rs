use std::io;

use thiserror::Error;
use zospend_domain::ExpenseId;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Duplicate expense: `{title}` was already recorded moments ago")]
    DuplicateRecord { title: String },
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),
}

impl CoreError {
    /// True for conditions the user can fix by editing the form and retrying.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::Validation(_) | CoreError::DuplicateRecord { .. }
        )
    }
}

impl From<io::Error> for CoreError {
    fn from(err: io::Error) -> Self {
        CoreError::Storage(StorageError::Io(err))
    }
}

/// Failures raised by a record store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
