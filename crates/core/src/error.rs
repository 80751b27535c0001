//! Validation error model.

use thiserror::Error;

/// Result type for checks that run before any persistence call.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A rejected operation, detected before anything is written.
///
/// Keep this focused on deterministic, business-level failures. Storage and
/// connectivity failures belong to the persistence adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The item name is empty after trimming surrounding whitespace.
    #[error("invalid operation: item name could not be empty.")]
    EmptyName,

    /// The operation needs a selected item and none was given.
    #[error("invalid operation: no item selected.")]
    NoSelection,

    /// The item has an open borrow record.
    #[error("invalid operation: item is currently borrowed.")]
    ItemBorrowed,

    /// A return was requested for an item that is not out on loan.
    #[error("invalid operation: item is not borrowed.")]
    NotBorrowed,

    /// The borrower id or name is empty after trimming.
    #[error("invalid operation: borrower id and name could not be empty.")]
    EmptyBorrower,

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl ValidationError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "empty-name",
            ValidationError::NoSelection => "no-selection",
            ValidationError::ItemBorrowed => "item-borrowed",
            ValidationError::NotBorrowed => "not-borrowed",
            ValidationError::EmptyBorrower => "empty-borrower",
            ValidationError::InvalidId(_) => "invalid-id",
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
