use thiserror::Error;

use itemtrack_core::ValidationError;

use crate::port::PersistenceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by [`crate::InventoryService`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Rejected before anything reached the persistence port.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reported by the persistence port, passed through as-is.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ServiceError {
    /// The validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ServiceError::Validation(e) => Some(e),
            ServiceError::Persistence(_) => None,
        }
    }
}
