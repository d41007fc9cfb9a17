//! Domain error types.

use order_store::StoreError;
use thiserror::Error;

use crate::order::OrderError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The request broke an order rule.
    #[error("{0}")]
    Order(#[from] OrderError),
}

impl DomainError {
    /// Returns the order-rule violation, if this is one.
    pub fn as_order_error(&self) -> Option<&OrderError> {
        match self {
            DomainError::Order(err) => Some(err),
            DomainError::Store(_) => None,
        }
    }
}
