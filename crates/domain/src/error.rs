//! Domain error types.

use thiserror::Error;
use transaction_store::StoreError;

use crate::transaction::TransactionError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The request failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] TransactionError),

    /// An error occurred in the transaction store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
