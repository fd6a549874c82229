use thiserror::Error;

use common::ParseEnumError;

/// Errors that can occur when interacting with a transaction store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Connecting to the database did not finish in time.
    #[error("Timed out connecting to the database after {0:?}")]
    ConnectTimeout(std::time::Duration),

    /// A schema or table name is not a plain SQL identifier.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A stored row could not be turned back into a record.
    #[error("Corrupt record {id}: {source}")]
    CorruptRecord {
        id: String,
        #[source]
        source: ParseEnumError,
    },
}

/// Result type for transaction store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
