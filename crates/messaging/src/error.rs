//! Messaging error types.

use thiserror::Error;

/// Errors raised while talking to the broker.
///
/// These never leave the crate's publishers; they are logged.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// Broker error.
    #[error("Broker error: {0}")]
    Broker(#[from] redis::RedisError),

    /// Connecting to the broker did not finish in time.
    #[error("Timed out connecting to the broker after {0:?}")]
    ConnectTimeout(std::time::Duration),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
