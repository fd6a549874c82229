//! Domain layer for the transaction service.
//!
//! This crate provides:
//! - `CreateTransaction` requests and their validation
//! - `TransactionView`, the externally visible projection of a record
//! - `TransactionService`, which validates, persists and announces new
//!   transactions

pub mod error;
pub mod transaction;

pub use common::{Transaction, TransactionId, TransactionStatus, TransactionType};
pub use error::DomainError;
pub use transaction::{
    CreateTransaction, TransactionCreatedMessage, TransactionError, TransactionService,
    TransactionView,
};
