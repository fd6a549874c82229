//! Shared record types for the transaction service.

pub mod types;

pub use types::{
    NewTransaction, ParseEnumError, Transaction, TransactionId, TransactionStatus,
    TransactionType,
};
