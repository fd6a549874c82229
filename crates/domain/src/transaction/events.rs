//! Notification payloads.

use chrono::{DateTime, Utc};
use common::Transaction;
use rust_decimal::Decimal;
use serde::Serialize;

/// Published once for every created transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreatedMessage {
    pub transaction_id: String,
    pub account_id: String,
    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionCreatedMessage {
    fn from(transaction: &Transaction) -> Self {
        Self {
            transaction_id: transaction.id.to_string(),
            account_id: transaction.account_id.clone(),
            amount: transaction.amount,
            transaction_type: transaction.transaction_type.to_string(),
            created_at: transaction.created_at,
        }
    }
}
