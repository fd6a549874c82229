//! Externally visible projection of a stored transaction.

use chrono::{DateTime, Utc};
use common::{Transaction, TransactionStatus, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;

/// What callers see of a transaction.
///
/// Enums serialize as their names, `amount` as a JSON number and
/// `created_at` as an RFC 3339 string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: String,
    pub account_id: String,
    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl From<Transaction> for TransactionView {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id.to_string(),
            account_id: transaction.account_id,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            description: transaction.description,
            created_at: transaction.created_at,
            status: transaction.status,
        }
    }
}
