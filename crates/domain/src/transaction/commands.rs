//! Requests accepted by the transaction service.

use common::{NewTransaction, TransactionType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TransactionError;

/// Request to record a new transaction.
///
/// `status` and `createdAt` are not part of the request; any such fields in
/// the incoming JSON are ignored and assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransaction {
    pub account_id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
}

impl CreateTransaction {
    pub fn new(
        account_id: impl Into<String>,
        amount: Decimal,
        transaction_type: TransactionType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            amount,
            transaction_type,
            description: description.into(),
        }
    }

    /// Checks the required text fields.
    ///
    /// The sign of `amount` is not checked against `transaction_type`.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.account_id.trim().is_empty() {
            return Err(TransactionError::AccountIdRequired);
        }
        if self.description.trim().is_empty() {
            return Err(TransactionError::DescriptionRequired);
        }
        Ok(())
    }
}

impl From<CreateTransaction> for NewTransaction {
    fn from(cmd: CreateTransaction) -> Self {
        NewTransaction {
            account_id: cmd.account_id,
            amount: cmd.amount,
            transaction_type: cmd.transaction_type,
            description: cmd.description,
        }
    }
}
