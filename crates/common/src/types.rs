use std::str::FromStr;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a stored transaction.
///
/// Identifiers are assigned by the persistence layer and are opaque strings
/// to everyone else, so any string can be used for a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Returned when a stored enum name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Debit,
    Credit,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Debit => write!(f, "Debit"),
            TransactionType::Credit => write!(f, "Credit"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Debit" => Ok(TransactionType::Debit),
            "Credit" => Ok(TransactionType::Credit),
            other => Err(ParseEnumError {
                kind: "transaction type",
                value: other.to_string(),
            }),
        }
    }
}

/// Processing status of a transaction.
///
/// New records always start as `Pending`; nothing in this service moves a
/// record out of that state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "Pending"),
            TransactionStatus::Completed => write!(f, "Completed"),
            TransactionStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(TransactionStatus::Pending),
            "Completed" => Ok(TransactionStatus::Completed),
            "Failed" => Ok(TransactionStatus::Failed),
            other => Err(ParseEnumError {
                kind: "transaction status",
                value: other.to_string(),
            }),
        }
    }
}

/// The client-suppliable part of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub account_id: String,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub description: String,
}

impl NewTransaction {
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
}

/// A stored transaction record.
///
/// Never serialized directly; callers see `TransactionView` and the
/// notification payload instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: String,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Builds a freshly created record: new id, `Pending`, stamped at `now`.
    ///
    /// The timestamp is rounded up to whole microseconds, the resolution of
    /// the durable store, so a stored record reads back unchanged and is
    /// never earlier than `now`.
    pub fn stamp(new: NewTransaction, now: DateTime<Utc>) -> Self {
        let truncated = now.trunc_subsecs(6);
        let created_at = if truncated < now {
            truncated + Duration::microseconds(1)
        } else {
            truncated
        };

        Self {
            id: TransactionId::generate(),
            account_id: new.account_id,
            amount: new.amount,
            transaction_type: new.transaction_type,
            description: new.description,
            created_at,
            status: TransactionStatus::Pending,
        }
    }
}
