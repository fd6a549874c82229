use async_trait::async_trait;

use crate::{NewTransaction, Result, Transaction, TransactionId};

/// Core trait for transaction persistence.
///
/// Every implementation assigns ids and creation timestamps itself; callers
/// only ever receive owned copies of stored records.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Returns every stored record.
    ///
    /// The in-memory store returns insertion order; durable stores make no
    /// ordering promise.
    async fn list_all(&self) -> Result<Vec<Transaction>>;

    /// Looks up a record by id. Returns None if no record has that id.
    async fn get_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>>;

    /// Stores a new record.
    ///
    /// A fresh id is assigned, `created_at` is set to now and the status is
    /// forced to `Pending`. Returns the stored copy.
    async fn create(&self, new: NewTransaction) -> Result<Transaction>;

    /// Replaces the record with the given id.
    ///
    /// The stored id is kept; all other fields come from `transaction`.
    /// Returns None if no record has that id.
    async fn update(
        &self,
        id: &TransactionId,
        transaction: Transaction,
    ) -> Result<Option<Transaction>>;

    /// Removes the record with the given id. Returns true if one was removed.
    async fn delete(&self, id: &TransactionId) -> Result<bool>;
}

/// A store that lives outside the process and may be unreachable.
#[async_trait]
pub trait DurableStore: TransactionStore {
    /// Verifies connectivity and makes sure the storage exists.
    async fn health_check(&self) -> Result<()>;

    /// Returns the number of stored records.
    async fn count(&self) -> Result<u64>;

    /// Inserts records exactly as given, ids and timestamps included.
    async fn insert_many(&self, transactions: Vec<Transaction>) -> Result<()>;

    /// Releases the underlying connections.
    async fn close(&self);
}
