use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{NewTransaction, Result, Transaction, TransactionId, store::TransactionStore};

/// In-memory transaction store.
///
/// Records are kept in insertion order behind a single lock; every mutation
/// takes the write lock, so concurrent creates never lose an update.
#[derive(Clone, Default)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given records.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(RwLock::new(transactions)),
        }
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transactions.read().await.is_empty()
    }

    /// Appends records exactly as given.
    pub async fn insert_many(&self, transactions: Vec<Transaction>) {
        self.transactions.write().await.extend(transactions);
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn list_all(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.read().await.clone())
    }

    async fn get_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        let store = self.transactions.read().await;
        Ok(store.iter().find(|t| &t.id == id).cloned())
    }

    async fn create(&self, new: NewTransaction) -> Result<Transaction> {
        let transaction = Transaction::stamp(new, Utc::now());

        let mut store = self.transactions.write().await;
        store.push(transaction.clone());

        Ok(transaction)
    }

    async fn update(
        &self,
        id: &TransactionId,
        transaction: Transaction,
    ) -> Result<Option<Transaction>> {
        let mut store = self.transactions.write().await;

        let Some(existing) = store.iter_mut().find(|t| &t.id == id) else {
            return Ok(None);
        };

        *existing = Transaction {
            id: id.clone(),
            ..transaction
        };
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: &TransactionId) -> Result<bool> {
        let mut store = self.transactions.write().await;
        let before = store.len();
        store.retain(|t| &t.id != id);
        Ok(store.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TransactionStatus, TransactionType};
    use rust_decimal_macros::dec;

    fn new_credit(account_id: &str) -> NewTransaction {
        NewTransaction::new(account_id, dec!(100.50), TransactionType::Credit, "Test")
    }

    #[tokio::test]
    async fn create_assigns_id_and_pending_status() {
        let store = InMemoryTransactionStore::new();
        let before = Utc::now();

        let created = store.create(new_credit("ACC001")).await.unwrap();

        assert!(!created.id.as_str().is_empty());
        assert_eq!(created.status, TransactionStatus::Pending);
        assert!(created.created_at >= before);
        assert_eq!(created.account_id, "ACC001");
        assert_eq!(created.amount, dec!(100.50));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_by_id_returns_stored_copy() {
        let store = InMemoryTransactionStore::new();
        let created = store.create(new_credit("ACC001")).await.unwrap();

        let found = store.get_by_id(&created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn get_by_id_missing_is_none() {
        let store = InMemoryTransactionStore::new();
        let found = store
            .get_by_id(&TransactionId::from("does-not-exist"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn list_all_keeps_insertion_order() {
        let store = InMemoryTransactionStore::new();
        let first = store.create(new_credit("ACC001")).await.unwrap();
        let second = store.create(new_credit("ACC002")).await.unwrap();
        let third = store.create(new_credit("ACC003")).await.unwrap();

        let all = store.list_all().await.unwrap();
        let ids: Vec<_> = all.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_id() {
        let store = InMemoryTransactionStore::new();
        let created = store.create(new_credit("ACC001")).await.unwrap();

        let replacement = Transaction {
            id: TransactionId::from("ignored"),
            description: "Corrected".to_string(),
            status: TransactionStatus::Completed,
            ..created.clone()
        };
        let updated = store
            .update(&created.id, replacement)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, "Corrected");
        assert_eq!(updated.status, TransactionStatus::Completed);
        assert_eq!(store.get_by_id(&created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_missing_is_none() {
        let store = InMemoryTransactionStore::new();
        let created = store.create(new_credit("ACC001")).await.unwrap();

        let result = store
            .update(&TransactionId::from("missing"), created)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_was_removed() {
        let store = InMemoryTransactionStore::new();
        let created = store.create(new_credit("ACC001")).await.unwrap();

        assert!(store.delete(&created.id).await.unwrap());
        assert!(!store.delete(&created.id).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_creates_lose_nothing() {
        let store = InMemoryTransactionStore::new();

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(new_credit(&format!("ACC{i:03}"))).await })
            })
            .collect();

        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            let created = handle.await.unwrap().unwrap();
            ids.insert(created.id);
        }

        assert_eq!(ids.len(), 50);
        assert_eq!(store.len().await, 50);
    }
}
