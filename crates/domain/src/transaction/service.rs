//! Transaction service orchestrating persistence and notification.

use common::TransactionId;
use messaging::MessagePublisher;
use transaction_store::TransactionStore;

use super::{CreateTransaction, TransactionCreatedMessage, TransactionView};
use crate::error::DomainError;

/// Service for recording and reading transactions.
///
/// Creating a transaction validates the request, stores it, publishes a
/// [`TransactionCreatedMessage`] and returns the stored record's view.
/// Publishing is best-effort and cannot fail the call.
pub struct TransactionService<S, P>
where
    S: TransactionStore,
    P: MessagePublisher,
{
    store: S,
    publisher: P,
}

impl<S, P> TransactionService<S, P>
where
    S: TransactionStore,
    P: MessagePublisher,
{
    /// Creates a new transaction service.
    pub fn new(store: S, publisher: P) -> Self {
        Self { store, publisher }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a reference to the notification publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Records a new transaction and announces it.
    ///
    /// Store errors are returned as-is; there is no retry.
    #[tracing::instrument(skip(self, cmd), fields(account_id = %cmd.account_id))]
    pub async fn create_transaction(
        &self,
        cmd: CreateTransaction,
    ) -> Result<TransactionView, DomainError> {
        cmd.validate()?;

        let created = self.store.create(cmd.into()).await?;
        tracing::info!(transaction_id = %created.id, "transaction created");
        metrics::counter!("transactions_created_total").increment(1);

        let message = TransactionCreatedMessage::from(&created);
        self.publisher.publish(&message).await;

        Ok(TransactionView::from(created))
    }

    /// Lists every stored transaction.
    #[tracing::instrument(skip(self))]
    pub async fn list_transactions(&self) -> Result<Vec<TransactionView>, DomainError> {
        let transactions = self.store.list_all().await?;
        Ok(transactions.into_iter().map(TransactionView::from).collect())
    }

    /// Looks up a transaction. Returns None if it does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_transaction(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionView>, DomainError> {
        let transaction = self.store.get_by_id(id).await?;
        Ok(transaction.map(TransactionView::from))
    }
}
