//! Transaction requests, views and the workflow service.

mod commands;
mod events;
mod service;
mod view;

pub use commands::CreateTransaction;
pub use events::TransactionCreatedMessage;
pub use service::TransactionService;
pub use view::TransactionView;

use thiserror::Error;

/// Errors raised while validating a transaction request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// Account ID is required.
    #[error("Account ID is required")]
    AccountIdRequired,

    /// Description is required.
    #[error("Description is required")]
    DescriptionRequired,
}
