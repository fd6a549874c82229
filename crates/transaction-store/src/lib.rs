pub mod backend;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod seed;
pub mod settings;
pub mod store;

pub use backend::{BackendMode, PersistenceBackend};
pub use common::{NewTransaction, Transaction, TransactionId, TransactionStatus, TransactionType};
pub use error::{Result, StoreError};
pub use memory::InMemoryTransactionStore;
pub use postgres::PostgresTransactionStore;
pub use settings::DatabaseSettings;
pub use store::{DurableStore, TransactionStore};
