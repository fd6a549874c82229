use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};

use crate::{
    DatabaseSettings, NewTransaction, Result, StoreError, Transaction, TransactionId,
    store::{DurableStore, TransactionStore},
};

/// PostgreSQL-backed transaction store.
///
/// Records live in `"<schema>"."<table>"`, one row per transaction.
#[derive(Clone)]
pub struct PostgresTransactionStore {
    pool: PgPool,
    schema: String,
    table: String,
}

impl PostgresTransactionStore {
    /// Creates a store over an existing pool.
    ///
    /// Fails if `schema` or `table` is not a plain SQL identifier.
    pub fn new(pool: PgPool, schema: &str, table: &str) -> Result<Self> {
        Ok(Self {
            pool,
            schema: validate_identifier(schema)?.to_string(),
            table: validate_identifier(table)?.to_string(),
        })
    }

    /// Opens a connection pool using the given settings.
    ///
    /// At least one connection is established before this returns, so an
    /// unreachable server is reported here.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        let connecting = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.connect_timeout)
            .connect(&settings.connection_string);

        let pool = tokio::time::timeout(settings.connect_timeout, connecting)
            .await
            .map_err(|_| StoreError::ConnectTimeout(settings.connect_timeout))??;

        Self::new(pool, &settings.database_name, &settings.collection_name)
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs a trivial query against the server.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Creates the schema and table if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(&format!(r#"CREATE SCHEMA IF NOT EXISTS "{}""#, self.schema))
            .execute(&self.pool)
            .await?;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                account_id TEXT NOT NULL,
                amount NUMERIC NOT NULL,
                transaction_type TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                status TEXT NOT NULL
            )
            "#,
            self.qualified_table()
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn qualified_table(&self) -> String {
        format!(r#""{}"."{}""#, self.schema, self.table)
    }

    fn insert_sql(&self) -> String {
        format!(
            r#"
            INSERT INTO {} (id, account_id, amount, transaction_type, description, created_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
            self.qualified_table()
        )
    }

    fn row_to_transaction(row: PgRow) -> Result<Transaction> {
        let id: String = row.try_get("id")?;
        let transaction_type: String = row.try_get("transaction_type")?;
        let status: String = row.try_get("status")?;

        let corrupt = |source| StoreError::CorruptRecord {
            id: id.clone(),
            source,
        };

        Ok(Transaction {
            transaction_type: transaction_type.parse().map_err(corrupt)?,
            status: status.parse().map_err(corrupt)?,
            account_id: row.try_get("account_id")?,
            amount: row.try_get("amount")?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
            id: TransactionId::new(id),
        })
    }
}

/// Accepts ASCII letters, digits and underscores, not starting with a digit.
fn validate_identifier(name: &str) -> Result<&str> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid && name.len() <= 63 {
        Ok(name)
    } else {
        Err(StoreError::InvalidIdentifier(name.to_string()))
    }
}

#[async_trait]
impl TransactionStore for PostgresTransactionStore {
    async fn list_all(&self) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT id, account_id, amount, transaction_type, description, created_at, status
            FROM {}
            ORDER BY created_at ASC
            "#,
            self.qualified_table()
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_transaction).collect()
    }

    async fn get_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT id, account_id, amount, transaction_type, description, created_at, status
            FROM {}
            WHERE id = $1
            "#,
            self.qualified_table()
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_transaction).transpose()
    }

    async fn create(&self, new: NewTransaction) -> Result<Transaction> {
        let transaction = Transaction::stamp(new, Utc::now());

        sqlx::query(&self.insert_sql())
            .bind(transaction.id.as_str())
            .bind(&transaction.account_id)
            .bind(transaction.amount)
            .bind(transaction.transaction_type.to_string())
            .bind(&transaction.description)
            .bind(transaction.created_at)
            .bind(transaction.status.to_string())
            .execute(&self.pool)
            .await?;

        Ok(transaction)
    }

    async fn update(
        &self,
        id: &TransactionId,
        transaction: Transaction,
    ) -> Result<Option<Transaction>> {
        let transaction = Transaction {
            id: id.clone(),
            ..transaction
        };

        let result = sqlx::query(&format!(
            r#"
            UPDATE {}
            SET account_id = $2, amount = $3, transaction_type = $4,
                description = $5, created_at = $6, status = $7
            WHERE id = $1
            "#,
            self.qualified_table()
        ))
        .bind(transaction.id.as_str())
        .bind(&transaction.account_id)
        .bind(transaction.amount)
        .bind(transaction.transaction_type.to_string())
        .bind(&transaction.description)
        .bind(transaction.created_at)
        .bind(transaction.status.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(None)
        } else {
            Ok(Some(transaction))
        }
    }

    async fn delete(&self, id: &TransactionId) -> Result<bool> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = $1",
            self.qualified_table()
        ))
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl DurableStore for PostgresTransactionStore {
    async fn health_check(&self) -> Result<()> {
        self.ping().await?;
        self.ensure_schema().await
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", self.qualified_table()))
                .fetch_one(&self.pool)
                .await?;
        Ok(count.max(0) as u64)
    }

    async fn insert_many(&self, transactions: Vec<Transaction>) -> Result<()> {
        let sql = self.insert_sql();
        let mut tx = self.pool.begin().await?;

        for transaction in &transactions {
            sqlx::query(&sql)
                .bind(transaction.id.as_str())
                .bind(&transaction.account_id)
                .bind(transaction.amount)
                .bind(transaction.transaction_type.to_string())
                .bind(&transaction.description)
                .bind(transaction.created_at)
                .bind(transaction.status.to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
