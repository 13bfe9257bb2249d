//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::Sqlite;
use std::str::FromStr;

use payments_types::{NewPayment, Payment, PaymentId, PaymentRepository, RepoError};

use crate::types::SqlitePaymentRow;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` opens its own empty database, so the
        // in-memory store is pinned to one long-lived connection.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().connect_with(options).await?
        };

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (idempotent).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_payments.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    /// Borrows a connection from the pool for one operation.
    ///
    /// The connection returns to the pool when dropped, on every exit path.
    async fn session(&self) -> Result<PoolConnection<Sqlite>, RepoError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for SqliteRepo {
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, RepoError> {
        let mut conn = self.session().await?;

        let result = sqlx::query(
            r#"INSERT INTO payments (order_id, amount, payment_status, payment_date) VALUES (?, ?, ?, ?)"#,
        )
        .bind(payment.order_id)
        .bind(payment.amount)
        .bind(payment.payment_status.as_str())
        .bind(payment.payment_date.to_rfc3339())
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let id = PaymentId::new(result.last_insert_rowid());
        tracing::debug!(payment_id = %id, order_id = payment.order_id, "payment inserted");

        Ok(payment.into_payment(id))
    }

    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let mut conn = self.session().await?;

        let row: Option<SqlitePaymentRow> = sqlx::query_as(
            r#"SELECT id, order_id, amount, payment_status, payment_date FROM payments WHERE id = ?"#,
        )
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqlitePaymentRow::into_domain).transpose()
    }

    async fn list_payments(&self, order_id: Option<i64>) -> Result<Vec<Payment>, RepoError> {
        let mut conn = self.session().await?;

        let rows: Vec<SqlitePaymentRow> = match order_id {
            Some(order_id) => sqlx::query_as(
                r#"SELECT id, order_id, amount, payment_status, payment_date FROM payments WHERE order_id = ? ORDER BY id"#,
            )
            .bind(order_id)
            .fetch_all(&mut *conn)
            .await,
            None => sqlx::query_as(
                r#"SELECT id, order_id, amount, payment_status, payment_date FROM payments ORDER BY id"#,
            )
            .fetch_all(&mut *conn)
            .await,
        }
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(SqlitePaymentRow::into_domain).collect()
    }

    async fn update_payment_status(
        &self,
        id: PaymentId,
        status: &str,
    ) -> Result<Option<Payment>, RepoError> {
        let mut conn = self.session().await?;

        let row: Option<SqlitePaymentRow> = sqlx::query_as(
            r#"UPDATE payments SET payment_status = ? WHERE id = ?
               RETURNING id, order_id, amount, payment_status, payment_date"#,
        )
        .bind(status)
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqlitePaymentRow::into_domain).transpose()
    }

    async fn count_payments(&self) -> Result<i64, RepoError> {
        let mut conn = self.session().await?;

        let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM payments"#)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(count)
    }
}
