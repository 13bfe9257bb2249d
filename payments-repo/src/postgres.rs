//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};

use payments_types::{NewPayment, Payment, PaymentId, PaymentRepository, RepoError};

use crate::types::PgPaymentRow;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_payments_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }

    /// Borrows a connection from the pool for one operation.
    async fn session(&self) -> Result<PoolConnection<Postgres>, RepoError> {
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
impl PaymentRepository for PostgresRepo {
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, RepoError> {
        let mut conn = self.session().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"INSERT INTO payments (order_id, amount, payment_status, payment_date)
               VALUES ($1, $2, $3, $4) RETURNING id"#,
        )
        .bind(payment.order_id)
        .bind(payment.amount)
        .bind(payment.payment_status.as_str())
        .bind(payment.payment_date)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let id = PaymentId::new(id);
        tracing::debug!(payment_id = %id, order_id = payment.order_id, "payment inserted");

        Ok(payment.into_payment(id))
    }

    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let mut conn = self.session().await?;

        let row: Option<PgPaymentRow> = sqlx::query_as(
            r#"SELECT id, order_id, amount, payment_status, payment_date FROM payments WHERE id = $1"#,
        )
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(PgPaymentRow::into_domain))
    }

    async fn list_payments(&self, order_id: Option<i64>) -> Result<Vec<Payment>, RepoError> {
        let mut conn = self.session().await?;

        // A NULL filter matches every row.
        let rows: Vec<PgPaymentRow> = sqlx::query_as(
            r#"SELECT id, order_id, amount, payment_status, payment_date FROM payments
               WHERE ($1::BIGINT IS NULL OR order_id = $1) ORDER BY id"#,
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(PgPaymentRow::into_domain).collect())
    }

    async fn update_payment_status(
        &self,
        id: PaymentId,
        status: &str,
    ) -> Result<Option<Payment>, RepoError> {
        let mut conn = self.session().await?;

        let row: Option<PgPaymentRow> = sqlx::query_as(
            r#"UPDATE payments SET payment_status = $1 WHERE id = $2
               RETURNING id, order_id, amount, payment_status, payment_date"#,
        )
        .bind(status)
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(PgPaymentRow::into_domain))
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
