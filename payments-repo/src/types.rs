//! Database row types for the SQLite and PostgreSQL adapters.

use sqlx::FromRow;

use payments_types::{Payment, PaymentId};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row from PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgPaymentRow {
    pub id: i64,
    pub order_id: i64,
    pub amount: f64,
    pub payment_status: String,
    pub payment_date: chrono::DateTime<chrono::Utc>,
}

#[cfg(feature = "postgres")]
impl PgPaymentRow {
    pub fn into_domain(self) -> Payment {
        Payment::from_parts(
            PaymentId::new(self.id),
            self.order_id,
            self.amount,
            self.payment_status,
            self.payment_date,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite (timestamps stored as RFC 3339 text)
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row from SQLite.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqlitePaymentRow {
    pub id: i64,
    pub order_id: i64,
    pub amount: f64,
    pub payment_status: String,
    pub payment_date: String,
}

#[cfg(feature = "sqlite")]
impl SqlitePaymentRow {
    pub fn into_domain(self) -> Result<Payment, payments_types::RepoError> {
        let payment_date = chrono::DateTime::parse_from_rfc3339(&self.payment_date)
            .map_err(|e| payments_types::RepoError::Database(e.to_string()))?
            .with_timezone(&chrono::Utc);

        Ok(Payment::from_parts(
            PaymentId::new(self.id),
            self.order_id,
            self.amount,
            self.payment_status,
            payment_date,
        ))
    }
}
