//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory) implement this trait.

use crate::domain::{NewPayment, Payment, PaymentId};
use crate::error::RepoError;

/// Storage port for payment records.
///
/// Each method runs a single statement on a connection borrowed from the
/// adapter's pool. Writes are committed before the method returns.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Inserts a payment and returns it with its store-assigned id.
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, RepoError>;

    /// Gets a payment by ID.
    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;

    /// Lists payments, optionally restricted to one order.
    async fn list_payments(&self, order_id: Option<i64>) -> Result<Vec<Payment>, RepoError>;

    /// Overwrites the status of a payment.
    ///
    /// Returns `None` without touching the store when no row has `id`.
    /// `status` is written as given.
    async fn update_payment_status(
        &self,
        id: PaymentId,
        status: &str,
    ) -> Result<Option<Payment>, RepoError>;

    /// Number of stored payments.
    async fn count_payments(&self) -> Result<i64, RepoError>;
}
