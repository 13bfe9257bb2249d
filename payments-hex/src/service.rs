//! Payment Application Service
//!
//! Orchestrates payment operations through the repository port.
//! Contains NO infrastructure logic - pure business orchestration.

use payments_types::{AppError, NewPayment, Payment, PaymentId, PaymentRepository};

/// Application service for payment operations.
///
/// Generic over `R: PaymentRepository` - the adapter is injected at compile time.
/// This enables:
/// - Swapping repositories without code changes
/// - Testing with in-memory repo
/// - Compile-time checks for port implementation
pub struct PaymentService<R: PaymentRepository> {
    repo: R,
}

impl<R: PaymentRepository> PaymentService<R> {
    /// Creates a new payment service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Records a confirmed payment for an order.
    ///
    /// The new record is always `PAID` and stamped with the current time.
    pub async fn confirm_payment(&self, order_id: i64, amount: f64) -> Result<Payment, AppError> {
        let payment = self
            .repo
            .insert_payment(NewPayment::confirmed(order_id, amount))
            .await?;

        tracing::info!(payment_id = %payment.id, order_id, amount, "payment confirmed");
        Ok(payment)
    }

    /// Gets a payment by ID. Absence is not an error.
    pub async fn get_payment_by_id(&self, id: PaymentId) -> Result<Option<Payment>, AppError> {
        self.repo.get_payment(id).await.map_err(Into::into)
    }

    /// Lists all payments, or only those for `order_id`.
    pub async fn get_payments(&self, order_id: Option<i64>) -> Result<Vec<Payment>, AppError> {
        self.repo.list_payments(order_id).await.map_err(Into::into)
    }

    /// Overwrites the status of a payment.
    ///
    /// `status` is stored as given; it is not checked against `PaymentStatus`.
    /// Returns `None`, leaving the store untouched, when no payment has `id`.
    pub async fn update_payment_status(
        &self,
        id: PaymentId,
        status: &str,
    ) -> Result<Option<Payment>, AppError> {
        let updated = self.repo.update_payment_status(id, status).await?;

        match &updated {
            Some(_) => tracing::info!(payment_id = %id, status, "payment status updated"),
            None => tracing::debug!(payment_id = %id, "status update for unknown payment"),
        }

        Ok(updated)
    }
}
