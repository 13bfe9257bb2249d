//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Payment, PaymentId};

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to confirm (create) a payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfirmPaymentRequest {
    /// Originating order
    #[schema(example = 42)]
    pub order_id: i64,
    /// Amount paid
    #[schema(example = 100.0)]
    pub amount: f64,
}

/// Query string for `GET /payment-status`.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentStatusQuery {
    /// Payment ID
    pub id: i64,
}

/// Payment as returned by the REST surface.
///
/// The confirmation timestamp is stored but not part of the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    /// Unique payment identifier
    #[schema(value_type = i64, example = 1)]
    pub id: PaymentId,
    #[schema(example = 42)]
    pub order_id: i64,
    #[schema(example = 100.0)]
    pub amount: f64,
    /// One of `PENDING`, `PAID`, `FAILED`
    #[schema(example = "PAID")]
    pub payment_status: String,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            order_id: p.order_id,
            amount: p.amount,
            payment_status: p.payment_status,
        }
    }
}

/// Error body used by the REST surface.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Payment not found")]
    pub detail: String,
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "payment-service")]
    pub service: String,
}
