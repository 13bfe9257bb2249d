//! OpenAPI specification for the REST surface.
//!
//! The GraphQL endpoint documents itself through introspection and is not
//! described here.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use payments_types::domain::{PaymentId, PaymentStatus};
use payments_types::dto::{
    ConfirmPaymentRequest, ErrorResponse, HealthResponse, PaymentResponse, PaymentStatusQuery,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse,
            example = json!({"status": "ok", "service": "payment-service"}))
    )
)]
async fn health() {}

/// Confirm a payment
///
/// Creates a payment record for the order in status `PAID`.
#[utoipa::path(
    post,
    path = "/payment",
    tag = "payments",
    request_body = ConfirmPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = PaymentResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
async fn confirm_payment() {}

/// Get payment by ID
#[utoipa::path(
    get,
    path = "/payment-status",
    tag = "payments",
    params(PaymentStatusQuery),
    responses(
        (status = 200, description = "Payment details", body = PaymentResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse,
            example = json!({"detail": "Payment not found"}))
    )
)]
async fn get_payment_status() {}

/// OpenAPI documentation for the payment REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payment Processing Service",
        version = "1.0.0",
        description = "Payment-record service. Payments are confirmed over REST or GraphQL (`POST /graphql`) and read back by id or order.",
        license(name = "MIT"),
    ),
    paths(health, confirm_payment, get_payment_status),
    components(
        schemas(
            ConfirmPaymentRequest,
            PaymentResponse,
            PaymentStatus,
            PaymentId,
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "payments", description = "Payment confirmation and lookup"),
    )
)]
pub struct ApiDoc;
