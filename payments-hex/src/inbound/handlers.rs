//! REST request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use payments_types::{
    AppError, ConfirmPaymentRequest, ErrorResponse, HealthResponse, PaymentId, PaymentRepository,
    PaymentResponse, PaymentStatusQuery,
};

use super::graphql::PaymentSchema;
use crate::PaymentService;
use crate::openapi::ApiDoc;

/// Name reported by the liveness probe.
pub const SERVICE_NAME: &str = "payment-service";

/// Body detail for store failures; the underlying error is only logged.
pub(crate) const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

/// Application state shared across handlers.
pub struct AppState<R: PaymentRepository> {
    pub service: Arc<PaymentService<R>>,
    pub schema: PaymentSchema<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self.0 {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_DETAIL.to_string())
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".into(),
        service: SERVICE_NAME.into(),
    })
}

/// Confirm a payment for an order.
#[tracing::instrument(skip(state), fields(order_id = req.order_id, amount = req.amount))]
pub async fn confirm_payment<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<ConfirmPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state
        .service
        .confirm_payment(req.order_id, req.amount)
        .await?;
    Ok(Json(PaymentResponse::from(payment)))
}

/// Look up a payment by ID.
#[tracing::instrument(skip(state), fields(payment_id = query.id))]
pub async fn get_payment_status<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Query(query): Query<PaymentStatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state
        .service
        .get_payment_by_id(PaymentId::new(query.id))
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".into()))?;

    Ok(Json(PaymentResponse::from(payment)))
}

/// OpenAPI document for the REST surface.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::PaymentService;
    use crate::inbound::HttpServer;
    use crate::service_tests::tests::MockRepo;

    fn failing_app() -> Router {
        let repo = MockRepo::new();
        repo.fail_all();
        HttpServer::new(PaymentService::new(repo)).router()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_confirm_store_failure_is_generic_500() {
        let req = Request::builder()
            .method("POST")
            .uri("/payment")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"order_id": 42, "amount": 100.0}).to_string()))
            .unwrap();

        let (status, body) = send(failing_app(), req).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_status_lookup_store_failure_is_generic_500() {
        let req = Request::builder()
            .uri("/payment-status?id=1")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(failing_app(), req).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_graphql_store_failure_reports_error_envelope() {
        let req = Request::builder()
            .method("POST")
            .uri("/graphql")
            .header("Content-Type", "application/json")
            .body(Body::from(
                json!({"query": "{ payments { id } }"}).to_string(),
            ))
            .unwrap();

        let (status, body) = send(failing_app(), req).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].is_null());
        assert_eq!(body["errors"][0]["message"], "Internal server error");
    }
}
