//! # Payments Client SDK
//!
//! A typed Rust client for the payment service. Confirmation and lookup go
//! through the REST routes; listing and status updates, which only the
//! GraphQL schema exposes, go through `/graphql`.

use payments_types::{
    ConfirmPaymentRequest, HealthResponse, PaymentId, PaymentResponse, PaymentStatus,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GraphQL error: {0}")]
    GraphQl(String),
}

/// Payments API client.
pub struct PaymentsClient {
    base_url: String,
    http: Client,
}

const PAYMENT_FIELDS: &str = "id orderId amount paymentStatus";

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Ok(false);
        }
        let body: HealthResponse = resp.json().await?;
        Ok(body.status == "ok")
    }

    /// Confirms a payment for an order.
    pub async fn confirm_payment(
        &self,
        order_id: i64,
        amount: f64,
    ) -> Result<PaymentResponse, ClientError> {
        let req = ConfirmPaymentRequest { order_id, amount };
        let resp = self
            .http
            .post(format!("{}/payment", self.base_url))
            .json(&req)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Gets a payment by ID; `None` when the service answers 404.
    pub async fn get_payment_status(
        &self,
        id: PaymentId,
    ) -> Result<Option<PaymentResponse>, ClientError> {
        let resp = self
            .http
            .get(format!("{}/payment-status", self.base_url))
            .query(&[("id", id.get())])
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.handle_response(resp).await.map(Some)
    }

    /// Lists payments, optionally for one order.
    pub async fn list_payments(
        &self,
        order_id: Option<i64>,
    ) -> Result<Vec<PaymentResponse>, ClientError> {
        #[derive(Deserialize)]
        struct Data {
            payments: Vec<GqlPayment>,
        }

        let query = format!(
            "query($orderId: ID) {{ payments(orderId: $orderId) {{ {} }} }}",
            PAYMENT_FIELDS
        );
        let variables = serde_json::json!({ "orderId": order_id.map(|id| id.to_string()) });
        let data: Data = self.graphql(&query, variables).await?;
        data.payments.into_iter().map(GqlPayment::into_response).collect()
    }

    /// Overwrites a payment's status; `None` when no payment has `id`.
    pub async fn update_payment_status(
        &self,
        id: PaymentId,
        status: PaymentStatus,
    ) -> Result<Option<PaymentResponse>, ClientError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            update_payment_status: Option<GqlPayment>,
        }

        let query = format!(
            "mutation($id: ID!, $status: PaymentStatus!) {{ updatePaymentStatus(id: $id, status: $status) {{ {} }} }}",
            PAYMENT_FIELDS
        );
        let variables = serde_json::json!({ "id": id.to_string(), "status": status });
        let data: Data = self.graphql(&query, variables).await?;
        data.update_payment_status
            .map(GqlPayment::into_response)
            .transpose()
    }

    /// Runs a GraphQL document and returns its `data`.
    pub async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ClientError> {
        #[derive(Deserialize)]
        struct Envelope {
            data: Option<serde_json::Value>,
            #[serde(default)]
            errors: Vec<GqlError>,
        }

        #[derive(Deserialize)]
        struct GqlError {
            message: String,
        }

        let resp = self
            .http
            .post(format!("{}/graphql", self.base_url))
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await?;
        let envelope: Envelope = self.handle_response(resp).await?;

        if let Some(err) = envelope.errors.into_iter().next() {
            return Err(ClientError::GraphQl(err.message));
        }
        let data = envelope
            .data
            .ok_or_else(|| ClientError::GraphQl("response has no data".into()))?;
        Ok(serde_json::from_value(data)?)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("detail").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Payment as shaped by the GraphQL schema (ids are strings).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlPayment {
    id: String,
    order_id: String,
    amount: f64,
    payment_status: String,
}

impl GqlPayment {
    fn into_response(self) -> Result<PaymentResponse, ClientError> {
        let id: PaymentId = self
            .id
            .parse()
            .map_err(|_| ClientError::GraphQl(format!("invalid payment id: {}", self.id)))?;
        let order_id: i64 = self
            .order_id
            .parse()
            .map_err(|_| ClientError::GraphQl(format!("invalid order id: {}", self.order_id)))?;
        Ok(PaymentResponse {
            id,
            order_id,
            amount: self.amount,
            payment_status: self.payment_status,
        })
    }
}
