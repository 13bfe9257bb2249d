//! GraphQL adapter.
//!
//! Exposes the same four payment operations as the service layer through a
//! single `/graphql` endpoint. Resolvers share nothing but the service handle.

use std::marker::PhantomData;
use std::sync::Arc;

use async_graphql::{
    Context, EmptySubscription, Enum, ErrorExtensions, ID, Object, Schema, http::GraphiQLSource,
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use payments_types::{AppError, Payment, PaymentId, PaymentRepository, PaymentStatus};

use super::handlers::{AppState, INTERNAL_ERROR_DETAIL};
use crate::PaymentService;

/// Executable schema for a given repository adapter.
pub type PaymentSchema<R> = Schema<QueryRoot<R>, MutationRoot<R>, EmptySubscription>;

/// Builds the schema with the service handle attached as context data.
pub fn build_schema<R: PaymentRepository>(service: Arc<PaymentService<R>>) -> PaymentSchema<R> {
    Schema::build(
        QueryRoot(PhantomData),
        MutationRoot(PhantomData),
        EmptySubscription,
    )
    .data(service)
    .extension(async_graphql::extensions::Tracing)
    .finish()
}

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// GraphQL mirror of [`PaymentStatus`].
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "PaymentStatus")]
pub enum GqlPaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl From<PaymentStatus> for GqlPaymentStatus {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Pending => GqlPaymentStatus::Pending,
            PaymentStatus::Paid => GqlPaymentStatus::Paid,
            PaymentStatus::Failed => GqlPaymentStatus::Failed,
        }
    }
}

impl From<GqlPaymentStatus> for PaymentStatus {
    fn from(status: GqlPaymentStatus) -> Self {
        match status {
            GqlPaymentStatus::Pending => PaymentStatus::Pending,
            GqlPaymentStatus::Paid => PaymentStatus::Paid,
            GqlPaymentStatus::Failed => PaymentStatus::Failed,
        }
    }
}

/// GraphQL view of a payment record.
pub struct GqlPayment(Payment);

#[Object(name = "Payment")]
impl GqlPayment {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn order_id(&self) -> ID {
        ID(self.0.order_id.to_string())
    }

    async fn amount(&self) -> f64 {
        self.0.amount
    }

    /// Errors for rows whose stored status is outside the enum.
    async fn payment_status(&self) -> async_graphql::Result<GqlPaymentStatus> {
        self.0.status().map(Into::into).ok_or_else(|| {
            async_graphql::Error::new(format!(
                "Unrecognized payment status: {}",
                self.0.payment_status
            ))
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Roots
// ─────────────────────────────────────────────────────────────────────────────

pub struct QueryRoot<R>(PhantomData<fn() -> R>);

#[Object]
impl<R: PaymentRepository> QueryRoot<R> {
    /// Look up one payment; null when no payment has this id.
    async fn payment_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<GqlPayment>> {
        let id = parse_id(&id, "payment id")?;
        let payment = service::<R>(ctx)?
            .get_payment_by_id(PaymentId::new(id))
            .await
            .map_err(service_error)?;
        Ok(payment.map(GqlPayment))
    }

    /// All payments, or only those for `orderId`.
    async fn payments(
        &self,
        ctx: &Context<'_>,
        order_id: Option<ID>,
    ) -> async_graphql::Result<Vec<GqlPayment>> {
        let order_id = order_id
            .map(|id| parse_id(&id, "order id"))
            .transpose()?;
        let payments = service::<R>(ctx)?
            .get_payments(order_id)
            .await
            .map_err(service_error)?;
        Ok(payments.into_iter().map(GqlPayment).collect())
    }
}

pub struct MutationRoot<R>(PhantomData<fn() -> R>);

#[Object]
impl<R: PaymentRepository> MutationRoot<R> {
    /// Record a confirmed (`PAID`) payment for an order.
    async fn confirm_payment(
        &self,
        ctx: &Context<'_>,
        order_id: ID,
        amount: f64,
    ) -> async_graphql::Result<GqlPayment> {
        let order_id = parse_id(&order_id, "order id")?;
        let payment = service::<R>(ctx)?
            .confirm_payment(order_id, amount)
            .await
            .map_err(service_error)?;
        Ok(GqlPayment(payment))
    }

    /// Overwrite a payment's status; null when no payment has this id.
    async fn update_payment_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: GqlPaymentStatus,
    ) -> async_graphql::Result<Option<GqlPayment>> {
        let id = parse_id(&id, "payment id")?;
        let status = PaymentStatus::from(status);
        let payment = service::<R>(ctx)?
            .update_payment_status(PaymentId::new(id), status.as_str())
            .await
            .map_err(service_error)?;
        Ok(payment.map(GqlPayment))
    }
}

fn service<'a, R: PaymentRepository>(
    ctx: &Context<'a>,
) -> async_graphql::Result<&'a Arc<PaymentService<R>>> {
    ctx.data::<Arc<PaymentService<R>>>()
}

fn service_error(err: AppError) -> async_graphql::Error {
    match err {
        AppError::Internal(msg) => {
            tracing::error!(error = %msg, "resolver failed");
            async_graphql::Error::new(INTERNAL_ERROR_DETAIL)
        }
        other => async_graphql::Error::new(other.to_string()),
    }
}

/// Parsed like `PaymentId::from_str`, so surrounding whitespace is rejected.
fn parse_id(id: &ID, what: &str) -> async_graphql::Result<i64> {
    id.parse::<PaymentId>().map(PaymentId::get).map_err(|_| {
        async_graphql::Error::new(format!("Invalid {}: {}", what, id.as_str()))
            .extend_with(|_, e| e.set("code", "BAD_USER_INPUT"))
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP
// ─────────────────────────────────────────────────────────────────────────────

/// Executes a GraphQL request against the schema.
#[tracing::instrument(skip_all)]
pub async fn graphql_handler<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GraphiQL playground.
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
