//! Payment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a Payment, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PaymentId(i64);

impl PaymentId {
    /// Wraps a raw row identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for PaymentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Recognized payment states.
///
/// Transitions between states are unconstrained: any status may be
/// overwritten with any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a status string outside `PENDING | PAID | FAILED`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown payment status: {0}")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PAID" => Ok(PaymentStatus::Paid),
            "FAILED" => Ok(PaymentStatus::Failed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A persisted payment record.
///
/// `payment_status` is kept as the raw stored string: the update path writes
/// whatever it is given, so a row may hold a value outside [`PaymentStatus`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Store-assigned identifier, immutable once set
    pub id: PaymentId,
    /// Originating order (not unique)
    pub order_id: i64,
    /// Monetary amount
    pub amount: f64,
    /// Current status string
    pub payment_status: String,
    /// When the payment was confirmed
    pub payment_date: DateTime<Utc>,
}

impl Payment {
    /// Returns the status if it is one of the recognized values.
    pub fn status(&self) -> Option<PaymentStatus> {
        self.payment_status.parse().ok()
    }

    /// Reconstructs a payment from database fields.
    pub fn from_parts(
        id: PaymentId,
        order_id: i64,
        amount: f64,
        payment_status: String,
        payment_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_id,
            amount,
            payment_status,
            payment_date,
        }
    }
}

/// A payment that has not been written yet; the store assigns its `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub order_id: i64,
    pub amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_date: DateTime<Utc>,
}

impl NewPayment {
    /// A confirmed payment: always `PAID`, stamped with the current time.
    pub fn confirmed(order_id: i64, amount: f64) -> Self {
        Self {
            order_id,
            amount,
            payment_status: PaymentStatus::Paid,
            payment_date: Utc::now(),
        }
    }

    /// Attaches the store-assigned id.
    pub fn into_payment(self, id: PaymentId) -> Payment {
        Payment {
            id,
            order_id: self.order_id,
            amount: self.amount,
            payment_status: self.payment_status.to_string(),
            payment_date: self.payment_date,
        }
    }
}
