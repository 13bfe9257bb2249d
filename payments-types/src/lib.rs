//! # Payments Types
//!
//! Domain types and port traits for the payment-record service.
//! This crate has ZERO external IO dependencies - only data structures
//! and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Payment, PaymentId, PaymentStatus)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for the REST boundary
//! - `error/` - Repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{NewPayment, Payment, PaymentId, PaymentStatus, UnknownStatus};
pub use dto::*;
pub use error::{AppError, RepoError};
pub use ports::PaymentRepository;
