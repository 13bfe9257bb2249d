//! # Payments Hex
//!
//! Application service layer plus REST and GraphQL adapters for the
//! payment-record service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates payment operations)
//! - `inbound/` - HTTP adapter (Axum server, REST handlers, GraphQL schema)
//! - `openapi/` - OpenAPI document for the REST surface
//!
//! The service is generic over `R: PaymentRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::PaymentService;
