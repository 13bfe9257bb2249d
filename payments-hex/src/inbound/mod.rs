//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer through two
//! front-ends: REST handlers and a GraphQL schema.

pub mod graphql;
mod handlers;
mod server;

pub use handlers::SERVICE_NAME;
pub use server::HttpServer;
