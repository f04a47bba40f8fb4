//! Job Board REST API
//!
//! This crate provides the Axum-based HTTP API: signup and login, the
//! public job listing, and the token-protected job, profile and payment
//! endpoints.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
