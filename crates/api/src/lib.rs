//! HTTP API layer for appeals-rs.
//!
//! This crate provides the REST API over the appeal lifecycle service:
//!
//! - **Endpoints**: the `/appeals` router
//! - **State**: shared application state for handlers
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
