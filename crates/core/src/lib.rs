//! Core business logic for appeals-rs.

pub mod services;

pub use services::*;
