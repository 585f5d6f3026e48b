//! HTTP handlers
//!
//! Thin axum handlers: extract, delegate to a service, shape the response.

pub mod analytics;
pub mod branches;
pub mod coverage;
pub mod orders;
