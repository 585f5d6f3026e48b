//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod analytics_service;
pub mod coverage_service;
pub mod order_service;

pub use analytics_service::{AnalyticsData, AnalyticsService};
pub use coverage_service::{resolve_coverage, CoverageService};
pub use order_service::{OrderService, PlaceOrder, PlacedOrder};
