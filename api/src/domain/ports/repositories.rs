//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! `find_active` is the coverage resolver's input contract: it returns only
//! branches with `is_active = true`, ordered deterministically, fetched
//! fresh on every call. The resolver never caches a snapshot because zone
//! edits between calls must be visible for fee correctness.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    Branch, BranchId, CustomerAddress, ModificationRequest, NewBranch, NewOrder, Order, OrderId,
    OrderItem, OrderStatus,
};
use crate::error::DomainError;

/// Repository for Branch entities
#[async_trait]
pub trait BranchRepository: Send + Sync {
    /// Fetch the current active-branch snapshot, in stable id order.
    /// This ordering is load-bearing: resolution is first-match.
    async fn find_active(&self) -> Result<Vec<Branch>, DomainError>;

    /// All branches, active or not (admin console)
    async fn find_all(&self) -> Result<Vec<Branch>, DomainError>;

    /// Find a branch by ID
    async fn find_by_id(&self, id: &BranchId) -> Result<Option<Branch>, DomainError>;

    /// Create a new branch
    async fn create(&self, branch: &NewBranch) -> Result<Branch, DomainError>;

    /// Replace a branch's editable fields (name, contact, zones, is_active)
    async fn update(&self, id: &BranchId, branch: &NewBranch) -> Result<Branch, DomainError>;
}

/// Repository for Order entities
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order by ID
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// List orders, optionally filtered by branch and/or status,
    /// most recent first
    async fn list(
        &self,
        branch_id: Option<BranchId>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, DomainError>;

    /// Orders created within a time window (analytics)
    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>, DomainError>;

    /// Persist a new order. The adapter assigns the id and the per-day
    /// `daily_seq`.
    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError>;

    /// Update status, stamping the matching lifecycle timestamp
    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        changed_at: DateTime<Utc>,
        cancellation_reason: Option<&str>,
    ) -> Result<Order, DomainError>;

    /// Record a pending modification request
    async fn set_modification_request(
        &self,
        id: &OrderId,
        request: &ModificationRequest,
    ) -> Result<Order, DomainError>;

    /// Apply an accepted modification: new items/notes and recomputed totals,
    /// clearing the pending request
    async fn apply_modification(
        &self,
        id: &OrderId,
        items: &[OrderItem],
        notes: Option<&str>,
        subtotal: f64,
        total_price: f64,
    ) -> Result<Order, DomainError>;

    /// Clear a pending modification request without applying it
    async fn clear_modification_request(&self, id: &OrderId) -> Result<Order, DomainError>;

    /// Store a customer alert message on the order
    async fn set_customer_alert(&self, id: &OrderId, message: &str) -> Result<Order, DomainError>;
}

/// Repository for customer addresses (read-only from this service's view;
/// the bot layer writes them)
#[async_trait]
pub trait CustomerAddressRepository: Send + Sync {
    /// Find an address by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<CustomerAddress>, DomainError>;
}
