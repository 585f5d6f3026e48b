//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM models in the `entity` module.

pub mod branch;
pub mod coverage;
pub mod customer;
pub mod order;
pub mod point;
pub mod zone;

pub use branch::{Branch, BranchId, NewBranch};
pub use coverage::CoverageResult;
pub use customer::CustomerAddress;
pub use order::{
    items_subtotal, ModificationRequest, NewOrder, Order, OrderId, OrderItem, OrderStatus,
};
pub use point::Point;
pub use zone::{VertexInput, Zone, ZoneInput};
