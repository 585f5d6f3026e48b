//! Test utilities: entity fixtures and in-memory repository implementations.

pub mod fixtures;
pub mod mocks;

pub use fixtures::{
    test_address, test_branch, test_branch_with_zones, test_item, test_order, test_zone,
    triangle_zone,
};
pub use mocks::{
    InMemoryBranchRepository, InMemoryCustomerAddressRepository, InMemoryOrderRepository,
};
