//! PostgreSQL adapters

pub mod branch_repo;
pub mod customer_repo;
pub mod order_repo;

pub use branch_repo::PostgresBranchRepository;
pub use customer_repo::PostgresCustomerAddressRepository;
pub use order_repo::PostgresOrderRepository;
