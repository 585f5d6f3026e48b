//! SeaORM table models
//!
//! Persistence-shape models; conversion into domain entities happens in the
//! postgres adapters.

pub mod branches;
pub mod customer_addresses;
pub mod orders;
