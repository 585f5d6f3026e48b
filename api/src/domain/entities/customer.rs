//! Customer address entity
//!
//! Addresses are created by the bot layer ahead of ordering; order creation
//! re-reads them so the authoritative coverage check runs against the stored
//! coordinate, never a client-claimed one.

use serde::Serialize;

use super::point::Point;

/// A saved delivery address for a customer
#[derive(Debug, Clone, Serialize)]
pub struct CustomerAddress {
    pub id: i64,
    pub customer_id: i64,
    pub address_text: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CustomerAddress {
    pub fn location(&self) -> Point {
        Point::new(self.latitude, self.longitude)
    }
}
