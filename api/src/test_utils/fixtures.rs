//! Entity fixtures for tests

use chrono::Utc;

use crate::domain::entities::{
    Branch, BranchId, CustomerAddress, Order, OrderId, OrderItem, OrderStatus, Point, Zone,
};

/// Axis-aligned square zone with corner `(lat0, lng0)` and the given side
/// length in degrees.
pub fn test_zone(name: &str, delivery_fee: f64, lat0: f64, lng0: f64, size: f64) -> Zone {
    Zone {
        name: name.to_string(),
        delivery_fee,
        polygon: vec![
            Point::new(lat0, lng0),
            Point::new(lat0 + size, lng0),
            Point::new(lat0 + size, lng0 + size),
            Point::new(lat0, lng0 + size),
        ],
    }
}

/// Small triangle around central Cairo; `(30.045, 31.236)` is inside it.
pub fn triangle_zone() -> Zone {
    Zone {
        name: "Center Triangle".to_string(),
        delivery_fee: 15.0,
        polygon: vec![
            Point::new(30.04, 31.23),
            Point::new(30.05, 31.24),
            Point::new(30.04, 31.24),
        ],
    }
}

/// Active branch covering the fixture triangle zone
pub fn test_branch(id: BranchId, name: &str) -> Branch {
    test_branch_with_zones(id, name, vec![triangle_zone()])
}

pub fn test_branch_with_zones(id: BranchId, name: &str, zones: Vec<Zone>) -> Branch {
    Branch {
        id,
        name: name.to_string(),
        phone_contact: Some("0223456789".to_string()),
        zones,
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn test_item(name: &str, qty: u32, price: f64) -> OrderItem {
    OrderItem {
        name: name.to_string(),
        qty,
        price,
        size: None,
        options: None,
    }
}

/// Pending order with one burger and the fixture delivery fee
pub fn test_order(id: i64, branch_id: BranchId) -> Order {
    let items = vec![test_item("Burger", 2, 85.0)];
    let subtotal = 170.0;
    let delivery_fee = 15.0;

    Order {
        id: OrderId(id),
        daily_seq: id,
        branch_id,
        customer_id: 7,
        address_id: 1,
        items,
        kitchen_notes: None,
        subtotal,
        delivery_fee,
        total_price: subtotal + delivery_fee,
        status: OrderStatus::Pending,
        customer_name: "Ahmed".to_string(),
        customer_phone: "0100000000".to_string(),
        delivery_address: "12 Tahrir Sq, Cairo".to_string(),
        delivery_lat: 30.045,
        delivery_lng: 31.236,
        cancellation_reason: None,
        customer_alert_message: None,
        modification_pending: false,
        modification_request: None,
        created_at: Utc::now(),
        accepted_at: None,
        in_kitchen_at: None,
        out_for_delivery_at: None,
        done_at: None,
        cancelled_at: None,
    }
}

pub fn test_address(id: i64, lat: f64, lng: f64) -> CustomerAddress {
    CustomerAddress {
        id,
        customer_id: 7,
        address_text: "12 Tahrir Sq, Cairo".to_string(),
        latitude: lat,
        longitude: lng,
    }
}
