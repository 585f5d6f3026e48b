//! Order domain entity
//!
//! An order is created by the bot layer, assigned to a branch by the
//! coverage resolver at creation time, and then moved through the kitchen
//! lifecycle by the manager console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::branch::BranchId;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    InKitchen,
    OutForDelivery,
    Done,
    Cancelled,
}

impl OrderStatus {
    /// Modification requests are refused once the food has left the kitchen
    /// (or the order is finished/cancelled).
    pub fn allows_modification(&self) -> bool {
        !matches!(
            self,
            OrderStatus::OutForDelivery | OrderStatus::Done | OrderStatus::Cancelled
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Accepted => write!(f, "accepted"),
            OrderStatus::InKitchen => write!(f, "in_kitchen"),
            OrderStatus::OutForDelivery => write!(f, "out_for_delivery"),
            OrderStatus::Done => write!(f, "done"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "accepted" => Ok(OrderStatus::Accepted),
            "in_kitchen" => Ok(OrderStatus::InKitchen),
            "out_for_delivery" => Ok(OrderStatus::OutForDelivery),
            "done" => Ok(OrderStatus::Done),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

/// A line item on an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub qty: u32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Sum of `price * qty` over a set of items
pub fn items_subtotal(items: &[OrderItem]) -> f64 {
    items
        .iter()
        .map(|item| item.price * f64::from(item.qty))
        .sum()
}

/// A pending modification awaiting the kitchen's accept/decline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationRequest {
    pub items: Vec<OrderItem>,
    pub notes: Option<String>,
    pub requested_at: DateTime<Utc>,
}

/// An order with its financials, lifecycle timestamps and address snapshot
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub daily_seq: i64,
    pub branch_id: BranchId,
    pub customer_id: i64,
    pub address_id: i64,

    // Content
    pub items: Vec<OrderItem>,
    pub kitchen_notes: Option<String>,

    // Financials
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total_price: f64,

    pub status: OrderStatus,

    // Snapshot taken at creation so later address edits don't rewrite history
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub delivery_lat: f64,
    pub delivery_lng: f64,

    // Exception handling
    pub cancellation_reason: Option<String>,
    pub customer_alert_message: Option<String>,
    pub modification_pending: bool,
    pub modification_request: Option<ModificationRequest>,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub in_kitchen_at: Option<DateTime<Utc>>,
    pub out_for_delivery_at: Option<DateTime<Utc>>,
    pub done_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn can_modify(&self) -> bool {
        self.status.allows_modification()
    }
}

/// Data needed to persist a new order, assembled by the order service after
/// the authoritative coverage re-verification
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub branch_id: BranchId,
    pub customer_id: i64,
    pub address_id: i64,
    pub items: Vec<OrderItem>,
    pub kitchen_notes: Option<String>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub delivery_lat: f64,
    pub delivery_lng: f64,
}
