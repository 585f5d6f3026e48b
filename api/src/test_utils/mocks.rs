//! In-memory repository implementations for tests

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    Branch, BranchId, CustomerAddress, ModificationRequest, NewBranch, NewOrder, Order, OrderId,
    OrderItem, OrderStatus,
};
use crate::domain::ports::{BranchRepository, CustomerAddressRepository, OrderRepository};
use crate::error::DomainError;

/// In-memory BranchRepository
#[derive(Default)]
pub struct InMemoryBranchRepository {
    branches: RwLock<HashMap<i64, Branch>>,
}

impl InMemoryBranchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branch(self, branch: Branch) -> Self {
        self.branches.write().unwrap().insert(branch.id.0, branch);
        self
    }
}

#[async_trait]
impl BranchRepository for InMemoryBranchRepository {
    async fn find_active(&self) -> Result<Vec<Branch>, DomainError> {
        let mut branches: Vec<Branch> = self
            .branches
            .read()
            .unwrap()
            .values()
            .filter(|b| b.is_active)
            .cloned()
            .collect();
        // Stable id order, matching the real adapter's contract
        branches.sort_by_key(|b| b.id.0);
        Ok(branches)
    }

    async fn find_all(&self) -> Result<Vec<Branch>, DomainError> {
        let mut branches: Vec<Branch> = self.branches.read().unwrap().values().cloned().collect();
        branches.sort_by_key(|b| b.id.0);
        Ok(branches)
    }

    async fn find_by_id(&self, id: &BranchId) -> Result<Option<Branch>, DomainError> {
        Ok(self.branches.read().unwrap().get(&id.0).cloned())
    }

    async fn create(&self, branch: &NewBranch) -> Result<Branch, DomainError> {
        let mut branches = self.branches.write().unwrap();
        let id = branches.keys().max().copied().unwrap_or(0) + 1;
        let created = Branch {
            id: BranchId(id),
            name: branch.name.clone(),
            phone_contact: branch.phone_contact.clone(),
            zones: branch.zones.clone(),
            is_active: branch.is_active,
            created_at: Utc::now(),
        };
        branches.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: &BranchId, branch: &NewBranch) -> Result<Branch, DomainError> {
        let mut branches = self.branches.write().unwrap();
        let existing = branches
            .get_mut(&id.0)
            .ok_or_else(|| DomainError::NotFound(format!("Branch {} not found", id)))?;
        existing.name = branch.name.clone();
        existing.phone_contact = branch.phone_contact.clone();
        existing.zones = branch.zones.clone();
        existing.is_active = branch.is_active;
        Ok(existing.clone())
    }
}

/// In-memory OrderRepository
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<i64, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(self, order: Order) -> Self {
        self.orders.write().unwrap().insert(order.id.0, order);
        self
    }

    fn mutate<F>(&self, id: &OrderId, f: F) -> Result<Order, DomainError>
    where
        F: FnOnce(&mut Order),
    {
        let mut orders = self.orders.write().unwrap();
        let order = orders
            .get_mut(&id.0)
            .ok_or_else(|| DomainError::NotFound(format!("Order {} not found", id)))?;
        f(order);
        Ok(order.clone())
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.read().unwrap().get(&id.0).cloned())
    }

    async fn list(
        &self,
        branch_id: Option<BranchId>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, DomainError> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .unwrap()
            .values()
            .filter(|o| branch_id.map_or(true, |b| o.branch_id == b))
            .filter(|o| status.map_or(true, |s| o.status == s))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(orders)
    }

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>, DomainError> {
        let orders = self
            .orders
            .read()
            .unwrap()
            .values()
            .filter(|o| o.created_at >= start && o.created_at <= end)
            .cloned()
            .collect();
        Ok(orders)
    }

    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().unwrap();
        let id = orders.keys().max().copied().unwrap_or(0) + 1;
        let now = Utc::now();
        let today = now.date_naive();
        let daily_seq = orders
            .values()
            .filter(|o| o.created_at.date_naive() == today)
            .count() as i64
            + 1;

        let created = Order {
            id: OrderId(id),
            daily_seq,
            branch_id: order.branch_id,
            customer_id: order.customer_id,
            address_id: order.address_id,
            items: order.items.clone(),
            kitchen_notes: order.kitchen_notes.clone(),
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total_price: order.subtotal + order.delivery_fee,
            status: OrderStatus::Pending,
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            delivery_address: order.delivery_address.clone(),
            delivery_lat: order.delivery_lat,
            delivery_lng: order.delivery_lng,
            cancellation_reason: None,
            customer_alert_message: None,
            modification_pending: false,
            modification_request: None,
            created_at: now,
            accepted_at: None,
            in_kitchen_at: None,
            out_for_delivery_at: None,
            done_at: None,
            cancelled_at: None,
        };
        orders.insert(id, created.clone());
        Ok(created)
    }

    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        changed_at: DateTime<Utc>,
        cancellation_reason: Option<&str>,
    ) -> Result<Order, DomainError> {
        self.mutate(id, |order| {
            order.status = status;
            match status {
                OrderStatus::Pending => {}
                OrderStatus::Accepted => order.accepted_at = Some(changed_at),
                OrderStatus::InKitchen => order.in_kitchen_at = Some(changed_at),
                OrderStatus::OutForDelivery => order.out_for_delivery_at = Some(changed_at),
                OrderStatus::Done => order.done_at = Some(changed_at),
                OrderStatus::Cancelled => {
                    order.cancelled_at = Some(changed_at);
                    order.cancellation_reason = cancellation_reason.map(str::to_string);
                }
            }
        })
    }

    async fn set_modification_request(
        &self,
        id: &OrderId,
        request: &ModificationRequest,
    ) -> Result<Order, DomainError> {
        self.mutate(id, |order| {
            order.modification_pending = true;
            order.modification_request = Some(request.clone());
        })
    }

    async fn apply_modification(
        &self,
        id: &OrderId,
        items: &[OrderItem],
        notes: Option<&str>,
        subtotal: f64,
        total_price: f64,
    ) -> Result<Order, DomainError> {
        self.mutate(id, |order| {
            order.items = items.to_vec();
            order.kitchen_notes = notes.map(str::to_string);
            order.subtotal = subtotal;
            order.total_price = total_price;
            order.modification_pending = false;
            order.modification_request = None;
        })
    }

    async fn clear_modification_request(&self, id: &OrderId) -> Result<Order, DomainError> {
        self.mutate(id, |order| {
            order.modification_pending = false;
            order.modification_request = None;
        })
    }

    async fn set_customer_alert(&self, id: &OrderId, message: &str) -> Result<Order, DomainError> {
        self.mutate(id, |order| {
            order.customer_alert_message = Some(message.to_string());
        })
    }
}

/// In-memory CustomerAddressRepository
#[derive(Default)]
pub struct InMemoryCustomerAddressRepository {
    addresses: RwLock<HashMap<i64, CustomerAddress>>,
}

impl InMemoryCustomerAddressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(self, address: CustomerAddress) -> Self {
        self.addresses.write().unwrap().insert(address.id, address);
        self
    }
}

#[async_trait]
impl CustomerAddressRepository for InMemoryCustomerAddressRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<CustomerAddress>, DomainError> {
        Ok(self.addresses.read().unwrap().get(&id).cloned())
    }
}
