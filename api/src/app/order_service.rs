//! Order service
//!
//! Order creation (with authoritative coverage re-verification), lifecycle
//! transitions, the modification handshake and customer alerts.

use std::sync::Arc;

use chrono::Utc;

use crate::app::coverage_service::resolve_coverage;
use crate::domain::entities::{
    items_subtotal, CoverageResult, ModificationRequest, NewOrder, Order, OrderId, OrderItem,
    OrderStatus,
};
use crate::domain::ports::{BranchRepository, CustomerAddressRepository, OrderRepository};
use crate::error::AppError;

/// Input for placing a new order, as supplied by the bot layer
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub customer_id: i64,
    pub address_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
    pub kitchen_notes: Option<String>,
}

/// A freshly created order together with the resolved branch name
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub branch_name: String,
}

/// Service for managing orders
pub struct OrderService<OR, BR, CR>
where
    OR: OrderRepository,
    BR: BranchRepository,
    CR: CustomerAddressRepository,
{
    orders: Arc<OR>,
    branches: Arc<BR>,
    addresses: Arc<CR>,
}

impl<OR, BR, CR> OrderService<OR, BR, CR>
where
    OR: OrderRepository,
    BR: BranchRepository,
    CR: CustomerAddressRepository,
{
    pub fn new(orders: Arc<OR>, branches: Arc<BR>, addresses: Arc<CR>) -> Self {
        Self {
            orders,
            branches,
            addresses,
        }
    }

    /// Create a new order.
    ///
    /// Coverage is re-resolved here against a fresh branch snapshot, even
    /// though the bot already ran a check-coverage call: zones can change
    /// between the customer's check and submission, and a client-claimed
    /// branch or fee is a pricing-integrity hole. If the address is no
    /// longer covered the order is rejected outright; there is no fallback
    /// branch and nothing is persisted.
    pub async fn create_order(&self, request: PlaceOrder) -> Result<PlacedOrder, AppError> {
        if request.items.is_empty() {
            return Err(AppError::BadRequest(
                "Order must contain at least one item".to_string(),
            ));
        }

        let address = self
            .addresses
            .find_by_id(request.address_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Address {} not found", request.address_id)))?;

        let location = address.location();
        if !location.is_valid() {
            return Err(AppError::BadRequest(
                "Stored address has invalid coordinates".to_string(),
            ));
        }

        let snapshot = self.branches.find_active().await?;
        let (branch_id, branch_name, delivery_fee) =
            match resolve_coverage(&location, &snapshot) {
                CoverageResult::Covered {
                    branch_id,
                    branch_name,
                    delivery_fee,
                    ..
                } => (branch_id, branch_name, delivery_fee),
                CoverageResult::NotCovered => {
                    return Err(AppError::BadRequest(
                        "Address location is no longer in delivery zone".to_string(),
                    ));
                }
            };

        let subtotal = items_subtotal(&request.items);

        let new_order = NewOrder {
            branch_id,
            customer_id: request.customer_id,
            address_id: request.address_id,
            items: request.items,
            kitchen_notes: request.kitchen_notes,
            subtotal,
            delivery_fee,
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            delivery_address: address.address_text.clone(),
            delivery_lat: address.latitude,
            delivery_lng: address.longitude,
        };

        let order = self.orders.create(&new_order).await?;
        tracing::info!(
            order_id = %order.id,
            branch_id = %branch_id,
            delivery_fee,
            "Order created"
        );

        Ok(PlacedOrder { order, branch_name })
    }

    /// Fetch a single order
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, AppError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))
    }

    /// List orders for the console, optionally filtered
    pub async fn list_orders(
        &self,
        branch_id: Option<crate::domain::entities::BranchId>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, AppError> {
        Ok(self.orders.list(branch_id, status).await?)
    }

    /// Move an order to a new status, stamping the matching timestamp.
    /// Cancellation records the supplied reason.
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        cancellation_reason: Option<&str>,
    ) -> Result<Order, AppError> {
        // Existence check gives a clean 404 instead of a repo error
        self.get_order(id).await?;

        let reason = match status {
            OrderStatus::Cancelled => cancellation_reason,
            _ => None,
        };

        let order = self
            .orders
            .update_status(id, status, Utc::now(), reason)
            .await?;

        tracing::info!(order_id = %id, status = %status, "Order status updated");
        Ok(order)
    }

    /// Record a modification request from the bot.
    ///
    /// Refused once the order is out for delivery, done or cancelled.
    pub async fn request_modification(
        &self,
        id: &OrderId,
        items: Vec<OrderItem>,
        notes: Option<String>,
    ) -> Result<Order, AppError> {
        if items.is_empty() {
            return Err(AppError::BadRequest(
                "\"items\" must be a non-empty array".to_string(),
            ));
        }

        let order = self.get_order(id).await?;
        if !order.can_modify() {
            return Err(AppError::BadRequest(
                "Order cannot be modified at this stage".to_string(),
            ));
        }

        let request = ModificationRequest {
            items,
            notes,
            requested_at: Utc::now(),
        };

        Ok(self.orders.set_modification_request(id, &request).await?)
    }

    /// Kitchen decision on a pending modification. Accept applies the
    /// requested items/notes and recomputes the totals; decline discards
    /// the request. Both clear the pending flag. An order without a pending
    /// request is returned unchanged.
    pub async fn resolve_modification(
        &self,
        id: &OrderId,
        accept: bool,
    ) -> Result<Order, AppError> {
        let order = self.get_order(id).await?;

        let Some(request) = order.modification_request else {
            return Ok(order);
        };

        if !accept {
            return Ok(self.orders.clear_modification_request(id).await?);
        }

        let subtotal = items_subtotal(&request.items);
        let total_price = subtotal + order.delivery_fee;

        Ok(self
            .orders
            .apply_modification(
                id,
                &request.items,
                request.notes.as_deref(),
                subtotal,
                total_price,
            )
            .await?)
    }

    /// Store an alert message for the customer on the order. Delivery of
    /// the alert (SMS/WhatsApp) is a collaborator concern.
    pub async fn send_customer_alert(
        &self,
        id: &OrderId,
        message: &str,
    ) -> Result<Order, AppError> {
        if message.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Alert message must not be empty".to_string(),
            ));
        }
        self.get_order(id).await?;
        Ok(self.orders.set_customer_alert(id, message).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::BranchId;
    use crate::test_utils::{
        test_address, test_branch, test_item, test_order, InMemoryBranchRepository,
        InMemoryCustomerAddressRepository, InMemoryOrderRepository,
    };

    fn service(
        orders: InMemoryOrderRepository,
        branches: InMemoryBranchRepository,
        addresses: InMemoryCustomerAddressRepository,
    ) -> OrderService<
        InMemoryOrderRepository,
        InMemoryBranchRepository,
        InMemoryCustomerAddressRepository,
    > {
        OrderService::new(Arc::new(orders), Arc::new(branches), Arc::new(addresses))
    }

    fn place_order_request() -> PlaceOrder {
        PlaceOrder {
            customer_id: 7,
            address_id: 1,
            customer_name: "Ahmed".to_string(),
            customer_phone: "0100000000".to_string(),
            items: vec![test_item("Burger", 2, 85.0)],
            kitchen_notes: Some("no pickles".to_string()),
        }
    }

    #[tokio::test]
    async fn create_order_assigns_branch_and_fee_from_resolver() {
        let orders = InMemoryOrderRepository::new();
        let branches =
            InMemoryBranchRepository::new().with_branch(test_branch(BranchId(3), "Cairo"));
        // Address inside the fixture triangle zone
        let addresses = InMemoryCustomerAddressRepository::new()
            .with_address(test_address(1, 30.045, 31.236));

        let svc = service(orders, branches, addresses);
        let placed = svc.create_order(place_order_request()).await.unwrap();

        assert_eq!(placed.order.branch_id, BranchId(3));
        assert_eq!(placed.order.delivery_fee, 15.0);
        assert_eq!(placed.order.subtotal, 170.0);
        assert_eq!(placed.order.total_price, 185.0);
        assert_eq!(placed.order.status, OrderStatus::Pending);
        assert_eq!(placed.branch_name, "Cairo");
    }

    #[tokio::test]
    async fn create_order_rejects_uncovered_address_and_persists_nothing() {
        let orders = InMemoryOrderRepository::new();
        let branches =
            InMemoryBranchRepository::new().with_branch(test_branch(BranchId(3), "Cairo"));
        // Far outside any configured zone
        let addresses =
            InMemoryCustomerAddressRepository::new().with_address(test_address(1, 50.0, 50.0));

        let svc = service(orders, branches, addresses);
        let result = svc.create_order(place_order_request()).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(svc.orders.list(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_order_rejects_unknown_address() {
        let svc = service(
            InMemoryOrderRepository::new(),
            InMemoryBranchRepository::new().with_branch(test_branch(BranchId(3), "Cairo")),
            InMemoryCustomerAddressRepository::new(),
        );

        let result = svc.create_order(place_order_request()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_order_rejects_empty_items() {
        let svc = service(
            InMemoryOrderRepository::new(),
            InMemoryBranchRepository::new(),
            InMemoryCustomerAddressRepository::new(),
        );

        let mut request = place_order_request();
        request.items.clear();
        let result = svc.create_order(request).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn update_status_stamps_timestamps() {
        let orders = InMemoryOrderRepository::new().with_order(test_order(1, BranchId(1)));
        let svc = service(
            orders,
            InMemoryBranchRepository::new(),
            InMemoryCustomerAddressRepository::new(),
        );

        let order = svc
            .update_status(&OrderId(1), OrderStatus::Accepted, None)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Accepted);
        assert!(order.accepted_at.is_some());

        let order = svc
            .update_status(&OrderId(1), OrderStatus::Done, None)
            .await
            .unwrap();
        assert!(order.done_at.is_some());
    }

    #[tokio::test]
    async fn cancellation_records_reason() {
        let orders = InMemoryOrderRepository::new().with_order(test_order(1, BranchId(1)));
        let svc = service(
            orders,
            InMemoryBranchRepository::new(),
            InMemoryCustomerAddressRepository::new(),
        );

        let order = svc
            .update_status(&OrderId(1), OrderStatus::Cancelled, Some("Out of stock"))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.cancellation_reason.as_deref(), Some("Out of stock"));
        assert!(order.cancelled_at.is_some());
    }

    #[tokio::test]
    async fn modification_refused_after_dispatch() {
        let mut order = test_order(1, BranchId(1));
        order.status = OrderStatus::OutForDelivery;
        let svc = service(
            InMemoryOrderRepository::new().with_order(order),
            InMemoryBranchRepository::new(),
            InMemoryCustomerAddressRepository::new(),
        );

        let result = svc
            .request_modification(&OrderId(1), vec![test_item("Cola", 1, 15.0)], None)
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn accepted_modification_recomputes_totals() {
        let svc = service(
            InMemoryOrderRepository::new().with_order(test_order(1, BranchId(1))),
            InMemoryBranchRepository::new(),
            InMemoryCustomerAddressRepository::new(),
        );

        svc.request_modification(
            &OrderId(1),
            vec![test_item("Pizza", 1, 120.0), test_item("Cola", 2, 15.0)],
            Some("extra cheese".to_string()),
        )
        .await
        .unwrap();

        let order = svc.resolve_modification(&OrderId(1), true).await.unwrap();
        assert_eq!(order.subtotal, 150.0);
        assert_eq!(order.total_price, 150.0 + order.delivery_fee);
        assert_eq!(order.kitchen_notes.as_deref(), Some("extra cheese"));
        assert!(!order.modification_pending);
        assert!(order.modification_request.is_none());
    }

    #[tokio::test]
    async fn declined_modification_keeps_original_items() {
        let original = test_order(1, BranchId(1));
        let original_subtotal = original.subtotal;
        let svc = service(
            InMemoryOrderRepository::new().with_order(original),
            InMemoryBranchRepository::new(),
            InMemoryCustomerAddressRepository::new(),
        );

        svc.request_modification(&OrderId(1), vec![test_item("Pizza", 1, 120.0)], None)
            .await
            .unwrap();

        let order = svc.resolve_modification(&OrderId(1), false).await.unwrap();
        assert_eq!(order.subtotal, original_subtotal);
        assert!(!order.modification_pending);
        assert!(order.modification_request.is_none());
    }

    #[tokio::test]
    async fn resolving_without_pending_request_is_a_no_op() {
        let svc = service(
            InMemoryOrderRepository::new().with_order(test_order(1, BranchId(1))),
            InMemoryBranchRepository::new(),
            InMemoryCustomerAddressRepository::new(),
        );

        let order = svc.resolve_modification(&OrderId(1), true).await.unwrap();
        assert_eq!(order.id, OrderId(1));
    }

    #[tokio::test]
    async fn customer_alert_is_stored() {
        let svc = service(
            InMemoryOrderRepository::new().with_order(test_order(1, BranchId(1))),
            InMemoryBranchRepository::new(),
            InMemoryCustomerAddressRepository::new(),
        );

        let order = svc
            .send_customer_alert(&OrderId(1), "Driver delayed by rain")
            .await
            .unwrap();
        assert_eq!(
            order.customer_alert_message.as_deref(),
            Some("Driver delayed by rain")
        );
    }
}
