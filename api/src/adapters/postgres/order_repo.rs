//! PostgreSQL adapter for OrderRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{
    BranchId, ModificationRequest, NewOrder, Order, OrderId, OrderItem, OrderStatus,
};
use crate::domain::ports::OrderRepository;
use crate::entity::orders;
use crate::error::DomainError;

/// PostgreSQL implementation of OrderRepository
pub struct PostgresOrderRepository {
    db: DatabaseConnection,
}

impl PostgresOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: &OrderId) -> Result<orders::Model, DomainError> {
        orders::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("Order {} not found", id)))
    }

    /// Sequence number shown to customers, restarting each UTC day
    async fn next_daily_seq(&self, now: DateTime<Utc>) -> Result<i64, DomainError> {
        let day_start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().fixed_offset())
            .unwrap_or_else(|| now.fixed_offset());

        let today = orders::Entity::find()
            .filter(orders::Column::CreatedAt.gte(day_start))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(today as i64 + 1)
    }

    fn items_to_json(items: &[OrderItem]) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(items)
            .map_err(|e| DomainError::Internal(format!("Failed to serialize items: {}", e)))
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let result = orders::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(
        &self,
        branch_id: Option<BranchId>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, DomainError> {
        let mut query = orders::Entity::find().order_by_desc(orders::Column::CreatedAt);
        if let Some(branch_id) = branch_id {
            query = query.filter(orders::Column::BranchId.eq(branch_id.0));
        }
        if let Some(status) = status {
            query = query.filter(orders::Column::Status.eq(status.to_string()));
        }

        let results = query
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>, DomainError> {
        let results = orders::Entity::find()
            .filter(orders::Column::CreatedAt.gte(start.fixed_offset()))
            .filter(orders::Column::CreatedAt.lte(end.fixed_offset()))
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError> {
        let now = Utc::now();
        let daily_seq = self.next_daily_seq(now).await?;

        let model = orders::ActiveModel {
            daily_seq: Set(daily_seq),
            branch_id: Set(order.branch_id.0),
            customer_id: Set(order.customer_id),
            address_id: Set(order.address_id),
            items: Set(Self::items_to_json(&order.items)?),
            kitchen_notes: Set(order.kitchen_notes.clone()),
            subtotal: Set(order.subtotal),
            delivery_fee: Set(order.delivery_fee),
            total_price: Set(order.subtotal + order.delivery_fee),
            status: Set(OrderStatus::Pending.to_string()),
            customer_name: Set(order.customer_name.clone()),
            customer_phone: Set(order.customer_phone.clone()),
            delivery_address: Set(order.delivery_address.clone()),
            delivery_lat: Set(order.delivery_lat),
            delivery_lng: Set(order.delivery_lng),
            modification_pending: Set(false),
            created_at: Set(Some(now.fixed_offset())),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        changed_at: DateTime<Utc>,
        cancellation_reason: Option<&str>,
    ) -> Result<Order, DomainError> {
        let mut active = self.find_model(id).await?.into_active_model();
        let stamp = Some(changed_at.fixed_offset());

        active.status = Set(status.to_string());
        match status {
            OrderStatus::Accepted => active.accepted_at = Set(stamp),
            OrderStatus::InKitchen => active.in_kitchen_at = Set(stamp),
            OrderStatus::OutForDelivery => active.out_for_delivery_at = Set(stamp),
            OrderStatus::Done => active.done_at = Set(stamp),
            OrderStatus::Cancelled => {
                active.cancelled_at = Set(stamp);
                if let Some(reason) = cancellation_reason {
                    active.cancellation_reason = Set(Some(reason.to_string()));
                }
            }
            OrderStatus::Pending => {}
        }

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn set_modification_request(
        &self,
        id: &OrderId,
        request: &ModificationRequest,
    ) -> Result<Order, DomainError> {
        let payload = serde_json::to_value(request).map_err(|e| {
            DomainError::Internal(format!("Failed to serialize modification request: {}", e))
        })?;

        let mut active = self.find_model(id).await?.into_active_model();
        active.modification_pending = Set(true);
        active.modification_request = Set(Some(payload));

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn apply_modification(
        &self,
        id: &OrderId,
        items: &[OrderItem],
        notes: Option<&str>,
        subtotal: f64,
        total_price: f64,
    ) -> Result<Order, DomainError> {
        let mut active = self.find_model(id).await?.into_active_model();
        active.items = Set(Self::items_to_json(items)?);
        active.kitchen_notes = Set(notes.map(|n| n.to_string()));
        active.subtotal = Set(subtotal);
        active.total_price = Set(total_price);
        active.modification_pending = Set(false);
        active.modification_request = Set(None);

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn clear_modification_request(&self, id: &OrderId) -> Result<Order, DomainError> {
        let mut active = self.find_model(id).await?.into_active_model();
        active.modification_pending = Set(false);
        active.modification_request = Set(None);

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn set_customer_alert(&self, id: &OrderId, message: &str) -> Result<Order, DomainError> {
        let mut active = self.find_model(id).await?.into_active_model();
        active.customer_alert_message = Set(Some(message.to_string()));

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        let to_utc = |dt: Option<chrono::DateTime<chrono::FixedOffset>>| {
            dt.map(|dt| dt.with_timezone(&Utc))
        };

        Order {
            id: OrderId(model.id),
            daily_seq: model.daily_seq,
            branch_id: BranchId(model.branch_id),
            customer_id: model.customer_id,
            address_id: model.address_id,
            items: serde_json::from_value(model.items).unwrap_or_default(),
            kitchen_notes: model.kitchen_notes,
            subtotal: model.subtotal,
            delivery_fee: model.delivery_fee,
            total_price: model.total_price,
            status: model.status.parse().unwrap_or(OrderStatus::Pending),
            customer_name: model.customer_name,
            customer_phone: model.customer_phone,
            delivery_address: model.delivery_address,
            delivery_lat: model.delivery_lat,
            delivery_lng: model.delivery_lng,
            cancellation_reason: model.cancellation_reason,
            customer_alert_message: model.customer_alert_message,
            modification_pending: model.modification_pending,
            modification_request: model
                .modification_request
                .and_then(|v| serde_json::from_value(v).ok()),
            created_at: to_utc(model.created_at).unwrap_or_else(Utc::now),
            accepted_at: to_utc(model.accepted_at),
            in_kitchen_at: to_utc(model.in_kitchen_at),
            out_for_delivery_at: to_utc(model.out_for_delivery_at),
            done_at: to_utc(model.done_at),
            cancelled_at: to_utc(model.cancelled_at),
        }
    }
}
