//! Order handlers
//!
//! Bot endpoints (create, fetch, request modification) and console endpoints
//! (list, status transitions, modification resolution, customer alerts).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{BranchId, Order, OrderId, OrderItem, OrderStatus};
use crate::error::AppError;
use crate::AppState;

/// Status labels shown to customers through the bot (Arabic)
fn status_arabic(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "⏳ معلق",
        OrderStatus::Accepted => "✅ مقبول",
        OrderStatus::InKitchen => "👨‍🍳 بيجهز في المطبخ",
        OrderStatus::OutForDelivery => "🛵 خرج للتوصيل",
        OrderStatus::Done => "🎉 تم التوصيل",
        OrderStatus::Cancelled => "❌ ملغي",
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: i64,
    pub address_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
    pub kitchen_notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: OrderId,
    pub daily_seq: i64,
    pub branch_name: String,
    pub total_price: f64,
    pub message: String,
}

/// POST /api/orders
///
/// Creates an order; the branch and fee come from the authoritative coverage
/// re-verification, never from the client.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), AppError> {
    let placed = state
        .order_service
        .create_order(crate::app::PlaceOrder {
            customer_id: request.customer_id,
            address_id: request.address_id,
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            items: request.items,
            kitchen_notes: request.kitchen_notes,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            success: true,
            order_id: placed.order.id,
            daily_seq: placed.order.daily_seq,
            branch_name: placed.branch_name,
            total_price: placed.order.total_price,
            message: "Order created successfully".to_string(),
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub status_arabic: &'static str,
    pub order: Order,
}

/// GET /api/orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state.order_service.get_order(&OrderId(id)).await?;

    Ok(Json(OrderResponse {
        success: true,
        status_arabic: status_arabic(order.status),
        order,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub branch_id: Option<i64>,
    pub status: Option<String>,
}

/// GET /api/orders?branch_id=&status=
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(|s| {
            s.parse::<OrderStatus>()
                .map_err(|_| AppError::BadRequest("Invalid status".to_string()))
        })
        .transpose()?;

    let orders = state
        .order_service
        .list_orders(query.branch_id.map(BranchId), status)
        .await?;
    Ok(Json(orders))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub cancellation_reason: Option<String>,
    /// Accepted as an alias for `cancellation_reason` (older bot payloads)
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub success: bool,
    pub message: String,
    pub data: Order,
}

/// PATCH /api/orders/:id/status
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, AppError> {
    let status = request
        .status
        .parse::<OrderStatus>()
        .map_err(|_| AppError::BadRequest("Invalid status".to_string()))?;

    let reason = request.cancellation_reason.or(request.reason);
    let order = state
        .order_service
        .update_status(&OrderId(id), status, reason.as_deref())
        .await?;

    Ok(Json(UpdateStatusResponse {
        success: true,
        message: "Status updated".to_string(),
        data: order,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ModificationRequestBody {
    pub items: Vec<OrderItem>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/orders/:id/modification
pub async fn request_modification(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ModificationRequestBody>,
) -> Result<Json<SimpleResponse>, AppError> {
    state
        .order_service
        .request_modification(&OrderId(id), request.items, request.notes)
        .await?;

    Ok(Json(SimpleResponse {
        success: true,
        message: "Request sent.".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModificationAction {
    Accept,
    Decline,
}

#[derive(Debug, Deserialize)]
pub struct ResolveModificationRequest {
    pub action: ModificationAction,
}

/// POST /api/orders/:id/modification/resolve
pub async fn resolve_modification(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ResolveModificationRequest>,
) -> Result<Json<UpdateStatusResponse>, AppError> {
    let accept = matches!(request.action, ModificationAction::Accept);
    let order = state
        .order_service
        .resolve_modification(&OrderId(id), accept)
        .await?;

    Ok(Json(UpdateStatusResponse {
        success: true,
        message: if accept {
            "Modification applied".to_string()
        } else {
            "Modification declined".to_string()
        },
        data: order,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CustomerAlertRequest {
    pub message: String,
}

/// POST /api/orders/:id/alert
pub async fn send_customer_alert(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CustomerAlertRequest>,
) -> Result<Json<SimpleResponse>, AppError> {
    state
        .order_service
        .send_customer_alert(&OrderId(id), &request.message)
        .await?;

    Ok(Json(SimpleResponse {
        success: true,
        message: "Alert stored".to_string(),
    }))
}
