//! SeaORM model for the `orders` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub daily_seq: i64,
    pub branch_id: i64,
    pub customer_id: i64,
    pub address_id: i64,

    #[sea_orm(column_type = "JsonBinary")]
    pub items: Json,
    pub kitchen_notes: Option<String>,

    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total_price: f64,

    pub status: String,

    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub delivery_lat: f64,
    pub delivery_lng: f64,

    pub cancellation_reason: Option<String>,
    pub customer_alert_message: Option<String>,
    pub modification_pending: bool,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub modification_request: Option<Json>,

    pub created_at: Option<DateTimeWithTimeZone>,
    pub accepted_at: Option<DateTimeWithTimeZone>,
    pub in_kitchen_at: Option<DateTimeWithTimeZone>,
    pub out_for_delivery_at: Option<DateTimeWithTimeZone>,
    pub done_at: Option<DateTimeWithTimeZone>,
    pub cancelled_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
