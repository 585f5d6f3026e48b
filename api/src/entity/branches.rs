//! SeaORM model for the `branches` table
//!
//! Zones live in a JSONB column in `{lat, lng}` vertex form; the axis swap
//! for GeoJSON input happens before rows are written (see
//! `domain::entities::zone`).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "branches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub phone_contact: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub zones: Json,
    pub is_active: bool,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
