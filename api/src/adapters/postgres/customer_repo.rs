//! PostgreSQL adapter for CustomerAddressRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::entities::CustomerAddress;
use crate::domain::ports::CustomerAddressRepository;
use crate::entity::customer_addresses;
use crate::error::DomainError;

/// PostgreSQL implementation of CustomerAddressRepository
pub struct PostgresCustomerAddressRepository {
    db: DatabaseConnection,
}

impl PostgresCustomerAddressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerAddressRepository for PostgresCustomerAddressRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<CustomerAddress>, DomainError> {
        let result = customer_addresses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }
}

/// Convert SeaORM model to domain entity
impl From<customer_addresses::Model> for CustomerAddress {
    fn from(model: customer_addresses::Model) -> Self {
        CustomerAddress {
            id: model.id,
            customer_id: model.customer_id,
            address_text: model.address_text,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }
}
