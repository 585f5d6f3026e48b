//! PostgreSQL adapter for BranchRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{Branch, BranchId, NewBranch, Zone};
use crate::domain::ports::BranchRepository;
use crate::entity::branches;
use crate::error::DomainError;

/// PostgreSQL implementation of BranchRepository
pub struct PostgresBranchRepository {
    db: DatabaseConnection,
}

impl PostgresBranchRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn zones_to_json(zones: &[Zone]) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(zones)
            .map_err(|e| DomainError::Internal(format!("Failed to serialize zones: {}", e)))
    }
}

#[async_trait]
impl BranchRepository for PostgresBranchRepository {
    async fn find_active(&self) -> Result<Vec<Branch>, DomainError> {
        // Ascending id keeps the snapshot order stable across calls; the
        // resolver's first-match policy depends on it.
        let results = branches::Entity::find()
            .filter(branches::Column::IsActive.eq(true))
            .order_by_asc(branches::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_all(&self) -> Result<Vec<Branch>, DomainError> {
        let results = branches::Entity::find()
            .order_by_asc(branches::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_id(&self, id: &BranchId) -> Result<Option<Branch>, DomainError> {
        let result = branches::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, branch: &NewBranch) -> Result<Branch, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = branches::ActiveModel {
            name: Set(branch.name.clone()),
            phone_contact: Set(branch.phone_contact.clone()),
            zones: Set(Self::zones_to_json(&branch.zones)?),
            is_active: Set(branch.is_active),
            created_at: Set(Some(now)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, id: &BranchId, branch: &NewBranch) -> Result<Branch, DomainError> {
        branches::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("Branch {} not found", id)))?;

        let model = branches::ActiveModel {
            id: Set(id.0),
            name: Set(branch.name.clone()),
            phone_contact: Set(branch.phone_contact.clone()),
            zones: Set(Self::zones_to_json(&branch.zones)?),
            is_active: Set(branch.is_active),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<branches::Model> for Branch {
    fn from(model: branches::Model) -> Self {
        Branch {
            id: BranchId(model.id),
            name: model.name,
            phone_contact: model.phone_contact,
            // A branch whose zone JSON does not parse simply has no
            // coverage; resolution skips it rather than failing the scan.
            zones: serde_json::from_value(model.zones).unwrap_or_default(),
            is_active: model.is_active,
            created_at: model
                .created_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
