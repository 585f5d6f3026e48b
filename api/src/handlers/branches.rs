//! Branch handlers (admin console)
//!
//! Branch zones arrive through these endpoints and are validated once here;
//! everything downstream trusts the stored shape.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Branch, BranchId, NewBranch, Zone, ZoneInput};
use crate::domain::ports::BranchRepository;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BranchRequest {
    pub name: String,
    pub phone_contact: Option<String>,
    #[serde(default)]
    pub zones: Vec<ZoneInput>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl BranchRequest {
    fn into_new_branch(self) -> Result<NewBranch, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Branch name must not be empty".to_string(),
            ));
        }
        let zones = self
            .zones
            .into_iter()
            .map(ZoneInput::into_zone)
            .collect::<Result<Vec<Zone>, _>>()?;

        Ok(NewBranch {
            name: self.name,
            phone_contact: self.phone_contact,
            zones,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct BranchResponse {
    pub success: bool,
    pub data: Branch,
}

/// GET /api/branches
pub async fn list_branches(
    State(state): State<AppState>,
) -> Result<Json<Vec<Branch>>, AppError> {
    let branches = state.branch_repo.find_all().await?;
    Ok(Json(branches))
}

/// GET /api/branches/:id
pub async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BranchResponse>, AppError> {
    let branch = state
        .branch_repo
        .find_by_id(&BranchId(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Branch not found".to_string()))?;

    Ok(Json(BranchResponse {
        success: true,
        data: branch,
    }))
}

/// POST /api/branches
pub async fn create_branch(
    State(state): State<AppState>,
    Json(request): Json<BranchRequest>,
) -> Result<(StatusCode, Json<BranchResponse>), AppError> {
    let new_branch = request.into_new_branch()?;
    let branch = state.branch_repo.create(&new_branch).await?;

    tracing::info!(branch_id = %branch.id, name = %branch.name, "branch created");

    Ok((
        StatusCode::CREATED,
        Json(BranchResponse {
            success: true,
            data: branch,
        }),
    ))
}

/// PUT /api/branches/:id
pub async fn update_branch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<BranchRequest>,
) -> Result<Json<BranchResponse>, AppError> {
    let new_branch = request.into_new_branch()?;
    let branch = state.branch_repo.update(&BranchId(id), &new_branch).await?;

    tracing::info!(branch_id = %branch.id, zones = branch.zones.len(), "branch updated");

    Ok(Json(BranchResponse {
        success: true,
        data: branch,
    }))
}
