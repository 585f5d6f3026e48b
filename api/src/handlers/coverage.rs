//! Coverage handler
//!
//! Bot-facing endpoint answering "which branch delivers here, and for what
//! fee?". The bot layer sometimes sends coordinates as strings, so the body
//! accepts raw JSON values and coerces them before validation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{BranchId, CoverageResult};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckCoverageRequest {
    pub lat: serde_json::Value,
    pub lng: serde_json::Value,
}

/// Coerce a JSON value into a float: numbers pass through, numeric strings
/// are parsed, everything else is invalid input (never a panic).
fn coerce_coordinate(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
pub struct CoverageResponse {
    pub covered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<BranchId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<CoverageResult> for CoverageResponse {
    fn from(result: CoverageResult) -> Self {
        match result {
            CoverageResult::Covered {
                branch_id,
                branch_name,
                zone_name,
                delivery_fee,
            } => CoverageResponse {
                covered: true,
                branch_id: Some(branch_id),
                branch_name: Some(branch_name),
                zone_name: Some(zone_name),
                delivery_fee: Some(delivery_fee),
                message: None,
            },
            CoverageResult::NotCovered => CoverageResponse {
                covered: false,
                branch_id: None,
                branch_name: None,
                zone_name: None,
                delivery_fee: None,
                message: Some("Location is outside all delivery zones.".to_string()),
            },
        }
    }
}

/// POST /api/check-coverage
///
/// Body: `{ "lat": 30.044, "lng": 31.235 }` (numbers or numeric strings).
pub async fn check_coverage(
    State(state): State<AppState>,
    Json(request): Json<CheckCoverageRequest>,
) -> Result<Json<CoverageResponse>, AppError> {
    let (lat, lng) = match (
        coerce_coordinate(&request.lat),
        coerce_coordinate(&request.lng),
    ) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return Err(AppError::BadRequest(
                "Invalid coordinates provided".to_string(),
            ))
        }
    };

    let result = state.coverage_service.check(lat, lng).await?;
    Ok(Json(result.into()))
}
