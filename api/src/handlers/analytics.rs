//! Analytics handler (admin console dashboard)

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::AnalyticsData;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// Inclusive start date (`YYYY-MM-DD`), defaults to the beginning of time
    pub start: Option<NaiveDate>,
    /// Inclusive end date (`YYYY-MM-DD`), defaults to now
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub data: AnalyticsData,
}

/// GET /api/analytics?start=2026-08-01&end=2026-08-27
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let data = state
        .analytics_service
        .get_analytics(query.start, query.end)
        .await?;

    Ok(Json(AnalyticsResponse {
        success: true,
        data,
    }))
}
