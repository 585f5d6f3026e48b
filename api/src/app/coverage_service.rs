//! Coverage service
//!
//! Resolves a delivery point to the branch and zone that cover it. Used by
//! the public check-coverage endpoint and re-run authoritatively at order
//! creation (see `order_service`).

use std::sync::Arc;

use crate::domain::entities::{Branch, CoverageResult, Point};
use crate::domain::geo;
use crate::domain::ports::BranchRepository;
use crate::error::AppError;

/// Scan the branch snapshot and return the first zone containing the point.
///
/// First-match is deliberate policy, not an oversight: branches are scanned
/// in the order supplied (the repository's stable id order) and each
/// branch's zones in their configured order, returning on the first hit. If
/// zones overlap across branches the winner is the earlier branch in the
/// snapshot, regardless of fee or distance. Reimplementations must keep
/// these semantics to stay behaviour-compatible.
///
/// Degenerate zones (fewer than 3 vertices) can never match and are skipped;
/// they never abort the scan. The function is pure over its inputs and safe
/// to run concurrently across requests.
pub fn resolve_coverage(point: &Point, branches: &[Branch]) -> CoverageResult {
    for branch in branches {
        for zone in &branch.zones {
            if geo::point_in_polygon(point, &zone.polygon) {
                return CoverageResult::Covered {
                    branch_id: branch.id,
                    branch_name: branch.name.clone(),
                    zone_name: zone.name.clone(),
                    delivery_fee: zone.delivery_fee,
                };
            }
        }
    }
    CoverageResult::NotCovered
}

/// Service wrapping the resolver with snapshot fetching and input validation
pub struct CoverageService<BR>
where
    BR: BranchRepository,
{
    branches: Arc<BR>,
}

impl<BR> CoverageService<BR>
where
    BR: BranchRepository,
{
    pub fn new(branches: Arc<BR>) -> Self {
        Self { branches }
    }

    /// Check coverage for a raw coordinate pair.
    ///
    /// Validation runs before any geometry; a fresh snapshot is fetched per
    /// call so zone edits between calls are always visible. A repository
    /// failure surfaces as an error (HTTP 500), which keeps it
    /// distinguishable from the `NotCovered` value (HTTP 200).
    pub async fn check(&self, lat: f64, lng: f64) -> Result<CoverageResult, AppError> {
        if !geo::is_valid_coordinate(lat, lng) {
            return Err(AppError::BadRequest(
                "Invalid coordinates provided".to_string(),
            ));
        }

        let snapshot = self.branches.find_active().await?;
        Ok(resolve_coverage(&Point::new(lat, lng), &snapshot))
    }
}
