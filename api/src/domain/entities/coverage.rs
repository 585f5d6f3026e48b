//! Coverage resolution result
//!
//! Transient value produced by the resolver; the caller stamps it onto an
//! order (or returns it to the bot) but the core never persists it.

use serde::Serialize;

use super::branch::BranchId;

/// Outcome of resolving a point against the active branch snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CoverageResult {
    /// The point falls inside a zone of an active branch
    Covered {
        branch_id: BranchId,
        branch_name: String,
        zone_name: String,
        delivery_fee: f64,
    },
    /// No active branch has a zone containing the point. A valid outcome,
    /// never an error; distinct from a snapshot-fetch failure.
    NotCovered,
}

impl CoverageResult {
    pub fn is_covered(&self) -> bool {
        matches!(self, CoverageResult::Covered { .. })
    }
}
