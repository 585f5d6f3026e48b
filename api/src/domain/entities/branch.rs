//! Branch domain entity
//!
//! A restaurant branch owning an ordered list of delivery zones. Only
//! active branches participate in coverage resolution; the iteration order
//! of branches and of their zones is the first-match tie-break.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::zone::Zone;

/// Unique identifier for a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchId(pub i64);

impl std::fmt::Display for BranchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A restaurant branch with its delivery zones
#[derive(Debug, Clone, Serialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub phone_contact: Option<String>,
    pub zones: Vec<Zone>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Branch {
    /// A branch with zero zones (or only degenerate ones) can never match.
    pub fn has_coverage(&self) -> bool {
        self.zones.iter().any(|z| !z.is_degenerate())
    }
}

/// Data needed to create or replace a branch
#[derive(Debug, Clone)]
pub struct NewBranch {
    pub name: String,
    pub phone_contact: Option<String>,
    pub zones: Vec<Zone>,
    pub is_active: bool,
}
