//! Geographic point value type
//!
//! Internal convention is `{lat, lng}` everywhere. External `[lng, lat]`
//! geometry (GeoJSON axis order) is converted at ingestion, never here.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair. Never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both coordinates are finite and within GPS range.
    pub fn is_valid(&self) -> bool {
        crate::domain::geo::is_valid_coordinate(self.lat, self.lng)
    }
}
