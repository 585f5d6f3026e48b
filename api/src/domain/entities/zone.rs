//! Delivery zone entity and its ingestion types
//!
//! A zone is a named polygon with a flat delivery fee, owned by exactly one
//! branch. Zones are stored as JSON on the branch row and treated as
//! immutable for the duration of a single resolution request.
//!
//! Ingestion accepts vertices in `{lat, lng}` object form or raw
//! `[longitude, latitude]` pair form (GeoJSON axis order). The pair form is
//! converted by swapping axes; feeding it through unswapped would silently
//! corrupt every future resolution against the zone, so the conversion lives
//! here next to the geometry core and is tested with it.

use serde::{Deserialize, Serialize};

use super::point::Point;
use crate::error::DomainError;

/// A named delivery polygon with a flat fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub delivery_fee: f64,
    pub polygon: Vec<Point>,
}

impl Zone {
    /// A polygon with fewer than 3 vertices can never contain a point.
    /// Degenerate zones are skipped during resolution, not rejected.
    pub fn is_degenerate(&self) -> bool {
        self.polygon.len() < 3
    }
}

/// A polygon vertex as received from the admin console or an import tool
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VertexInput {
    /// Internal convention: `{"lat": 30.0, "lng": 31.2}`
    LatLng { lat: f64, lng: f64 },
    /// GeoJSON convention: `[31.2, 30.0]` is `[longitude, latitude]`
    LngLatPair([f64; 2]),
}

impl From<VertexInput> for Point {
    fn from(vertex: VertexInput) -> Self {
        match vertex {
            VertexInput::LatLng { lat, lng } => Point { lat, lng },
            // Axis order is swapped, not relabelled: index 0 is longitude.
            VertexInput::LngLatPair([lng, lat]) => Point { lat, lng },
        }
    }
}

/// A zone as received at the data-ingestion edge
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneInput {
    pub name: String,
    pub delivery_fee: f64,
    pub polygon: Vec<VertexInput>,
}

impl ZoneInput {
    /// Validate and convert into the trusted internal shape.
    ///
    /// Fees must be finite and non-negative and every vertex must be a real
    /// coordinate. Degenerate polygons pass validation (they resolve to
    /// "never matches"), malformed numbers do not.
    pub fn into_zone(self) -> Result<Zone, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("Zone name must not be empty".to_string()));
        }
        if !self.delivery_fee.is_finite() || self.delivery_fee < 0.0 {
            return Err(DomainError::Validation(format!(
                "Zone '{}' has an invalid delivery fee",
                self.name
            )));
        }

        let polygon: Vec<Point> = self.polygon.into_iter().map(Point::from).collect();
        if let Some(bad) = polygon.iter().find(|p| !p.is_valid()) {
            return Err(DomainError::Validation(format!(
                "Zone '{}' has an out-of-range vertex ({}, {})",
                self.name, bad.lat, bad.lng
            )));
        }

        Ok(Zone {
            name: self.name,
            delivery_fee: self.delivery_fee,
            polygon,
        })
    }
}
