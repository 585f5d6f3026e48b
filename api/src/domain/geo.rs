//! Geospatial primitives
//!
//! The two pure functions every coverage decision rests on: coordinate
//! validation and the even-odd ray-casting point-in-polygon test.
//!
//! Both operate on [`Point`] values in `{lat, lng}` form. Callers ingesting
//! external geometry (GeoJSON rings are `[lng, lat]`!) must convert axis
//! order *before* reaching this module — see `entities::zone::VertexInput`.

use crate::domain::entities::Point;

/// Validate that a pair of numbers is a real GPS coordinate.
///
/// Rejects non-finite values and anything outside lat [-90, 90] /
/// lng [-180, 180]. Coercion from strings (the bot layer sends numbers as
/// strings) happens at the HTTP boundary; a failed coercion never reaches
/// this function.
pub fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    if !lat.is_finite() || !lng.is_finite() {
        return false;
    }
    if !(-90.0..=90.0).contains(&lat) {
        return false;
    }
    if !(-180.0..=180.0).contains(&lng) {
        return false;
    }
    true
}

/// Even-odd ray-casting test: is `point` inside the polygon ring?
///
/// The ring is implicitly closed (last vertex connects back to the first).
/// A horizontal ray extends from the probe point toward increasing
/// longitude; each crossed edge toggles the result. The strict `>`
/// comparisons are what keep vertices lying exactly on the ray from being
/// double-counted — the polarity must not be changed. A point exactly on an
/// edge or vertex has algorithm-dependent (but deterministic) inclusion.
///
/// Polygons with fewer than 3 vertices never contain anything. Complexity is
/// O(vertex count); zones have tens of vertices, so no index is needed.
pub fn point_in_polygon(point: &Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let x = point.lat;
    let y = point.lng;

    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let (xi, yi) = (polygon[i].lat, polygon[i].lng);
        let (xj, yj) = (polygon[j].lat, polygon[j].lng);

        let intersects =
            ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi);
        if intersects {
            inside = !inside;
        }

        j = i;
    }

    inside
}
