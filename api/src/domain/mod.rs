//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `geo`: Coordinate validation and the point-in-polygon primitive
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod geo;
pub mod ports;
