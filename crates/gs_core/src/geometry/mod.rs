//! Spatial containment primitives.

pub mod polygon;
pub mod zone;

pub use polygon::{BoundaryPolygon, MIN_VERTICES};
pub use zone::{ZoneOfInterest, Z_MAX, Z_MIN};
