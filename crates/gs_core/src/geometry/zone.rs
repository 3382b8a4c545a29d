//! 3D zone of interest: polygon footprint intersected with a fixed z slab.

use serde::{Deserialize, Serialize};

use super::polygon::BoundaryPolygon;
use crate::error::Result;

/// Lowest z (inclusive) counted as inside the zone.
pub const Z_MIN: f64 = 285.0;
/// Highest z (inclusive) counted as inside the zone.
pub const Z_MAX: f64 = 421.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneOfInterest {
    polygon: BoundaryPolygon,
}

impl ZoneOfInterest {
    pub fn new(polygon: BoundaryPolygon) -> Self {
        Self { polygon }
    }

    pub fn from_vertices(vertices: Vec<(f64, f64)>) -> Result<Self> {
        Ok(Self::new(BoundaryPolygon::new(vertices)?))
    }

    pub fn polygon(&self) -> &BoundaryPolygon {
        &self.polygon
    }

    #[inline]
    pub fn z_in_range(z: f64) -> bool {
        (Z_MIN..=Z_MAX).contains(&z)
    }

    /// Strictly inside the footprint and within [Z_MIN, Z_MAX].
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        Self::z_in_range(z) && self.polygon.contains(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> ZoneOfInterest {
        ZoneOfInterest::from_vertices(vec![
            (-1735.0, 250.0),
            (-2024.0, 398.0),
            (-2806.0, 742.0),
            (-2472.0, 1233.0),
            (-1565.0, 580.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_z_endpoints_inclusive() {
        let z = zone();
        assert!(z.contains(-2000.0, 600.0, 285.0));
        assert!(z.contains(-2000.0, 600.0, 421.0));
        assert!(z.contains(-2000.0, 600.0, 350.0));
    }

    #[test]
    fn test_z_outside_range() {
        let z = zone();
        assert!(!z.contains(-2000.0, 600.0, 284.999));
        assert!(!z.contains(-2000.0, 600.0, 421.001));
        assert!(!z.contains(-2000.0, 600.0, f64::NAN));
    }

    #[test]
    fn test_vertex_with_valid_z_is_outside() {
        assert!(!zone().contains(-1735.0, 250.0, 300.0));
    }

    #[test]
    fn test_xy_outside() {
        assert!(!zone().contains(0.0, 0.0, 300.0));
    }
}
