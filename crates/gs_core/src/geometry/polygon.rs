//! Boundary polygon with interior-only containment.
//!
//! `contains` is strict: a point lying on an edge or a vertex is outside.
//! This matches the OGC `contains` predicate (not `covers`). The polygon
//! is not checked for self-intersection; even-odd parity decides the
//! interior of such shapes.

use serde::{Deserialize, Serialize};

use crate::error::{GameStateError, Result};

/// Minimum vertex count for a polygon with a non-empty interior.
pub const MIN_VERTICES: usize = 3;

/// Immutable simple polygon in the (x, y) plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPolygon {
    vertices: Vec<(f64, f64)>,
    /// (min_x, min_y, max_x, max_y)
    bbox: (f64, f64, f64, f64),
}

impl BoundaryPolygon {
    /// Build from an ordered ring of vertices. A closing vertex equal to the
    /// first one is accepted and dropped.
    pub fn new(vertices: Vec<(f64, f64)>) -> Result<Self> {
        let mut vertices = vertices;
        if vertices.len() > MIN_VERTICES && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < MIN_VERTICES {
            return Err(GameStateError::InvalidBoundary(format!(
                "expected at least {} vertices, found {}",
                MIN_VERTICES,
                vertices.len()
            )));
        }
        if let Some((i, _)) =
            vertices.iter().enumerate().find(|(_, (x, y))| !x.is_finite() || !y.is_finite())
        {
            return Err(GameStateError::InvalidBoundary(format!(
                "vertex {} has a non-finite coordinate",
                i
            )));
        }

        let bbox = vertices.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(min_x, min_y, max_x, max_y), &(x, y)| {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            },
        );
        Ok(Self { vertices, bbox })
    }

    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    fn edges(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// True if (x, y) lies on an edge or vertex.
    pub fn on_boundary(&self, x: f64, y: f64) -> bool {
        self.edges().any(|(a, b)| on_segment((x, y), a, b))
    }

    /// True iff (x, y) lies strictly inside the polygon.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let (min_x, min_y, max_x, max_y) = self.bbox;
        if x <= min_x || x >= max_x || y <= min_y || y >= max_y {
            return false;
        }
        if self.on_boundary(x, y) {
            return false;
        }

        // Even-odd ray cast towards +x.
        let mut inside = false;
        for ((x1, y1), (x2, y2)) in self.edges() {
            if (y1 > y) != (y2 > y) {
                let x_cross = x1 + (y - y1) * (x2 - x1) / (y2 - y1);
                if x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

fn on_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> bool {
    let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
    if cross != 0.0 {
        return false;
    }
    p.0 >= a.0.min(b.0) && p.0 <= a.0.max(b.0) && p.1 >= a.1.min(b.1) && p.1 <= a.1.max(b.1)
}
