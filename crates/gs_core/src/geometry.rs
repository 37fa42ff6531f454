//! Chokepoint geometry: polygon containment plus an independent vertical
//! range test.
//!
//! ## Boundary convention
//!
//! A point exactly on a polygon edge (vertices included) counts as INSIDE.
//! The on-segment pre-check makes the convention explicit instead of leaving
//! it to however the crossing count happens to break ties.

use crate::error::{AnalysisError, Result};

/// A 2D polygon vertex in map coordinates.
pub type Vertex = (f64, f64);

/// Closed polygon over map coordinates.
///
/// Vertex order may be clockwise or counter-clockwise; the closing edge from
/// the last vertex back to the first is implicit. Fewer than 3 vertices is
/// rejected at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vertex>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vertex>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(AnalysisError::DegeneratePolygon {
                vertices: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Even-odd ray-cast containment test, O(V).
    ///
    /// Casts a ray from the point toward +x and counts edge crossings; an odd
    /// count means inside. Points on an edge short-circuit to true per the
    /// module's boundary convention.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = self.vertices[i];
            let (xj, yj) = self.vertices[j];

            if on_segment((xi, yi), (xj, yj), (x, y)) {
                return true;
            }

            if (yi > y) != (yj > y) {
                let x_cross = (xj - xi) * (y - yi) / (yj - yi) + xi;
                if x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// True iff `p` lies on the segment a-b. Exact arithmetic, no epsilon: the
/// boundary convention only needs to be stable, not tolerant.
fn on_segment(a: Vertex, b: Vertex, p: Vertex) -> bool {
    let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
    if cross != 0.0 {
        return false;
    }
    p.0 >= a.0.min(b.0) && p.0 <= a.0.max(b.0) && p.1 >= a.1.min(b.1) && p.1 <= a.1.max(b.1)
}

/// Inclusive vertical range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZRange {
    min: f64,
    max: f64,
}

impl ZRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min > max {
            return Err(AnalysisError::InvalidZRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Inclusive on both ends.
    pub fn contains(&self, z: f64) -> bool {
        z >= self.min && z <= self.max
    }
}

/// Construction-time region configuration: an arbitrary polygon plus a
/// vertical range, distinct from the named areas baked into the data.
/// Immutable for the lifetime of the table built against it.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSpec {
    polygon: Polygon,
    z_range: ZRange,
}

impl RegionSpec {
    pub fn new(vertices: Vec<Vertex>, z_min: f64, z_max: f64) -> Result<Self> {
        Ok(Self {
            polygon: Polygon::new(vertices)?,
            z_range: ZRange::new(z_min, z_max)?,
        })
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn z_range(&self) -> &ZRange {
        &self.z_range
    }

    /// Polygon membership AND vertical range, both per the tests above.
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        self.polygon.contains(x, y) && self.z_range.contains(z)
    }
}
