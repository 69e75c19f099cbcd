//! Cap triangulation for pool outlines.
//!
//! A cap is either a plain outline (the floor) or an outline with one opening
//! cut out of it (the deck around the pool). Both are handed to `earcutr`.

use super::{PlanPoint, cyclic};

/// Outline of a cap, optionally with one opening inside it.
///
/// Ring orientation does not matter and rings are implicitly closed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanRegion {
    pub outer: Vec<PlanPoint>,
    pub hole: Option<Vec<PlanPoint>>,
}

impl PlanRegion {
    #[must_use]
    pub fn new(outer: Vec<PlanPoint>) -> Self {
        Self { outer, hole: None }
    }

    #[must_use]
    pub fn with_hole(mut self, hole: Vec<PlanPoint>) -> Self {
        self.hole = Some(hole);
        self
    }

    /// The opening, if it has enough points to enclose anything.
    #[must_use]
    pub fn usable_hole(&self) -> Option<&[PlanPoint]> {
        self.hole.as_deref().filter(|hole| hole.len() >= 3)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriangulationError {
    #[error("triangulation vertices must be finite")]
    NonFiniteVertex,
    #[error("outline must have at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("outline encloses no area")]
    Degenerate,
    #[error("earcut could not triangulate the outline")]
    Earcut,
}

/// Triangles over the outer points followed by the hole points.
///
/// Every triangle is counterclockwise in (x, z), which faces -Y once lifted
/// into 3D.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTriangulation {
    pub vertices: Vec<PlanPoint>,
    pub indices: Vec<u32>,
}

impl PlanTriangulation {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.indices
            .chunks_exact(3)
            .map(|t| 0.5 * turn(self.vertices[t[0] as usize], self.vertices[t[1] as usize], self.vertices[t[2] as usize]))
            .sum()
    }
}

/// Signed shoelace area in (x, z); positive for counterclockwise rings.
#[must_use]
pub fn signed_area(points: &[PlanPoint]) -> f64 {
    let area: f64 = cyclic::edge_pairs(points)
        .map(|(a, b)| a.x * b.z - b.x * a.z)
        .sum();
    0.5 * area
}

#[allow(clippy::cast_possible_truncation)]
pub fn triangulate_plan_region(region: &PlanRegion) -> Result<PlanTriangulation, TriangulationError> {
    if region.outer.len() < 3 {
        return Err(TriangulationError::TooFewPoints(region.outer.len()));
    }

    let mut vertices = region.outer.clone();
    let mut hole_starts = Vec::new();
    if let Some(hole) = region.usable_hole() {
        hole_starts.push(vertices.len());
        vertices.extend_from_slice(hole);
    } else if region.hole.is_some() {
        log::warn!("ignoring an opening with fewer than 3 points");
    }
    if vertices.iter().any(|p| !p.is_finite()) {
        return Err(TriangulationError::NonFiniteVertex);
    }

    let coords: Vec<f64> = vertices.iter().flat_map(|p| [p.x, p.z]).collect();
    let raw = earcutr::earcut(&coords, &hole_starts, 2).map_err(|_| TriangulationError::Earcut)?;
    if raw.is_empty() {
        return Err(TriangulationError::Degenerate);
    }

    let mut indices = Vec::with_capacity(raw.len());
    for tri in raw.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        if turn(vertices[a], vertices[b], vertices[c]) < 0.0 {
            indices.extend([a as u32, c as u32, b as u32]);
        } else {
            indices.extend([a as u32, b as u32, c as u32]);
        }
    }

    Ok(PlanTriangulation { vertices, indices })
}

/// Twice the signed area of `abc`.
fn turn(a: PlanPoint, b: PlanPoint, c: PlanPoint) -> f64 {
    (b.x - a.x) * (c.z - a.z) - (b.z - a.z) * (c.x - a.x)
}
