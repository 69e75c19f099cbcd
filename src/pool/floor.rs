use crate::geom::{ExtrusionError, PlanPoint, PlanRegion, SlabOptions, SurfaceMesh, extrude_region};

use super::config::{DEFAULT_FLOOR_TEXTURE_REPEAT, FLOOR_SEGMENTS, FLOOR_THICKNESS};
use super::perimeter::{PerimeterError, PoolShape, check_dimensions, generate_perimeter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorOptions {
    /// Perimeter sampling for curved outlines; rectangles always use 4 corners.
    pub segments: usize,
    pub thickness: f64,
    /// Metres of floor covered by one texture repeat.
    pub texture_repeat: f64,
}

impl Default for FloorOptions {
    fn default() -> Self {
        Self {
            segments: FLOOR_SEGMENTS,
            thickness: FLOOR_THICKNESS,
            texture_repeat: DEFAULT_FLOOR_TEXTURE_REPEAT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FloorError {
    #[error(transparent)]
    Perimeter(#[from] PerimeterError),
    #[error("failed to extrude slab: {0}")]
    Extrusion(#[from] ExtrusionError),
}

/// Builds the pool floor slab with its top face at `y = 0`.
///
/// Callers lower it to the pool depth.
pub fn build_floor(shape: &PoolShape, options: &FloorOptions) -> Result<SurfaceMesh, FloorError> {
    let outline = floor_outline(shape, options.segments)?;
    let slab = SlabOptions::new(0.0, options.thickness, options.texture_repeat);
    let mesh = extrude_region(&PlanRegion::new(outline), slab)?;

    log::debug!("floor {}: {} triangles", shape.kind(), mesh.triangle_count());
    Ok(mesh)
}

/// Exact corners for rectangles, sampled perimeter for everything else.
pub fn floor_outline(shape: &PoolShape, segments: usize) -> Result<Vec<PlanPoint>, PerimeterError> {
    if let PoolShape::Rectangle { length, width } = *shape {
        check_dimensions(length, width)?;
        let (hl, hw) = (length / 2.0, width / 2.0);
        return Ok(vec![
            PlanPoint::new(-hl, -hw),
            PlanPoint::new(hl, -hw),
            PlanPoint::new(hl, hw),
            PlanPoint::new(-hl, hw),
        ]);
    }

    let perimeter = generate_perimeter(shape, segments)?;
    Ok(perimeter.points().iter().map(|p| p.to_plan()).collect())
}
