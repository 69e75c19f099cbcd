//! Patio deck around the pool: a raised ring slab plus a skirt below its inner edge.

use crate::geom::{
    ExtrusionError, PlanRegion, SlabOptions, StripFacing, SurfaceMesh, build_strip_indices, extrude_region,
};

use super::arc_length::compute_arc_lengths;
use super::config::{DECK_THICKNESS, DECK_WIDTH, DEFAULT_DECK_TEXTURE_REPEAT, SKIRT_DEPTH};
use super::offset::offset_outline;
use super::perimeter::{PerimeterError, PerimeterLoop};

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("deck perimeter: {0}")]
    Perimeter(#[from] PerimeterError),
    #[error("deck width {width} must exceed its inner offset {inner_offset}")]
    InvalidWidth { width: f64, inner_offset: f64 },
    #[error("deck outline at offset {distance} is invalid: {source}")]
    Outline {
        distance: f64,
        #[source]
        source: PerimeterError,
    },
    #[error("failed to extrude deck ring: {0}")]
    Extrusion(#[from] ExtrusionError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckOptions {
    /// Outward distance from the perimeter to the deck's outer edge.
    pub width: f64,
    /// Outward distance from the perimeter to the deck's inner edge.
    pub inner_offset: f64,
    pub thickness: f64,
    /// Height of the deck's top face.
    pub top_height: f64,
    /// How far the skirt hangs below `top_height`.
    pub skirt_depth: f64,
    pub texture_repeat: f64,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            width: DECK_WIDTH,
            inner_offset: 0.0,
            thickness: DECK_THICKNESS,
            top_height: 0.0,
            skirt_depth: SKIRT_DEPTH,
            texture_repeat: DEFAULT_DECK_TEXTURE_REPEAT,
        }
    }
}

impl DeckOptions {
    #[must_use]
    pub const fn at_height(mut self, top_height: f64) -> Self {
        self.top_height = top_height;
        self
    }
}

/// Ring slab between the outline at `width` and the inner edge at `inner_offset`.
pub fn build_deck_ring(perimeter: &PerimeterLoop, options: &DeckOptions) -> Result<SurfaceMesh, DeckError> {
    if options.width.is_nan() || options.width <= options.inner_offset {
        return Err(DeckError::InvalidWidth {
            width: options.width,
            inner_offset: options.inner_offset,
        });
    }
    let outer = deck_outline(perimeter, options.width)?;
    let inner = deck_outline(perimeter, options.inner_offset)?;

    let region = PlanRegion::new(outer.points().iter().map(|p| p.to_plan()).collect())
        .with_hole(inner.points().iter().map(|p| p.to_plan()).collect());
    let slab = SlabOptions::new(options.top_height, options.thickness, options.texture_repeat);
    let mesh = extrude_region(&region, slab)?;

    log::debug!("deck ring: {} triangles", mesh.triangle_count());
    Ok(mesh)
}

/// Vertical strip hanging from the deck's inner edge, facing away from the pool.
pub fn build_deck_skirt(perimeter: &PerimeterLoop, options: &DeckOptions) -> Result<SurfaceMesh, DeckError> {
    let inner = deck_outline(perimeter, options.inner_offset)?;
    let table = compute_arc_lengths(&inner);
    let points = inner.points();
    let n = points.len();

    let top = options.top_height;
    let bottom = top - options.skirt_depth;
    let v_top = options.skirt_depth / options.texture_repeat;

    let mut positions = Vec::with_capacity((n + 1) * 2);
    let mut uvs = Vec::with_capacity((n + 1) * 2);
    for column in 0..=n {
        let point = points[column % n];
        positions.push(point.with_y(bottom).to_array());
        positions.push(point.with_y(top).to_array());

        let u = table.u_at(column, options.texture_repeat);
        uvs.push([u, 0.0]);
        uvs.push([u, v_top]);
    }

    let indices = build_strip_indices(n, StripFacing::Outward);
    let mut mesh = SurfaceMesh::with_attributes(positions, indices, Some(uvs), None);
    mesh.compute_smooth_normals();
    Ok(mesh)
}

fn deck_outline(perimeter: &PerimeterLoop, distance: f64) -> Result<PerimeterLoop, DeckError> {
    let (outline, diagnostics) =
        offset_outline(perimeter, distance).map_err(|source| DeckError::Outline { distance, source })?;
    for warning in &diagnostics.warnings {
        log::warn!("deck offset: {warning}");
    }
    Ok(outline)
}
