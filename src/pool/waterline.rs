//! Waterline tile band: a thin vertical strip just inside the perimeter.

use serde::Serialize;

use crate::geom::{StripFacing, SurfaceMesh, build_strip_indices};

use super::arc_length::compute_arc_lengths;
use super::config::{DEFAULT_WATERLINE_INSET, REPEATING_STRIP_TILE_COUNT};
use super::perimeter::PerimeterLoop;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterlineOptions {
    /// Width of one tile in metres.
    pub tile_width: f64,
    /// Height of one tile in metres; also the band height.
    pub tile_height: f64,
    /// Inward push that keeps the band visible under the coping lip.
    pub inset: f64,
    /// Tiles in one horizontal texture strip.
    pub strip_tile_count: u32,
}

impl WaterlineOptions {
    #[must_use]
    pub const fn new(tile_width: f64, tile_height: f64) -> Self {
        Self {
            tile_width,
            tile_height,
            inset: DEFAULT_WATERLINE_INSET,
            strip_tile_count: REPEATING_STRIP_TILE_COUNT,
        }
    }

    #[must_use]
    pub const fn with_inset(mut self, inset: f64) -> Self {
        self.inset = inset;
        self
    }

    #[must_use]
    pub const fn with_strip_tile_count(mut self, count: u32) -> Self {
        self.strip_tile_count = count;
        self
    }

    /// Metres of perimeter covered by one full texture strip.
    #[must_use]
    pub fn strip_width(&self) -> f64 {
        self.tile_width * f64::from(self.strip_tile_count)
    }
}

/// Everything the wall and coping builders need from the waterline pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterlineMetadata {
    /// Whole tiles needed to go once around, rounded up.
    pub tiles_around: u64,
    pub total_length: f64,
    pub perimeter: PerimeterLoop,
    pub arc_lengths: Vec<f64>,
    pub tile_height: f64,
}

impl WaterlineMetadata {
    /// Arc length of strip column `index`; column `perimeter.len()` is the seam.
    #[must_use]
    pub fn column_arc(&self, index: usize) -> f64 {
        self.arc_lengths.get(index).copied().unwrap_or(self.total_length)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaterlineBand {
    pub mesh: SurfaceMesh,
    pub metadata: WaterlineMetadata,
}

/// Builds the inward-facing tile band from `y = 0` up to `tile_height`.
///
/// Columns sit on the perimeter points pushed inward by `inset` along the
/// normal of their forward edge; a final seam column repeats point 0 with
/// `u = total_length / strip_width`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn build_waterline_band(perimeter: &PerimeterLoop, options: &WaterlineOptions) -> WaterlineBand {
    let table = compute_arc_lengths(perimeter);
    let points = perimeter.points();
    let n = points.len();

    let strip_width = options.strip_width();
    if !(strip_width.is_finite() && strip_width > 0.0) {
        log::warn!("waterline strip width {strip_width} is not positive; UVs will not be finite");
    }

    let tiles_around = (table.total_length / options.tile_width).ceil().max(0.0) as u64;

    let mut positions = Vec::with_capacity((n + 1) * 2);
    let mut normals = Vec::with_capacity((n + 1) * 2);
    let mut uvs = Vec::with_capacity((n + 1) * 2);

    for column in 0..=n {
        let i = column % n;
        let inward = perimeter.edge_direction(i).inward_normal();
        let base = points[i] + inward * options.inset;

        positions.push(base.with_y(0.0).to_array());
        positions.push(base.with_y(options.tile_height).to_array());
        normals.push(inward.to_array());
        normals.push(inward.to_array());

        let u = table.u_at(column, strip_width);
        uvs.push([u, 0.0]);
        uvs.push([u, 1.0]);
    }

    let indices = build_strip_indices(n, StripFacing::Inward);
    let mesh = SurfaceMesh::with_attributes(positions, indices, Some(uvs), Some(normals));

    log::debug!(
        "waterline band: {} columns, perimeter {:.3} m, {tiles_around} tiles around",
        n + 1,
        table.total_length
    );

    WaterlineBand {
        mesh,
        metadata: WaterlineMetadata {
            tiles_around,
            total_length: table.total_length,
            perimeter: perimeter.clone(),
            arc_lengths: table.arc_lengths,
            tile_height: options.tile_height,
        },
    }
}
