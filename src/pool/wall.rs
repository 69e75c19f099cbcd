use crate::geom::{StripFacing, SurfaceMesh, build_strip_indices};

use super::config::DEFAULT_WALL_TEXTURE_REPEAT;
use super::waterline::WaterlineMetadata;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallOptions {
    /// Distance from the bottom of the waterline band down to the floor.
    pub wall_height: f64,
    /// Metres of wall covered by one texture repeat.
    pub texture_repeat: f64,
}

impl WallOptions {
    #[must_use]
    pub const fn new(wall_height: f64) -> Self {
        Self {
            wall_height,
            texture_repeat: DEFAULT_WALL_TEXTURE_REPEAT,
        }
    }

    #[must_use]
    pub const fn with_texture_repeat(mut self, texture_repeat: f64) -> Self {
        self.texture_repeat = texture_repeat;
        self
    }
}

/// Builds the inward-facing pool wall below the waterline band.
///
/// The wall reuses the band's perimeter and arc lengths so its texture lines
/// up with the tiles above it. It spans `y` in `[-wall_height, 0]` with
/// `u = arc / texture_repeat` and `v` in `{0, wall_height / texture_repeat}`.
#[must_use]
pub fn build_wall(metadata: &WaterlineMetadata, options: &WallOptions) -> SurfaceMesh {
    let points = metadata.perimeter.points();
    let n = points.len();
    let WallOptions {
        wall_height,
        texture_repeat,
    } = *options;
    let v_top = wall_height / texture_repeat;

    let mut positions = Vec::with_capacity((n + 1) * 2);
    let mut uvs = Vec::with_capacity((n + 1) * 2);

    for column in 0..=n {
        let point = points[column % n];
        positions.push(point.with_y(-wall_height).to_array());
        positions.push(point.with_y(0.0).to_array());

        let u = metadata.column_arc(column) / texture_repeat;
        uvs.push([u, 0.0]);
        uvs.push([u, v_top]);
    }

    let indices = build_strip_indices(n, StripFacing::Inward);
    let mut mesh = SurfaceMesh::with_attributes(positions, indices, Some(uvs), None);
    mesh.compute_smooth_normals();

    log::debug!("wall: height {wall_height:.3} m, {} vertices", mesh.vertex_count());
    mesh
}
