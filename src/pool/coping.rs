//! Coping: one stone box per perimeter edge, sitting on the waterline band.

use crate::geom::{Point3, SurfaceMesh, Transform, Vec3, cyclic};

use super::config::{COPING_HEIGHT, COPING_WIDTH};
use super::waterline::WaterlineMetadata;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopingOptions {
    /// Radial depth of the stone, measured outward from the perimeter.
    pub width: f64,
    pub height: f64,
    /// Height of the stone's underside, normally the top of the waterline band.
    pub base_height: f64,
}

impl CopingOptions {
    #[must_use]
    pub const fn new(base_height: f64) -> Self {
        Self {
            width: COPING_WIDTH,
            height: COPING_HEIGHT,
            base_height,
        }
    }

    #[must_use]
    pub const fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Placement of a single coping box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopingSegment {
    pub center: Point3,
    /// Edge length plus one coping width, so neighbours overlap at corners.
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation about +Y that aligns local +X with the edge direction.
    pub rotation_y: f64,
}

impl CopingSegment {
    /// Local-to-world transform of the box.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::new(self.center, self.rotation_y)
    }
}

#[must_use]
pub fn coping_segments(metadata: &WaterlineMetadata, options: &CopingOptions) -> Vec<CopingSegment> {
    let points = metadata.perimeter.points();
    let center_y = options.base_height + options.height / 2.0;

    cyclic::edge_pairs(points)
        .map(|(&current, &next)| {
            let edge = next - current;
            let edge_length = edge.length();
            let dir = edge.normalized().unwrap_or(Vec3::X);
            let center = current.midpoint(next) + dir.outward_normal() * (options.width / 2.0);

            CopingSegment {
                center: center.with_y(center_y),
                length: edge_length + options.width,
                width: options.width,
                height: options.height,
                rotation_y: -dir.z.atan2(dir.x),
            }
        })
        .collect()
}

/// Merges every coping box into one mesh with hard edges and per-face UVs.
#[must_use]
pub fn build_coping(metadata: &WaterlineMetadata, options: &CopingOptions) -> SurfaceMesh {
    let segments = coping_segments(metadata, options);
    let mut mesh = SurfaceMesh::default();
    for segment in &segments {
        let half = Vec3::new(segment.length / 2.0, segment.height / 2.0, segment.width / 2.0);
        mesh.append(&box_mesh(half, segment.transform()));
    }

    log::debug!("coping: {} boxes, {} triangles", segments.len(), mesh.triangle_count());
    mesh
}

/// Box faces as `(normal, u axis, v axis)`, with `u x v = normal` so that the
/// quad `(-u,-v) (+u,-v) (+u,+v) (-u,+v)` winds counterclockwise from outside.
const BOX_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y),
    (Vec3::new(-1.0, 0.0, 0.0), Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::new(0.0, 0.0, -1.0)),
    (Vec3::new(0.0, -1.0, 0.0), Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::Y),
];

fn box_mesh(half: Vec3, transform: Transform) -> SurfaceMesh {
    let scale = |axis: Vec3| Vec3::new(axis.x * half.x, axis.y * half.y, axis.z * half.z);

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut uvs = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, (normal, u_axis, v_axis)) in (0u32..).zip(BOX_FACES) {
        let center = scale(normal);
        let (du, dv) = (scale(u_axis), scale(v_axis));
        let world_normal = transform.apply_vec(normal).to_array();

        for (su, sv, uv) in [(-1.0, -1.0, [0.0, 0.0]), (1.0, -1.0, [1.0, 0.0]), (1.0, 1.0, [1.0, 1.0]), (-1.0, 1.0, [0.0, 1.0])] {
            let local = center + du * su + dv * sv;
            let p = transform.apply_point(local);
            positions.push(p.to_array());
            normals.push(world_normal);
            uvs.push(uv);
        }

        let base = face * 4;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    SurfaceMesh::with_attributes(positions, indices, Some(uvs), Some(normals))
}
