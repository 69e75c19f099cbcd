use super::cyclic;
use super::mesh::SurfaceMesh;
use super::strip::{StripFacing, build_strip_indices};
use super::triangulation::{PlanRegion, TriangulationError, signed_area, triangulate_plan_region};
use super::{PlanPoint, Vec3};

/// Vertical placement and texturing of an extruded slab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlabOptions {
    /// Height of the top cap.
    pub top_y: f64,
    /// Distance from the top cap down to the bottom cap.
    pub thickness: f64,
    /// Metres of surface covered by one texture repeat.
    pub uv_repeat: f64,
}

impl SlabOptions {
    #[must_use]
    pub const fn new(top_y: f64, thickness: f64, uv_repeat: f64) -> Self {
        Self {
            top_y,
            thickness,
            uv_repeat,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtrusionError {
    #[error("extrusion inputs must be finite")]
    NonFiniteInput,
    #[error("slab thickness must be positive, got {0}")]
    InvalidThickness(f64),
    #[error("texture repeat must be positive, got {0}")]
    InvalidUvRepeat(f64),
    #[error("failed to triangulate cap: {0}")]
    CapTriangulation(#[from] TriangulationError),
}

/// Extrudes a plan region downward from `top_y` into a closed slab.
///
/// The top cap faces +Y and the bottom cap faces -Y, both with planar UVs
/// `(x / uv_repeat, z / uv_repeat)`. Side walls face away from the solid and
/// use arc-length U along each ring, with a duplicated seam column. Caps and
/// walls do not share vertices so the rim stays sharp.
pub fn extrude_region(region: &PlanRegion, options: SlabOptions) -> Result<SurfaceMesh, ExtrusionError> {
    let SlabOptions {
        top_y,
        thickness,
        uv_repeat,
    } = options;
    if !top_y.is_finite() || !thickness.is_finite() || !uv_repeat.is_finite() {
        return Err(ExtrusionError::NonFiniteInput);
    }
    if thickness <= 0.0 {
        return Err(ExtrusionError::InvalidThickness(thickness));
    }
    if uv_repeat <= 0.0 {
        return Err(ExtrusionError::InvalidUvRepeat(uv_repeat));
    }

    let cap = triangulate_plan_region(region)?;
    let bottom_y = top_y - thickness;

    let mut mesh = SurfaceMesh::with_attributes(Vec::new(), Vec::new(), Some(Vec::new()), Some(Vec::new()));

    // Triangulation output is CCW in (x, z), i.e. facing -Y.
    mesh.append(&cap_mesh(&cap.vertices, &cap.indices, top_y, 1.0, uv_repeat));
    mesh.append(&cap_mesh(&cap.vertices, &cap.indices, bottom_y, -1.0, uv_repeat));

    let outer = oriented_ring(&region.outer, true);
    mesh.append(&side_wall(&outer, top_y, bottom_y, uv_repeat));
    if let Some(hole) = region.usable_hole() {
        let hole = oriented_ring(hole, false);
        mesh.append(&side_wall(&hole, top_y, bottom_y, uv_repeat));
    }

    log::debug!(
        "extruded slab: {} cap triangles, {} vertices",
        cap.triangle_count(),
        mesh.vertex_count()
    );

    Ok(mesh)
}

fn cap_mesh(vertices: &[PlanPoint], indices: &[u32], y: f64, facing: f64, uv_repeat: f64) -> SurfaceMesh {
    let positions = vertices.iter().map(|p| p.at_height(y).to_array()).collect();
    let uvs = vertices.iter().map(|p| [p.x / uv_repeat, p.z / uv_repeat]).collect();
    let normals = vec![[0.0, facing, 0.0]; vertices.len()];

    let mut tris = Vec::with_capacity(indices.len());
    for tri in indices.chunks_exact(3) {
        if facing > 0.0 {
            tris.extend_from_slice(&[tri[0], tri[2], tri[1]]);
        } else {
            tris.extend_from_slice(&[tri[0], tri[1], tri[2]]);
        }
    }

    SurfaceMesh::with_attributes(positions, tris, Some(uvs), Some(normals))
}

/// Returns the ring counterclockwise when `ccw` is set, clockwise otherwise.
fn oriented_ring(points: &[PlanPoint], ccw: bool) -> Vec<PlanPoint> {
    let mut ring = points.to_vec();
    if (signed_area(&ring) > 0.0) != ccw {
        ring.reverse();
    }
    ring
}

/// Vertical strip around `ring` whose faces point to the right of travel.
fn side_wall(ring: &[PlanPoint], top_y: f64, bottom_y: f64, uv_repeat: f64) -> SurfaceMesh {
    let n = ring.len();
    let v_top = (top_y - bottom_y) / uv_repeat;

    let edge_normals: Vec<Vec3> = cyclic::edge_pairs(ring)
        .map(|(a, b)| {
            Vec3::new(b.x - a.x, 0.0, b.z - a.z)
                .normalized()
                .map_or(Vec3::ZERO, Vec3::outward_normal)
        })
        .collect();

    let mut positions = Vec::with_capacity((n + 1) * 2);
    let mut uvs = Vec::with_capacity((n + 1) * 2);
    let mut normals = Vec::with_capacity((n + 1) * 2);

    let mut arc = 0.0;
    for column in 0..=n {
        let i = column % n;
        let p = ring[i];
        if column > 0 {
            let prev = ring[column - 1];
            arc += (p.x - prev.x).hypot(p.z - prev.z);
        }

        let normal = (edge_normals[cyclic::prev_index(i, n)] + edge_normals[i])
            .normalized()
            .unwrap_or(edge_normals[i])
            .to_array();

        let u = arc / uv_repeat;
        positions.push(p.at_height(bottom_y).to_array());
        positions.push(p.at_height(top_y).to_array());
        uvs.push([u, 0.0]);
        uvs.push([u, v_top]);
        normals.push(normal);
        normals.push(normal);
    }

    let indices = build_strip_indices(n, StripFacing::Outward);
    SurfaceMesh::with_attributes(positions, indices, Some(uvs), Some(normals))
}
