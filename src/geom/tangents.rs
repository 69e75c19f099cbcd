//! Per-vertex tangent frames for normal-mapped shading.
//!
//! Two passes over index-addressed arenas: triangles accumulate their UV-space
//! `sdir`/`tdir` into every corner, then each vertex orthogonalizes against its
//! normal and records handedness in `w`.

use super::Vec3;
use super::mesh::SurfaceMesh;

/// UV-space determinants below this are treated as degenerate triangles.
pub const UV_DETERMINANT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TangentError {
    #[error("mesh is missing attributes required for tangents: {missing}")]
    MissingMeshAttributes { missing: String },
}

/// Fills `mesh.tangents` with `[tx, ty, tz, w]` per vertex.
///
/// Requires positions, normals and UVs of matching length and a valid triangle
/// list. On error the mesh is left untouched.
pub fn compute_tangents(mesh: &mut SurfaceMesh) -> Result<(), TangentError> {
    check_attributes(mesh)?;
    let (Some(uvs), Some(normals)) = (mesh.uvs.as_deref(), mesh.normals.as_deref()) else {
        return Err(missing("uvs/normals"));
    };

    let vertex_count = mesh.positions.len();
    let mut tan1 = vec![Vec3::ZERO; vertex_count];
    let mut tan2 = vec![Vec3::ZERO; vertex_count];
    let mut skipped = 0usize;

    for tri in mesh.indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];

        let p0 = Vec3::from_array(mesh.positions[i0]);
        let e1 = Vec3::from_array(mesh.positions[i1]) - p0;
        let e2 = Vec3::from_array(mesh.positions[i2]) - p0;

        let s1 = uvs[i1][0] - uvs[i0][0];
        let t1 = uvs[i1][1] - uvs[i0][1];
        let s2 = uvs[i2][0] - uvs[i0][0];
        let t2 = uvs[i2][1] - uvs[i0][1];

        let det = s1 * t2 - s2 * t1;
        if !det.is_finite() || det.abs() < UV_DETERMINANT_EPSILON {
            skipped += 1;
            continue;
        }
        let r = 1.0 / det;

        let sdir = (e1 * t2 - e2 * t1) * r;
        let tdir = (e2 * s1 - e1 * s2) * r;

        for i in [i0, i1, i2] {
            tan1[i] = tan1[i] + sdir;
            tan2[i] = tan2[i] + tdir;
        }
    }

    if skipped > 0 {
        log::debug!("tangents: skipped {skipped} triangles with degenerate UVs");
    }

    let tangents = tan1
        .iter()
        .zip(&tan2)
        .zip(normals)
        .map(|((&t, &b), &n)| {
            let n = Vec3::from_array(n).normalized().unwrap_or(Vec3::Y);

            // Gram-Schmidt: t' = t - n * dot(n, t)
            let t = (t - n * n.dot(t)).normalized().unwrap_or_else(|| perpendicular_to(n));
            let w = if n.cross(t).dot(b) < 0.0 { -1.0 } else { 1.0 };
            [t.x, t.y, t.z, w]
        })
        .collect();

    mesh.tangents = Some(tangents);
    Ok(())
}

fn check_attributes(mesh: &SurfaceMesh) -> Result<(), TangentError> {
    let n = mesh.positions.len();
    if n == 0 {
        return Err(missing("positions"));
    }
    match &mesh.normals {
        None => return Err(missing("normals")),
        Some(normals) if normals.len() != n => {
            return Err(missing(&format!("normals (len {} != {n})", normals.len())));
        }
        Some(_) => {}
    }
    match &mesh.uvs {
        None => return Err(missing("uvs")),
        Some(uvs) if uvs.len() != n => return Err(missing(&format!("uvs (len {} != {n})", uvs.len()))),
        Some(_) => {}
    }
    if !mesh.has_triangle_indices() || !mesh.has_valid_indices() {
        return Err(missing("valid triangle indices"));
    }
    Ok(())
}

fn missing(what: &str) -> TangentError {
    TangentError::MissingMeshAttributes {
        missing: what.to_string(),
    }
}

/// Some unit vector orthogonal to `n`.
fn perpendicular_to(n: Vec3) -> Vec3 {
    let axis = if n.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    n.cross(axis).normalized().unwrap_or(Vec3::X)
}
