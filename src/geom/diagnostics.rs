//! Topology and quality diagnostics for generated surface meshes.
//!
//! Diagnostics are informational. Strip meshes (waterline, wall, skirt) are
//! open by construction and the coping and slab builders keep hard edges by
//! giving every face its own vertices, so open edges are expected there. A
//! non-manifold edge or a degenerate triangle is always worth a warning.
//!
//! ```ignore
//! let diagnostics = MeshDiagnostics::from_mesh(&scene.floor);
//! log::debug!("floor: {}", diagnostics.summary());
//! ```

use std::collections::HashMap;

use serde::Serialize;

use super::mesh::SurfaceMesh;

/// Per-mesh counts reported to the viewer through `PoolEngine::get_diagnostics`.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshDiagnostics {
    /// Total number of vertices in the mesh.
    pub vertex_count: usize,

    /// Total number of triangles in the mesh.
    pub triangle_count: usize,

    /// Triangles with repeated indices or zero area.
    pub degenerate_triangle_count: usize,

    /// Edges with exactly one adjacent triangle.
    pub open_edge_count: usize,

    /// Edges with more than two adjacent triangles.
    pub non_manifold_edge_count: usize,

    /// Human-readable warnings, e.g. "mesh has non-manifold edges".
    pub warnings: Vec<String>,
}

impl MeshDiagnostics {
    /// Inspects index topology and triangle areas of `mesh`.
    #[must_use]
    pub fn from_mesh(mesh: &SurfaceMesh) -> Self {
        let (open_edge_count, non_manifold_edge_count) = count_edge_topology(&mesh.indices);
        let degenerate_triangle_count = count_degenerate_triangles(&mesh.positions, &mesh.indices);

        let mut warnings = Vec::new();
        if let Err(err) = mesh.validate() {
            warnings.push(err);
        }
        if non_manifold_edge_count > 0 {
            warnings.push("mesh has non-manifold edges".to_owned());
        }
        if degenerate_triangle_count > 0 {
            warnings.push("mesh has degenerate triangles".to_owned());
        }

        Self {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            degenerate_triangle_count,
            open_edge_count,
            non_manifold_edge_count,
            warnings,
        }
    }

    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count == 0
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Short single-line form for logging: `"V:{vertices} T:{triangles} [issues...]"`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("V:{} T:{}", self.vertex_count, self.triangle_count)];

        if self.degenerate_triangle_count > 0 {
            parts.push(format!("degenerate:{}", self.degenerate_triangle_count));
        }
        if self.open_edge_count > 0 {
            parts.push(format!("open:{}", self.open_edge_count));
        }
        if self.non_manifold_edge_count > 0 {
            parts.push(format!("non-manifold:{}", self.non_manifold_edge_count));
        }
        if !self.warnings.is_empty() {
            parts.push(format!("warnings:{}", self.warnings.len()));
        }

        parts.join(" ")
    }
}

pub(crate) fn count_edge_topology(indices: &[u32]) -> (usize, usize) {
    let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0], tri[1], tri[2]);
        if i0 == i1 || i1 == i2 || i0 == i2 {
            continue;
        }

        for (ea, eb) in [(i0, i1), (i1, i2), (i2, i0)] {
            let key = if ea <= eb { (ea, eb) } else { (eb, ea) };
            *edge_counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut open_edge_count = 0usize;
    let mut non_manifold_edge_count = 0usize;
    for count in edge_counts.into_values() {
        if count == 1 {
            open_edge_count += 1;
        } else if count > 2 {
            non_manifold_edge_count += 1;
        }
    }

    (open_edge_count, non_manifold_edge_count)
}

fn count_degenerate_triangles(positions: &[[f64; 3]], indices: &[u32]) -> usize {
    indices
        .chunks_exact(3)
        .filter(|tri| {
            let (Some(a), Some(b), Some(c)) = (
                positions.get(tri[0] as usize),
                positions.get(tri[1] as usize),
                positions.get(tri[2] as usize),
            ) else {
                return true;
            };
            let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let cx = ab[1] * ac[2] - ab[2] * ac[1];
            let cy = ab[2] * ac[0] - ab[0] * ac[2];
            let cz = ab[0] * ac[1] - ab[1] * ac[0];
            (cx * cx + cy * cy + cz * cz).sqrt() <= 1e-12
        })
        .count()
}
