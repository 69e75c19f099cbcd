use serde::Serialize;

use super::Vec3;

/// Indexed triangle mesh produced by every builder in the crate.
///
/// Attribute buffers are per vertex and, when present, have the same length as
/// `positions`. Tangents carry handedness in the fourth component.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
    pub uvs: Option<Vec<[f64; 2]>>,
    pub normals: Option<Vec<[f64; 3]>>,
    /// `[tx, ty, tz, w]` with `w` in {-1, +1}. Filled in by `compute_tangents`.
    pub tangents: Option<Vec<[f64; 4]>>,
}

impl SurfaceMesh {
    /// Mesh with positions and indices only.
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            uvs: None,
            normals: None,
            tangents: None,
        }
    }

    /// Mesh with positions, indices, UVs and normals. Tangents start empty.
    #[must_use]
    pub fn with_attributes(
        positions: Vec<[f64; 3]>,
        indices: Vec<u32>,
        uvs: Option<Vec<[f64; 2]>>,
        normals: Option<Vec<[f64; 3]>>,
    ) -> Self {
        Self {
            positions,
            indices,
            uvs,
            normals,
            tangents: None,
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len();
        self.indices.iter().all(|&i| (i as usize) < n)
    }

    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    /// Returns true if all optional vertex attribute buffers match `positions.len()`.
    #[must_use]
    pub fn has_valid_attribute_lengths(&self) -> bool {
        let n = self.positions.len();
        self.uvs.as_ref().is_none_or(|uvs| uvs.len() == n)
            && self.normals.as_ref().is_none_or(|normals| normals.len() == n)
            && self.tangents.as_ref().is_none_or(|tangents| tangents.len() == n)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.has_triangle_indices() {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.has_invalid_vertices() {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if !self.has_valid_attribute_lengths() {
            return Err("mesh attribute buffers do not match vertex count".to_string());
        }
        Ok(())
    }

    /// Position buffer as `[x0, y0, z0, x1, ...]`, without copying.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.positions)
    }

    #[must_use]
    pub fn uvs_flat(&self) -> Option<&[f64]> {
        self.uvs.as_deref().map(flatten_f64_array_slice::<2>)
    }

    #[must_use]
    pub fn normals_flat(&self) -> Option<&[f64]> {
        self.normals.as_deref().map(flatten_f64_array_slice::<3>)
    }

    /// Tangent buffer as `[tx0, ty0, tz0, w0, tx1, ...]`.
    #[must_use]
    pub fn tangents_flat(&self) -> Option<&[f64]> {
        self.tangents.as_deref().map(flatten_f64_array_slice::<4>)
    }

    /// Replaces `normals` with area-weighted smooth vertex normals.
    ///
    /// Vertices that touch no triangle get `+Y`.
    pub fn compute_smooth_normals(&mut self) {
        let mut normals = vec![[0.0, 0.0, 0.0]; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let i0 = tri[0] as usize;
            let i1 = tri[1] as usize;
            let i2 = tri[2] as usize;

            let (Some(a), Some(b), Some(c)) = (
                self.positions.get(i0),
                self.positions.get(i1),
                self.positions.get(i2),
            ) else {
                continue;
            };

            let ab = Vec3::new(b[0] - a[0], b[1] - a[1], b[2] - a[2]);
            let ac = Vec3::new(c[0] - a[0], c[1] - a[1], c[2] - a[2]);
            let n = ab.cross(ac);

            for i in [i0, i1, i2] {
                normals[i][0] += n.x;
                normals[i][1] += n.y;
                normals[i][2] += n.z;
            }
        }

        for n in &mut normals {
            *n = Vec3::from_array(*n)
                .normalized()
                .map_or([0.0, 1.0, 0.0], Vec3::to_array);
        }

        self.normals = Some(normals);
        self.tangents = None;
    }

    /// Appends `other`, offsetting its indices.
    ///
    /// An attribute survives only when both meshes carry it (or `self` is still
    /// empty), so the merged buffers always match the vertex count.
    pub fn append(&mut self, other: &SurfaceMesh) {
        let was_empty = self.is_empty();
        let Ok(base) = u32::try_from(self.positions.len()) else {
            log::warn!("mesh append skipped: vertex count exceeds u32 index range");
            return;
        };

        self.uvs = merge_attribute(self.uvs.take(), other.uvs.as_ref(), was_empty);
        self.normals = merge_attribute(self.normals.take(), other.normals.as_ref(), was_empty);
        self.tangents = merge_attribute(self.tangents.take(), other.tangents.as_ref(), was_empty);

        self.positions.extend_from_slice(&other.positions);
        self.indices.extend(other.indices.iter().map(|&i| i + base));
    }

    /// Shifts every vertex vertically by `dy`.
    pub fn translate_y(&mut self, dy: f64) {
        for p in &mut self.positions {
            p[1] += dy;
        }
    }

    /// Packs the mesh into `f32` buffers for GPU upload.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_buffers(&self) -> MeshBuffers {
        let pack = |data: &[f64]| data.iter().map(|&v| v as f32).collect::<Vec<f32>>();
        MeshBuffers {
            positions: pack(self.positions_flat()),
            normals: self.normals_flat().map(pack),
            uvs: self.uvs_flat().map(pack),
            tangents: self.tangents_flat().map(pack),
            indices: self.indices.clone(),
        }
    }
}

/// Flat, `f32`-packed mesh buffers ready for a `BufferGeometry`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub normals: Option<Vec<f32>>,
    pub uvs: Option<Vec<f32>>,
    pub tangents: Option<Vec<f32>>,
    pub indices: Vec<u32>,
}

fn merge_attribute<T: Copy>(current: Option<Vec<T>>, incoming: Option<&Vec<T>>, was_empty: bool) -> Option<Vec<T>> {
    match (current, incoming) {
        (Some(mut data), Some(more)) => {
            data.extend_from_slice(more);
            Some(data)
        }
        (None, Some(more)) if was_empty => Some(more.clone()),
        _ => None,
    }
}

fn flatten_f64_array_slice<const N: usize>(data: &[[f64; N]]) -> &[f64] {
    let count = data.len().checked_mul(N).unwrap_or(0);
    let ptr = data.as_ptr().cast::<f64>();
    // SAFETY: `[[f64; N]]` is stored contiguously, and the element count is `len * N`.
    unsafe { std::slice::from_raw_parts(ptr, count) }
}
