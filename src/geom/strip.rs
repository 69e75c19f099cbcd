//! Index layout shared by the vertical strip meshes.
//!
//! A strip over a loop of `n` points has `n + 1` columns; column `n` is the
//! seam copy of column 0. Each column holds a bottom vertex at `2 * c` and a
//! top vertex at `2 * c + 1`.

/// Which side of a counterclockwise (seen from +Y) loop the strip's front faces look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripFacing {
    /// Toward the loop interior, i.e. visible from inside the pool.
    Inward,
    /// Away from the loop interior.
    Outward,
}

#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn build_strip_indices(point_count: usize, facing: StripFacing) -> Vec<u32> {
    let mut indices = Vec::with_capacity(point_count * 6);
    for column in 0..point_count {
        let bottom = (column * 2) as u32;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;

        match facing {
            StripFacing::Inward => {
                indices.extend_from_slice(&[bottom, next_bottom, top]);
                indices.extend_from_slice(&[next_bottom, next_top, top]);
            }
            StripFacing::Outward => {
                indices.extend_from_slice(&[bottom, next_top, next_bottom]);
                indices.extend_from_slice(&[bottom, top, next_top]);
            }
        }
    }
    indices
}
