use serde::Serialize;

use super::perimeter::PerimeterLoop;

/// Cumulative distance along a closed loop.
///
/// `arc_lengths[i]` is the distance walked from point 0 to point `i`;
/// `total_length` adds the closing edge back to point 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcLengthTable {
    pub arc_lengths: Vec<f64>,
    pub total_length: f64,
}

impl ArcLengthTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.arc_lengths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arc_lengths.is_empty()
    }

    /// Arc length of strip column `index`.
    ///
    /// Column `len()` is the seam column that closes the strip; it sits at
    /// `total_length` rather than wrapping back to zero.
    #[must_use]
    pub fn at_column(&self, index: usize) -> f64 {
        self.arc_lengths.get(index).copied().unwrap_or(self.total_length)
    }

    /// Arc-length texture coordinate of column `index` for a texture that
    /// repeats every `reference_width` metres.
    #[must_use]
    pub fn u_at(&self, index: usize, reference_width: f64) -> f64 {
        self.at_column(index) / reference_width
    }
}

#[must_use]
pub fn compute_arc_lengths(perimeter: &PerimeterLoop) -> ArcLengthTable {
    let points = perimeter.points();
    let Some((first, _)) = points.split_first() else {
        return ArcLengthTable::default();
    };

    let mut arc_lengths = Vec::with_capacity(points.len());
    arc_lengths.push(0.0);

    let mut total_length = 0.0;
    for pair in points.windows(2) {
        total_length += pair[1].distance_to(pair[0]);
        arc_lengths.push(total_length);
    }

    if let Some(last) = points.last() {
        total_length += first.distance_to(*last);
    }

    ArcLengthTable {
        arc_lengths,
        total_length,
    }
}
