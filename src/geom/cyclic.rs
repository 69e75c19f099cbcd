//! Index arithmetic for implicitly closed loops.
//!
//! Every closed curve in the crate stores its points once, without repeating
//! the first point at the end. These helpers keep the wrap-around edge from
//! the last point back to the first in one place.

/// Index following `i` in a loop of `len` points.
#[inline]
#[must_use]
pub const fn next_index(i: usize, len: usize) -> usize {
    if i + 1 >= len { 0 } else { i + 1 }
}

/// Index preceding `i` in a loop of `len` points.
#[inline]
#[must_use]
pub const fn prev_index(i: usize, len: usize) -> usize {
    if i == 0 { len.saturating_sub(1) } else { i - 1 }
}

/// Iterates `(i, next_index(i))` for every edge of a closed loop, wrap edge last.
pub fn edges(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len).map(move |i| (i, next_index(i, len)))
}

/// Iterates the point pairs of every edge of a closed loop, wrap edge last.
pub fn edge_pairs<T>(points: &[T]) -> impl Iterator<Item = (&T, &T)> {
    edges(points.len()).map(move |(a, b)| (&points[a], &points[b]))
}
