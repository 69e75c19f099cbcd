//! Parallel loops at a signed distance from a perimeter, with mitred corners.

use crate::geom::{PlanPoint, Vec3, cyclic, signed_area};

use super::perimeter::{PerimeterError, PerimeterLoop};

/// Below this miter magnitude the two edge normals nearly cancel out.
pub const MITER_EPSILON: f64 = 1e-3;

/// Miter/normal alignment below which the miter spike is not stretched.
pub const MIN_MITER_DOT: f64 = 0.1;

/// Segment parameters this close to 0 or 1 count as touching an endpoint.
const CROSSING_EPSILON: f64 = 1e-9;

/// Consecutive outline points closer than this are merged.
const MERGE_DISTANCE: f64 = 1e-9;

/// Counts of corners that needed a fallback. None of these are errors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OffsetDiagnostics {
    pub input_point_count: usize,
    pub output_point_count: usize,
    /// Corners whose adjacent normals cancelled; the incoming normal was used.
    pub opposed_normal_count: usize,
    /// Corners too sharp for an exact miter; the plain distance was used.
    pub clamped_miter_count: usize,
    /// Edges of zero length encountered on the input loop.
    pub degenerate_edge_count: usize,
    /// Self-crossing loops cut away by [`offset_outline`].
    pub removed_loop_count: usize,
    pub warnings: Vec<String>,
}

impl OffsetDiagnostics {
    #[must_use]
    pub fn fallback_count(&self) -> usize {
        self.opposed_normal_count + self.clamped_miter_count + self.degenerate_edge_count
    }
}

/// Offsets every vertex of `perimeter` by `distance`; positive moves outward.
///
/// Each vertex moves along the bisector of its two adjacent outward edge
/// normals, scaled by `distance / dot(miter, n1)` so both neighbouring edges
/// end up exactly `distance` away. The output has the same point count as
/// the input and does not share storage with it.
///
/// The result is not re-validated: a large inward offset can collapse
/// neighbouring points, and an outward offset of a concave stretch can fold
/// over itself. Use [`offset_outline`] when the loop feeds a triangulator.
#[must_use]
pub fn offset_loop(perimeter: &PerimeterLoop, distance: f64) -> (PerimeterLoop, OffsetDiagnostics) {
    let points = perimeter.points();
    let n = points.len();
    let mut diagnostics = OffsetDiagnostics {
        input_point_count: n,
        output_point_count: n,
        ..OffsetDiagnostics::default()
    };

    if !distance.is_finite() {
        diagnostics
            .warnings
            .push(format!("offset distance {distance} is not finite; loop copied unchanged"));
        return (PerimeterLoop::from_points_unchecked(points.to_vec()), diagnostics);
    }
    if distance == 0.0 || n < 3 {
        return (PerimeterLoop::from_points_unchecked(points.to_vec()), diagnostics);
    }

    let edge_dirs: Vec<Vec3> = cyclic::edge_pairs(points)
        .map(|(a, b)| {
            (*b - *a).normalized().unwrap_or_else(|| {
                diagnostics.degenerate_edge_count += 1;
                Vec3::ZERO
            })
        })
        .collect();

    let mut offset = Vec::with_capacity(n);
    for (i, &current) in points.iter().enumerate() {
        let n1 = edge_dirs[cyclic::prev_index(i, n)].outward_normal();
        let n2 = edge_dirs[i].outward_normal();

        let miter = n1 + n2;
        let miter_len = miter.length();
        if miter_len < MITER_EPSILON {
            diagnostics.opposed_normal_count += 1;
            offset.push(current + n1 * distance);
            continue;
        }

        let miter = miter / miter_len;
        let dot = miter.dot(n1);
        let scale = if dot > MIN_MITER_DOT {
            distance / dot
        } else {
            diagnostics.clamped_miter_count += 1;
            distance
        };
        offset.push(current + miter * scale);
    }

    if diagnostics.fallback_count() > 0 {
        log::debug!(
            "offset by {distance}: {} opposed, {} clamped, {} degenerate",
            diagnostics.opposed_normal_count,
            diagnostics.clamped_miter_count,
            diagnostics.degenerate_edge_count
        );
    }

    (PerimeterLoop::from_points_unchecked(offset), diagnostics)
}

/// Offsets like [`offset_loop`], then cuts away the loops where the offset
/// folds over itself, so the outline stays a simple ring.
///
/// At every crossing of two non-adjacent edges the ring splits in two. The
/// piece that keeps the input winding survives; when both or neither do, the
/// larger one wins. The surviving ring is validated before it is returned.
pub fn offset_outline(
    perimeter: &PerimeterLoop,
    distance: f64,
) -> Result<(PerimeterLoop, OffsetDiagnostics), PerimeterError> {
    let (raw, mut diagnostics) = offset_loop(perimeter, distance);
    let Some(height) = raw.points().first().map(|p| p.y) else {
        return Ok((raw, diagnostics));
    };

    let plan: Vec<PlanPoint> = raw.points().iter().map(|p| p.to_plan()).collect();
    let winding = signed_area(&plan).signum();
    let (ring, removed) = remove_crossing_loops(plan, winding);
    diagnostics.removed_loop_count = removed;
    diagnostics.output_point_count = ring.len();
    if removed > 0 {
        log::debug!("offset by {distance}: removed {removed} self-crossing loops, {} points left", ring.len());
    }

    let outline = PerimeterLoop::new(ring.into_iter().map(|p| p.at_height(height)).collect())?;
    Ok((outline, diagnostics))
}

fn remove_crossing_loops(points: Vec<PlanPoint>, winding: f64) -> (Vec<PlanPoint>, usize) {
    let points = merge_repeated_points(points);
    if points.len() < 4 {
        return (points, 0);
    }
    let Some((i, j, crossing)) = first_crossing(&points) else {
        return (points, 0);
    };

    let (a, b) = split_at_crossing(&points, i, j, crossing);
    let (a, removed_a) = remove_crossing_loops(a, winding);
    let (b, removed_b) = remove_crossing_loops(b, winding);
    let (area_a, area_b) = (signed_area(&a), signed_area(&b));
    let keep_a = match (area_a * winding > 0.0, area_b * winding > 0.0) {
        (true, false) => true,
        (false, true) => false,
        _ => area_a.abs() >= area_b.abs(),
    };

    if keep_a { (a, removed_a + 1) } else { (b, removed_b + 1) }
}

/// Drops points that repeat their predecessor, wrap included.
fn merge_repeated_points(mut points: Vec<PlanPoint>) -> Vec<PlanPoint> {
    let close = |a: PlanPoint, b: PlanPoint| (a.x - b.x).hypot(a.z - b.z) <= MERGE_DISTANCE;
    points.dedup_by(|current, previous| close(*current, *previous));
    while points.len() > 1 && close(points[0], points[points.len() - 1]) {
        points.pop();
    }
    points
}

/// First crossing of edges `i` and `j` (`i < j`) that do not share a vertex.
fn first_crossing(points: &[PlanPoint]) -> Option<(usize, usize, PlanPoint)> {
    let n = points.len();
    for i in 0..n {
        let (a, b) = (points[i], points[cyclic::next_index(i, n)]);
        for j in i + 2..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (c, d) = (points[j], points[cyclic::next_index(j, n)]);
            if let Some(crossing) = segment_crossing(a, b, c, d) {
                return Some((i, j, crossing));
            }
        }
    }
    None
}

/// Point where `ab` meets `cd`, ignoring contacts at a shared endpoint.
fn segment_crossing(a: PlanPoint, b: PlanPoint, c: PlanPoint, d: PlanPoint) -> Option<PlanPoint> {
    let (rx, rz) = (b.x - a.x, b.z - a.z);
    let (sx, sz) = (d.x - c.x, d.z - c.z);
    let denom = rx * sz - rz * sx;
    if denom.abs() < f64::EPSILON {
        return None;
    }

    let (qx, qz) = (c.x - a.x, c.z - a.z);
    let t = (qx * sz - qz * sx) / denom;
    let u = (qx * rz - qz * rx) / denom;
    let inside = |v: f64| (-CROSSING_EPSILON..=1.0 + CROSSING_EPSILON).contains(&v);
    if !inside(t) || !inside(u) {
        return None;
    }
    let at_end = |v: f64| v < CROSSING_EPSILON || v > 1.0 - CROSSING_EPSILON;
    if at_end(t) && at_end(u) {
        return None;
    }

    Some(PlanPoint::new(a.x + t * rx, a.z + t * rz))
}

/// Splits the ring at the crossing of edges `i` and `j` into the loop that
/// runs `i + 1 ..= j` and the loop that wraps around through the seam.
fn split_at_crossing(points: &[PlanPoint], i: usize, j: usize, crossing: PlanPoint) -> (Vec<PlanPoint>, Vec<PlanPoint>) {
    let mut inner = Vec::with_capacity(j - i + 1);
    inner.push(crossing);
    inner.extend_from_slice(&points[i + 1..=j]);

    let mut outer = Vec::with_capacity(points.len() - (j - i) + 1);
    outer.push(crossing);
    outer.extend_from_slice(&points[j + 1..]);
    outer.extend_from_slice(&points[..=i]);

    (inner, outer)
}
