mod test_floor_deck_basic;
mod test_perimeter_basic;
mod test_strip_builders;

use crate::geom::Point3;
use crate::pool::{PerimeterLoop, PoolShape, ShapeKind, generate_perimeter};

/// Four-corner square of side `2 * half`, counterclockwise from (-half, -half).
pub(super) fn square_loop(half: f64) -> PerimeterLoop {
    generate_perimeter(&PoolShape::new(ShapeKind::Rectangle, 2.0 * half, 2.0 * half), 4).unwrap()
}

pub(super) fn plan_loop(points: &[(f64, f64)]) -> PerimeterLoop {
    PerimeterLoop::new(points.iter().map(|&(x, z)| Point3::on_plan(x, z)).collect()).unwrap()
}

/// Geometric normal of triangle `tri`, not normalized.
pub(super) fn face_normal(positions: &[[f64; 3]], tri: &[u32]) -> [f64; 3] {
    let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| positions[i as usize]);
    let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    [
        ab[1] * ac[2] - ab[2] * ac[1],
        ab[2] * ac[0] - ab[0] * ac[2],
        ab[0] * ac[1] - ab[1] * ac[0],
    ]
}

pub(super) fn centroid(positions: &[[f64; 3]], tri: &[u32]) -> [f64; 3] {
    std::array::from_fn(|k| tri.iter().map(|&i| positions[i as usize][k]).sum::<f64>() / 3.0)
}
