//! Closed perimeter loops for every supported pool shape.
//!
//! All loops lie in the ground plane (`y = 0`), store each point once and run
//! counterclockwise seen from +Y: the first rectangle edge travels +X along the
//! -Z side. Builders downstream rely on that orientation for their normals.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::geom::{BBox, Point3, Vec3, cyclic};

/// Consecutive points closer than this count as coincident.
const MIN_EDGE_LENGTH: f64 = 1e-12;

/// Pool outline family, as chosen in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Oval,
    Circular,
    Jellybean,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Rectangle,
        ShapeKind::Oval,
        ShapeKind::Circular,
        ShapeKind::Jellybean,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Oval => "oval",
            ShapeKind::Circular => "circular",
            ShapeKind::Jellybean => "jellybean",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ShapeKind {
    type Err = PerimeterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PerimeterError::invalid(format!("unknown pool shape '{s}'")))
    }
}

/// Shape plus the dimensions that drive it, in metres.
///
/// `length` runs along X and `width` along Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoolShape {
    Rectangle { length: f64, width: f64 },
    Oval { length: f64, width: f64 },
    /// Uses `min(length, width)` as diameter; the larger dimension is ignored.
    Circular { length: f64, width: f64 },
    Jellybean { length: f64, width: f64 },
}

impl PoolShape {
    #[must_use]
    pub const fn new(kind: ShapeKind, length: f64, width: f64) -> Self {
        match kind {
            ShapeKind::Rectangle => Self::Rectangle { length, width },
            ShapeKind::Oval => Self::Oval { length, width },
            ShapeKind::Circular => Self::Circular { length, width },
            ShapeKind::Jellybean => Self::Jellybean { length, width },
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Oval { .. } => ShapeKind::Oval,
            Self::Circular { .. } => ShapeKind::Circular,
            Self::Jellybean { .. } => ShapeKind::Jellybean,
        }
    }

    #[must_use]
    pub const fn dimensions(&self) -> (f64, f64) {
        match *self {
            Self::Rectangle { length, width }
            | Self::Oval { length, width }
            | Self::Circular { length, width }
            | Self::Jellybean { length, width } => (length, width),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PerimeterError {
    #[error("invalid shape parameters: {reason}")]
    InvalidShapeParameters { reason: String },
}

impl PerimeterError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidShapeParameters { reason: reason.into() }
    }
}

/// Ordered, implicitly closed ring of ground-plane points.
#[derive(Debug, Clone, PartialEq)]
pub struct PerimeterLoop {
    points: Vec<Point3>,
}

impl Serialize for PerimeterLoop {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.points.iter().map(|p| p.to_array()))
    }
}

impl PerimeterLoop {
    /// Validates and wraps `points`.
    ///
    /// Rejects fewer than 3 points, non-finite coordinates and coincident
    /// consecutive points, including the wrap from last to first.
    pub fn new(points: Vec<Point3>) -> Result<Self, PerimeterError> {
        if points.len() < 3 {
            return Err(PerimeterError::invalid(format!(
                "perimeter needs at least 3 points, got {}",
                points.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(PerimeterError::invalid(format!("perimeter point {i} is not finite")));
        }
        if let Some((a, b)) = cyclic::edges(points.len())
            .find(|&(a, b)| points[a].distance_to(points[b]) <= MIN_EDGE_LENGTH)
        {
            return Err(PerimeterError::invalid(format!(
                "perimeter points {a} and {b} coincide"
            )));
        }
        Ok(Self { points })
    }

    /// Wraps offset points without the coincidence check of [`PerimeterLoop::new`].
    ///
    /// Offsetting a valid loop by a finite distance keeps every point finite,
    /// but may fold the loop or collapse neighbours.
    pub(crate) fn from_points_unchecked(points: Vec<Point3>) -> Self {
        debug_assert!(points.iter().all(|p| p.is_finite()), "offset produced a non-finite point");
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Unit direction of edge `i -> i + 1`, wrap edge included.
    #[must_use]
    pub fn edge_direction(&self, i: usize) -> Vec3 {
        let n = self.points.len();
        let a = self.points[i];
        let b = self.points[cyclic::next_index(i, n)];
        (b - a).normalized().unwrap_or(Vec3::X)
    }

    /// Shoelace area in the (x, z) plane; positive for counterclockwise loops.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let sum: f64 = cyclic::edge_pairs(&self.points)
            .map(|(a, b)| a.x * b.z - b.x * a.z)
            .sum();
        0.5 * sum
    }

    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    #[must_use]
    pub fn bounds(&self) -> Option<BBox> {
        BBox::from_points(&self.points)
    }

    /// Points as `[x, y, z]` triples.
    #[must_use]
    pub fn to_arrays(&self) -> Vec<[f64; 3]> {
        self.points.iter().map(|p| p.to_array()).collect()
    }
}

/// Samples the outline of `shape` into a closed counterclockwise loop.
pub fn generate_perimeter(shape: &PoolShape, segments: usize) -> Result<PerimeterLoop, PerimeterError> {
    let (length, width) = shape.dimensions();
    check_dimensions(length, width)?;
    if segments < 4 {
        return Err(PerimeterError::invalid(format!(
            "at least 4 segments are required, got {segments}"
        )));
    }

    let points = match *shape {
        PoolShape::Rectangle { length, width } => rectangle_points(length, width, segments),
        PoolShape::Oval { length, width } => oval_points(length, width, segments),
        PoolShape::Circular { length, width } => {
            let diameter = length.min(width);
            oval_points(diameter, diameter, segments)
        }
        PoolShape::Jellybean { length, width } => jellybean_points(length, width, segments)?,
    };

    log::debug!("perimeter {}: {} points from {segments} segments", shape.kind(), points.len());
    PerimeterLoop::new(points)
}

pub(crate) fn check_dimensions(length: f64, width: f64) -> Result<(), PerimeterError> {
    if !length.is_finite() || !width.is_finite() {
        return Err(PerimeterError::invalid("dimensions must be finite"));
    }
    if length <= 0.0 || width <= 0.0 {
        return Err(PerimeterError::invalid(format!(
            "dimensions must be positive, got {length} x {width}"
        )));
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn rectangle_points(length: f64, width: f64, segments: usize) -> Vec<Point3> {
    let per_side = segments / 4;
    let steps = per_side as f64;
    let (hl, hw) = (length / 2.0, width / 2.0);
    let mut points = Vec::with_capacity(per_side * 4);

    // -Z side, travelling +X
    points.extend((0..=per_side).map(|i| Point3::on_plan(-hl + length * i as f64 / steps, -hw)));
    // +X side, travelling +Z
    points.extend((1..=per_side).map(|i| Point3::on_plan(hl, -hw + width * i as f64 / steps)));
    // +Z side, travelling -X
    points.extend((1..=per_side).map(|i| Point3::on_plan(hl - length * i as f64 / steps, hw)));
    // -X side, travelling -Z; the corner back at the start is not repeated
    points.extend((1..per_side).map(|i| Point3::on_plan(-hl, hw - width * i as f64 / steps)));

    points
}

/// Equal angular steps, not equal arc length.
#[allow(clippy::cast_precision_loss)]
fn oval_points(length: f64, width: f64, segments: usize) -> Vec<Point3> {
    let (a, b) = (length / 2.0, width / 2.0);
    (0..segments)
        .map(|i| {
            let angle = i as f64 / segments as f64 * TAU;
            Point3::on_plan(a * angle.cos(), b * angle.sin())
        })
        .collect()
}

/// Kidney outline: a large semicircle on -X, a smaller one on +X, joined by an
/// indented bottom edge and a gently bulging top edge.
#[allow(clippy::cast_precision_loss)]
fn jellybean_points(length: f64, width: f64, segments: usize) -> Result<Vec<Point3>, PerimeterError> {
    let big_radius = width / 2.0;
    let small_radius = width / 3.0;
    let body = length - big_radius - small_radius;
    if body < 0.0 {
        return Err(PerimeterError::invalid(format!(
            "jellybean length {length} is shorter than its end radii ({})",
            big_radius + small_radius
        )));
    }

    let half = segments / 2;
    let quarter = segments / 4;
    let indent_depth = width * 0.15;
    let mut points = Vec::with_capacity(2 * (half + 1) + 2 * quarter.saturating_sub(1));

    for i in 0..=half {
        let angle = FRAC_PI_2 + i as f64 / half as f64 * PI;
        points.push(Point3::on_plan(
            -body / 2.0 + big_radius * angle.cos(),
            big_radius * angle.sin(),
        ));
    }

    for i in 1..quarter {
        let t = i as f64 / quarter as f64;
        let indent = 4.0 * t * (1.0 - t) * indent_depth;
        points.push(Point3::on_plan(
            -body / 2.0 + t * body,
            -big_radius + (big_radius - small_radius) * t + indent,
        ));
    }

    for i in 0..=half {
        let angle = -FRAC_PI_2 + i as f64 / half as f64 * PI;
        points.push(Point3::on_plan(
            body / 2.0 + small_radius * angle.cos(),
            small_radius * angle.sin(),
        ));
    }

    for i in 1..quarter {
        let t = i as f64 / quarter as f64;
        let bulge = 4.0 * t * (1.0 - t) * indent_depth * 0.5;
        points.push(Point3::on_plan(
            body / 2.0 - t * body,
            small_radius + (big_radius - small_radius) * t + bulge,
        ));
    }

    Ok(points)
}
