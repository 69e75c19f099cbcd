use std::ops::{Add, Div, Mul, Neg, Sub};

/// Direction or displacement in world space, +Y up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// World up. Perimeter geometry lives in the plane orthogonal to this axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn from_array([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector along `self`, or `None` for zero or non-finite input.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        (len.is_finite() && len > 0.0).then(|| self / len)
    }

    /// Outward normal of a horizontal edge direction on a counterclockwise loop.
    ///
    /// Viewed from +Y with the loop running counterclockwise, the exterior lies
    /// on the `(dir.z, 0, -dir.x)` side.
    #[must_use]
    pub const fn outward_normal(self) -> Self {
        Self::new(self.z, 0.0, -self.x)
    }

    #[must_use]
    pub const fn inward_normal(self) -> Self {
        Self::new(-self.z, 0.0, self.x)
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Position in world space. Perimeter points sit at `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn on_plan(x: f64, z: f64) -> Self {
        Self::new(x, 0.0, z)
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Same plan position at height `y`.
    #[must_use]
    pub const fn with_y(self, y: f64) -> Self {
        Self::new(self.x, y, self.z)
    }

    #[must_use]
    pub const fn to_plan(self) -> PlanPoint {
        PlanPoint::new(self.x, self.z)
    }

    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new(
            0.5 * (self.x + other.x),
            0.5 * (self.y + other.y),
            0.5 * (self.z + other.z),
        )
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self - other).length()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add<Vec3> for Point3 {
    type Output = Self;
    fn add(self, rhs: Vec3) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// A point in the horizontal (x, z) plane, used for outlines and cap triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanPoint {
    pub x: f64,
    pub z: f64,
}

impl PlanPoint {
    #[must_use]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    #[must_use]
    pub const fn at_height(self, y: f64) -> Point3 {
        Point3::new(self.x, y, self.z)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }
}

/// Rigid placement of a part: a turn about +Y followed by a move to `origin`.
///
/// Positive `rotation_y` turns +X toward -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    origin: Point3,
    cos: f64,
    sin: f64,
}

impl Transform {
    #[must_use]
    pub fn new(origin: Point3, rotation_y: f64) -> Self {
        let (sin, cos) = rotation_y.sin_cos();
        Self { origin, cos, sin }
    }

    #[must_use]
    pub fn apply_vec(self, v: Vec3) -> Vec3 {
        Vec3::new(self.cos * v.x + self.sin * v.z, v.y, self.cos * v.z - self.sin * v.x)
    }

    #[must_use]
    pub fn apply_point(self, local: Vec3) -> Point3 {
        self.origin + self.apply_vec(local)
    }
}

/// Axis-aligned bounds of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min: Point3,
    pub max: Point3,
}

impl BBox {
    /// Bounds of `points`, or `None` when it is empty.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self { min: first, max: first }, |bounds, p| Self {
            min: Point3::new(bounds.min.x.min(p.x), bounds.min.y.min(p.y), bounds.min.z.min(p.z)),
            max: Point3::new(bounds.max.x.max(p.x), bounds.max.y.max(p.y), bounds.max.z.max(p.z)),
        }))
    }
}
