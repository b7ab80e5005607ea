//! 2D vector/point value type

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use nalgebra as na;
use serde::{Deserialize, Serialize};

use super::{GeometryError, EPSILON};
use util::maths::is_close;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A 2D vector, also used to represent points.
///
/// Equality is approximate: two vectors are equal if each of their components
/// are within `EPSILON` of each other, so that round trips through
/// trigonometric functions compare equal.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector2(na::Vector2<f64>);

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Vector2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self(na::Vector2::new(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// The vector rotated by +90 degrees, i.e. `(-y, x)`.
    pub fn normal(&self) -> Self {
        Self::new(-self.0.y, self.0.x)
    }

    /// Euclidian length of the vector.
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// Unit vector in the direction of this one.
    pub fn normalize(&self) -> Result<Self, GeometryError> {
        self.normalize_with(self.norm())
    }

    /// Divide the vector by the given length.
    ///
    /// Useful when the length is already known, e.g. a chord length computed
    /// with `Vector2::distance`.
    pub fn normalize_with(&self, length: f64) -> Result<Self, GeometryError> {
        if length == 0.0 {
            return Err(GeometryError::DegenerateVector);
        }

        Ok(Self(self.0 / length))
    }

    pub fn scalar_product(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }

    /// The 2D cross product (signed area of the parallelogram), positive when
    /// `other` is counter-clockwise from `self`.
    pub fn vectorial_product(&self, other: &Self) -> f64 {
        self.0.perp(&other.0)
    }

    pub fn is_orthogonal(&self, other: &Self) -> bool {
        is_close(self.scalar_product(other), 0.0, EPSILON)
    }

    pub fn is_collinear(&self, other: &Self) -> bool {
        self.is_orthogonal(&other.normal())
    }

    /// The vector rotated counter-clockwise by `angle_rad`.
    pub fn rotate(&self, angle_rad: f64) -> Self {
        let (sin, cos) = angle_rad.sin_cos();
        Self::new(
            self.0.x * cos - self.0.y * sin,
            self.0.x * sin + self.0.y * cos,
        )
    }

    /// Middle point between `a` and `b`.
    pub fn midpoint(a: &Self, b: &Self) -> Self {
        Self((a.0 + b.0) * 0.5)
    }

    /// Distance between the points `a` and `b`.
    pub fn distance(a: &Self, b: &Self) -> f64 {
        (a.0 - b.0).norm()
    }
}

impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        is_close(self.0.x, other.0.x, EPSILON) && is_close(self.0.y, other.0.y, EPSILON)
    }
}

impl PartialEq<(f64, f64)> for Vector2 {
    fn eq(&self, other: &(f64, f64)) -> bool {
        *self == Vector2::from(*other)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from(xy: (f64, f64)) -> Self {
        Self::new(xy.0, xy.1)
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from(xy: [f64; 2]) -> Self {
        Self::new(xy[0], xy[1])
    }
}

impl From<Vector2> for (f64, f64) {
    fn from(v: Vector2) -> Self {
        (v.0.x, v.0.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

#[cfg(test)]
mod test {
    use std::f64::consts::{FRAC_1_SQRT_2, PI, SQRT_2};

    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_add() {
        let c = Vector2::new(0.5, 0.5) + Vector2::new(-1.0, 1.0);
        assert_eq!(c.x(), -0.5);
        assert_eq!(c.y(), 1.5);
    }

    #[test]
    fn test_sub_and_scale() {
        let c = (Vector2::new(3.0, 1.0) - Vector2::new(1.0, 2.0)) * 2.0;
        assert_eq!(c, (4.0, -2.0));
    }

    #[rstest]
    #[case((0.5, 0.5), (0.5 * (1.0 + 1e-10), 0.5), true)]
    #[case((0.0, 6.123233995736766e-17), (0.0, 0.0), true)]
    #[case((4.0, 1.0), (4.0, 1.0 + 1e-10), true)]
    #[case((0.0, 1e-8), (0.0, 0.0), false)]
    fn test_approx_equal(#[case] a: (f64, f64), #[case] b: (f64, f64), #[case] equal: bool) {
        assert_eq!(Vector2::from(a) == Vector2::from(b), equal);
    }

    #[test]
    fn test_equal_tuple() {
        assert_eq!(Vector2::new(1.0, 4.0), (1.0, 4.0));
        assert_eq!(Vector2::from([4.0, 1.0]), Vector2::new(4.0, 1.0));
    }

    #[test]
    fn test_normal() {
        assert_eq!(Vector2::new(1.0, 2.0).normal(), (-2.0, 1.0));
    }

    #[rstest]
    #[case(Vector2::new(3.0, 4.0))]
    #[case(Vector2::new(-0.001, 0.0))]
    #[case(Vector2::new(1e6, -2e6))]
    #[case(Vector2::new(0.5, 0.5))]
    fn test_normalize_is_unit_and_collinear(#[case] v: Vector2) {
        let n = v.normalize().unwrap();
        assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-9);
        assert!(v.is_collinear(&n));
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(
            Vector2::new(0.0, 0.0).normalize(),
            Err(GeometryError::DegenerateVector)
        );
        assert_eq!(
            Vector2::new(1.0, 1.0).normalize_with(0.0),
            Err(GeometryError::DegenerateVector)
        );
    }

    #[test]
    fn test_normalize_with_length() {
        let v = Vector2::new(2.0, 2.0).normalize_with(2.0 * SQRT_2).unwrap();
        assert_eq!(v, (FRAC_1_SQRT_2, FRAC_1_SQRT_2));
    }

    #[test]
    fn test_orthogonal() {
        assert!(Vector2::new(0.5, 0.5).is_orthogonal(&Vector2::new(-1.0, 1.0)));
        assert!(!Vector2::new(1.0, 0.7).is_orthogonal(&Vector2::new(0.5, 1.0)));
    }

    #[test]
    fn test_collinear() {
        assert!(Vector2::new(0.5, 0.5).is_collinear(&Vector2::new(1.0, 1.0)));
        assert!(Vector2::new(0.5, 0.5).is_collinear(&Vector2::new(-1.0, -1.0)));
        assert!(!Vector2::new(1.0, 0.0).is_collinear(&Vector2::new(1.0, 0.1)));
    }

    #[rstest]
    #[case((1.0, 0.0), (0.0, 1.0), 1.0)]
    #[case((0.0, 1.0), (1.0, 0.0), -1.0)]
    #[case((2.0, 0.0), (4.0, 0.0), 0.0)]
    fn test_vectorial_product(#[case] a: (f64, f64), #[case] b: (f64, f64), #[case] expected: f64) {
        assert_eq!(
            Vector2::from(a).vectorial_product(&Vector2::from(b)),
            expected
        );
    }

    #[test]
    fn test_rotate() {
        assert_eq!(Vector2::new(1.0, 0.0).rotate(PI / 2.0), (0.0, 1.0));
        assert_eq!(Vector2::new(0.0, -1.0).rotate(-3.0 * PI / 2.0), (1.0, 0.0));
    }

    #[rstest]
    #[case((1.0, 0.0), (0.0, 1.0))]
    #[case((-3.5, 2.0), (7.0, 11.0))]
    #[case((0.0, 0.0), (0.0, 0.0))]
    fn test_distance_symmetric(#[case] a: (f64, f64), #[case] b: (f64, f64)) {
        let (a, b) = (Vector2::from(a), Vector2::from(b));
        assert_eq!(Vector2::distance(&a, &b), Vector2::distance(&b, &a));
        assert_eq!(Vector2::distance(&a, &a), 0.0);
    }

    #[test]
    fn test_distance() {
        assert_abs_diff_eq!(
            Vector2::distance(&Vector2::new(1.0, 0.0), &Vector2::new(0.0, 1.0)),
            SQRT_2
        );
    }

    #[test]
    fn test_serialise() {
        let v = Vector2::new(1.5, -2.0);
        let json = serde_json::to_string(&v).unwrap();
        let back: Vector2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
