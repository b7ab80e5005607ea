//! # Motion primitives
//!
//! A plan is an ordered list of `Motion`s, each being either a straight
//! `Translation` or a `Rotation` along a circular arc (possibly of zero radius,
//! i.e. on the spot).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use crate::geometry::{Arc, GeometryError, Vector2};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A straight line motion between two points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Translation {
    pub start: Vector2,

    pub end: Vector2,

    /// Units: meters
    pub length_m: f64,

    /// Unit vector pointing from the start to the end
    pub direction: Vector2,
}

/// A motion along a circular arc.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rotation {
    pub arc: Arc,
}

/// A single primitive of a plan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Motion {
    Translation(Translation),
    Rotation(Rotation),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Translation {
    /// Create a new translation from `start` to `end`.
    ///
    /// The points must be distinct, otherwise the direction is undefined and
    /// `GeometryError::DegenerateVector` is returned.
    pub fn new(start: Vector2, end: Vector2) -> Result<Self, GeometryError> {
        let length_m = Vector2::distance(&start, &end);

        Ok(Self {
            start,
            end,
            length_m,
            direction: (end - start).normalize_with(length_m)?,
        })
    }

    /// Return true if both translations move along the same or opposite
    /// directions.
    pub fn is_parallel_with(&self, other: &Translation) -> bool {
        self.direction.is_collinear(&other.direction)
    }
}

impl Rotation {
    pub fn new(arc: Arc) -> Self {
        Self { arc }
    }

    /// A rotation is on the spot if its arc has a zero radius.
    pub fn is_on_the_spot(&self) -> bool {
        self.arc.radius_m == 0.0
    }

    pub fn length_m(&self) -> f64 {
        self.arc.length_m
    }
}

impl Motion {
    /// Distance travelled by the rover's center during this motion.
    pub fn length_m(&self) -> f64 {
        match self {
            Motion::Translation(t) => t.length_m,
            Motion::Rotation(r) => r.length_m(),
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self, Motion::Rotation(_))
    }

    pub fn as_rotation(&self) -> Option<&Rotation> {
        match self {
            Motion::Rotation(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Translation> for Motion {
    fn from(t: Translation) -> Self {
        Motion::Translation(t)
    }
}

impl From<Rotation> for Motion {
    fn from(r: Rotation) -> Self {
        Motion::Rotation(r)
    }
}

#[cfg(test)]
mod test {
    use std::f64::consts::{FRAC_1_SQRT_2, PI, SQRT_2};

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_translation() {
        let t = Translation::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0)).unwrap();

        assert_abs_diff_eq!(t.length_m, SQRT_2);
        assert_eq!(t.direction, (FRAC_1_SQRT_2, FRAC_1_SQRT_2));
    }

    #[test]
    fn test_translation_same_points() {
        assert_eq!(
            Translation::new(Vector2::new(2.0, 1.0), Vector2::new(2.0, 1.0)),
            Err(GeometryError::DegenerateVector)
        );
    }

    #[test]
    fn test_parallel() {
        let a = Translation::new(Vector2::new(0.0, 0.0), Vector2::new(5.0, 0.0)).unwrap();
        let b = Translation::new(Vector2::new(5.0, 0.0), Vector2::new(10.0, 0.0)).unwrap();
        let c = Translation::new(Vector2::new(10.0, 0.0), Vector2::new(0.0, 0.0)).unwrap();
        let d = Translation::new(Vector2::new(10.0, 0.0), Vector2::new(10.0, 1.0)).unwrap();

        assert!(a.is_parallel_with(&b));
        assert!(a.is_parallel_with(&c));
        assert!(!a.is_parallel_with(&d));
    }

    #[test]
    fn test_motion_length() {
        let t: Motion = Translation::new(Vector2::new(0.0, 0.0), Vector2::new(3.0, 4.0))
            .unwrap()
            .into();
        let r: Motion = Rotation::new(
            Arc::from_endpoints_and_tangent(
                Vector2::new(1.0, 0.0),
                Vector2::new(-1.0, 0.0),
                Vector2::new(0.0, 1.0),
            )
            .unwrap(),
        )
        .into();

        assert_abs_diff_eq!(t.length_m(), 5.0);
        assert_abs_diff_eq!(r.length_m(), PI, epsilon = 1e-9);
        assert!(!t.is_rotation());
        assert!(r.is_rotation());
        assert!(!r.as_rotation().unwrap().is_on_the_spot());
    }
}
