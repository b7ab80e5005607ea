//! Infinite 2D lines

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::{GeometryError, Vector2, EPSILON};
use util::maths::is_close;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An infinite line passing through `point` along `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Line {
    /// A point on the line
    pub point: Vector2,

    /// Unit vector along the line
    pub direction: Vector2,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Line {
    /// Create a new line through `point` along `vector`.
    ///
    /// The vector is normalised, so it must not be zero.
    pub fn new(point: Vector2, vector: Vector2) -> Result<Self, GeometryError> {
        Ok(Self {
            point,
            direction: vector.normalize()?,
        })
    }

    /// Return true if the point lies on the line.
    pub fn contains(&self, point: &Vector2) -> bool {
        (*point - self.point).is_collinear(&self.direction)
    }

    /// Find the unique point lying on both lines.
    ///
    /// Solves `p0 + a.v0 = p1 + b.v1` for `a` by projecting the offset between
    /// the two points onto each direction. If the directions are (nearly)
    /// parallel or opposite there is no unique solution and
    /// `GeometryError::ParallelLines` is returned.
    pub fn intersection(&self, other: &Line) -> Result<Vector2, GeometryError> {
        let (p0, v0) = (self.point, self.direction);
        let (p1, v1) = (other.point, other.direction);

        let v1_v0 = v1.scalar_product(&v0);

        if is_close(v1_v0.abs(), 1.0, EPSILON) {
            return Err(GeometryError::ParallelLines);
        }

        let dp = p1 - p0;
        let dp_v0 = dp.scalar_product(&v0);
        let dp_v1 = dp.scalar_product(&v1);

        let coef_0 = (dp_v0 - dp_v1 * v1_v0) / (1.0 - v1_v0 * v1_v0);

        Ok(p0 + v0 * coef_0)
    }
}
