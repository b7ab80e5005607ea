//! Circular arcs
//!
//! An arc is defined by its two endpoints and the direction it leaves the
//! start point in. The center, radius and signed angle are all derived at
//! construction and never change afterwards.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::f64::consts::PI;

use serde::Serialize;

use super::{GeometryError, Line, Vector2, ARC_RADIUS_TOLERANCE, EPSILON};
use util::maths::{clamp, is_close, sign};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A circular arc.
///
/// A zero radius arc (`start == end`) represents a turn on the spot, in which
/// case `angle_rad` is the heading change and the length is zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Arc {
    /// The first point of the arc
    pub start: Vector2,

    /// The last point of the arc
    pub end: Vector2,

    /// The center of the circle the arc lies on
    pub center: Vector2,

    /// Units: meters
    pub radius_m: f64,

    /// Signed angle swept by the arc, counter-clockwise positive.
    ///
    /// Units: radians, in `(-2pi, 2pi)`
    pub angle_rad: f64,

    /// The turn direction, matching the sign of `angle_rad`
    pub direction: TurnDirection,

    /// Unit tangent at the start point, in the direction of travel
    pub start_tangent: Vector2,

    /// Unit tangent at the end point, in the direction of travel
    pub end_tangent: Vector2,

    /// Units: meters
    pub length_m: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The direction in which an arc turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TurnDirection {
    /// Counter-clockwise, i.e. a turn to the left
    Direct,
    /// Clockwise, i.e. a turn to the right
    Indirect,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Arc {
    /// Build the arc from `start` to `end` which leaves `start` along
    /// `start_tangent`.
    ///
    /// The center lies both on the perpendicular bisector of the chord and on
    /// the radius through `start` (perpendicular to the tangent). When these
    /// are parallel, or the chord is degenerate, the chord midpoint is used.
    ///
    /// The angle is the one actually travelled when leaving along the tangent,
    /// which is not necessarily the shorter of the two arcs.
    pub fn from_endpoints_and_tangent(
        start: Vector2,
        end: Vector2,
        start_tangent: Vector2,
    ) -> Result<Self, GeometryError> {
        let start_tangent = start_tangent.normalize()?;
        let center = Self::compute_center_with_tangent(&start, &end, &start_tangent)?;

        let angle_rad = if start == end {
            0.0
        } else {
            Self::sweep_angle(&start, &end, &start_tangent)?
        };

        let end_tangent = start_tangent.rotate(angle_rad);

        Ok(Self::build(
            start,
            end,
            center,
            angle_rad,
            start_tangent,
            end_tangent,
        ))
    }

    /// Build the arc from `start` to `end` with known tangents at both ends.
    ///
    /// The center is the intersection of the radii through both endpoints.
    /// The tangents must describe a circle: if the center is not equidistant
    /// from both endpoints `GeometryError::ArcConsistency` is returned, which
    /// indicates a bug in the caller.
    ///
    /// When `start == end` this is a turn on the spot from `start_tangent` to
    /// `end_tangent`. A full reversal is reported as a `+pi` turn.
    pub fn from_endpoints_and_tangents(
        start: Vector2,
        end: Vector2,
        start_tangent: Vector2,
        end_tangent: Vector2,
    ) -> Result<Self, GeometryError> {
        let start_tangent = start_tangent.normalize()?;
        let end_tangent = end_tangent.normalize()?;
        let center =
            Self::compute_center_from_both_tangents(&start, &end, &start_tangent, &end_tangent)?;

        let start_radius = Vector2::distance(&center, &start);
        let end_radius = Vector2::distance(&center, &end);
        let tolerance = ARC_RADIUS_TOLERANCE * start_radius.max(end_radius).max(1.0);

        if !is_close(start_radius, end_radius, tolerance) {
            return Err(GeometryError::ArcConsistency {
                start_radius,
                end_radius,
            });
        }

        let angle_rad = if start == end {
            Self::turn_angle(&start_tangent, &end_tangent)
        } else {
            Self::sweep_angle(&start, &end, &start_tangent)?
        };

        Ok(Self::build(
            start,
            end,
            center,
            angle_rad,
            start_tangent,
            end_tangent,
        ))
    }

    /// Find the center of the arc from `start` to `end` tangent to `tangent` at
    /// `start`.
    pub fn compute_center_with_tangent(
        start: &Vector2,
        end: &Vector2,
        tangent: &Vector2,
    ) -> Result<Vector2, GeometryError> {
        let middle = Vector2::midpoint(start, end);
        let radial = Line::new(*start, tangent.normal())?;

        // A degenerate chord has no bisector
        let bisector = match Line::new(middle, (*end - *start).normal()) {
            Ok(l) => l,
            Err(_) => return Ok(middle),
        };

        match radial.intersection(&bisector) {
            Err(GeometryError::ParallelLines) => Ok(middle),
            r => r,
        }
    }

    /// Find the center of the arc tangent to `tangent_p0` at `p0` and to
    /// `tangent_p1` at `p1`, falling back to the midpoint of `p0` and `p1` if
    /// the radii are parallel.
    ///
    /// No check is made that the result is equidistant from both points.
    pub fn compute_center_from_both_tangents(
        p0: &Vector2,
        p1: &Vector2,
        tangent_p0: &Vector2,
        tangent_p1: &Vector2,
    ) -> Result<Vector2, GeometryError> {
        let radial_p0 = Line::new(*p0, tangent_p0.normal())?;
        let radial_p1 = Line::new(*p1, tangent_p1.normal())?;

        match radial_p0.intersection(&radial_p1) {
            Err(GeometryError::ParallelLines) => Ok(Vector2::midpoint(p0, p1)),
            r => r,
        }
    }

    /// Get the doubled angle between the chord and the tangent, along with the
    /// unit chord vector and the chord length.
    ///
    /// The angle is `2.acos(u.v)` signed by `u.x*v.y + u.y*v.x`, where `u` is
    /// the unit chord and `v` the unit tangent. The magnitude is the angle
    /// swept by an arc leaving `start` along `tangent` (tangent-chord angle).
    pub fn find_angle_and_chord_vector(
        start: &Vector2,
        end: &Vector2,
        tangent: &Vector2,
    ) -> Result<(f64, Vector2, f64), GeometryError> {
        let distance = Vector2::distance(start, end);
        let u = (*end - *start).normalize_with(distance)?;
        let v = tangent.normalize()?;

        let angle = clamp(&u.scalar_product(&v), &-1.0, &1.0).acos();
        let indicator = u.x() * v.y() + u.y() * v.x();

        Ok((2.0 * angle * sign(indicator), u, distance))
    }

    /// Signed angle swept from `start` to `end` leaving along `tangent`.
    ///
    /// Counter-clockwise when the chord lies to the left of the tangent. A
    /// tangent pointing straight back from `end` has no such arc.
    fn sweep_angle(
        start: &Vector2,
        end: &Vector2,
        tangent: &Vector2,
    ) -> Result<f64, GeometryError> {
        let (angle, chord, _) = Self::find_angle_and_chord_vector(start, end, tangent)?;

        if is_close(chord.scalar_product(&tangent.normalize()?), -1.0, EPSILON) {
            return Err(GeometryError::TangentAwayFromEnd);
        }

        Ok(angle.abs() * sign(tangent.vectorial_product(&chord)))
    }

    /// Signed heading change from `from` to `to`, in `(-pi, pi]`.
    fn turn_angle(from: &Vector2, to: &Vector2) -> f64 {
        let angle = from.vectorial_product(to).atan2(from.scalar_product(to));

        // Reversals are ambiguous, always turn counter-clockwise
        if is_close(angle.abs(), PI, EPSILON) {
            PI
        } else {
            angle
        }
    }

    fn build(
        start: Vector2,
        end: Vector2,
        center: Vector2,
        angle_rad: f64,
        start_tangent: Vector2,
        end_tangent: Vector2,
    ) -> Self {
        let (center, radius_m) = if start == end {
            (start, 0.0)
        } else {
            (center, Vector2::distance(&center, &start))
        };

        let direction = if angle_rad >= 0.0 {
            TurnDirection::Direct
        } else {
            TurnDirection::Indirect
        };

        Self {
            start,
            end,
            center,
            radius_m,
            angle_rad,
            direction,
            start_tangent,
            end_tangent,
            length_m: radius_m * angle_rad.abs(),
        }
    }
}
