//! # Geometry module
//!
//! Exact 2D geometry used both to author a plan (tangency, collinearity, line
//! intersection) and to derive the execution parameters of its rotations.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod arc;
mod line;
mod vector;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use arc::*;
pub use line::*;
pub use vector::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Absolute tolerance used for all geometric comparisons (equality,
/// orthogonality, parallelism).
pub const EPSILON: f64 = 1e-9;

/// Maximum difference allowed between the two radii of an arc built from two
/// tangents.
pub const ARC_RADIUS_TOLERANCE: f64 = 1e-6;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during geometric constructions.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Cannot normalise a vector by a zero length")]
    DegenerateVector,

    #[error("The lines are parallel, there is no unique intersection")]
    ParallelLines,

    #[error(
        "The tangents do not describe a circular arc: the center is {start_radius} from the \
        start but {end_radius} from the end"
    )]
    ArcConsistency { start_radius: f64, end_radius: f64 },

    #[error("The tangent points away from the end of the arc, no circle joins the two points")]
    TangentAwayFromEnd,
}
