//! # Navigation module
//!
//! Converts the waypoints given by the ground into a plan of motions the rover
//! can execute: one translation per pair of waypoints, joined by rotations
//! wherever the heading changes.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod arranger;
mod navigator;
mod params;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use arranger::*;
pub use navigator::*;
pub use params::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while building a plan.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavError {
    #[error("At least 2 waypoints are required to build a plan, found {0}")]
    InsufficientWaypoints(usize),

    #[error("Waypoint {0} is not a finite position")]
    NonFiniteWaypoint(usize),

    #[error("Translation {0} does not start where the previous one ends")]
    DiscontinuousPath(usize),

    #[error("Geometry error: {0}")]
    Geometry(#[from] crate::geometry::GeometryError),
}
