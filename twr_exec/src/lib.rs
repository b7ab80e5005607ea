//! # Two-wheel rover library.
//!
//! Path planning and differential drive kinematics for a two-wheeled rover.
//! Waypoints are turned into a plan of translations and rotations by the
//! navigator, which the motion controller then executes step by step against
//! the rover's wheels and energy source.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// 2D geometry - vectors, lines and circular arcs
pub mod geometry;

/// Motion primitives - translations and rotations
pub mod motion;

/// Navigation - converts waypoints into a plan of motions
pub mod nav;

/// Motion control - executes motions on the wheels in discrete steps
pub mod motion_ctrl;

/// Wheel actuation interface
pub mod drive;

/// Energy source interface
pub mod energy;

/// The rover aggregate - owns the plan and the equipment
pub mod robot;

/// Transmitter - dispatches telecommands to the rover
pub mod transmitter;

/// Executable parameters
pub mod params;
