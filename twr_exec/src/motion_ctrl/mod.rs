//! # Motion control module
//!
//! Executes the motions of a plan on the two wheels of the rover. Each motion
//! is divided into a whole number of equal steps, the length of a step being
//! set by the rover's speed and the control time step. Energy is checked and
//! drawn before every step so that a motion stops cleanly at the last step the
//! rover could afford.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;
mod calc_translation;
mod calc_rotation;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during MotionCtrl operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MotionCtrlError {
    #[error("Invalid motion control parameters: {0}")]
    InvalidParams(String),

    #[error("A {0} m long wheel motion is too short to fit a single step")]
    ZeroSteps(f64),

    #[error("Cannot step a wheel motion of {0} m")]
    InvalidDistance(f64),

    #[error(
        "Not enough energy for step {} of {}: {required} required, {available} available",
        .steps_completed + 1, .steps_total
    )]
    InsufficientEnergy {
        steps_completed: usize,
        steps_total: usize,
        required: f64,
        available: f64,
    },

    #[error("Motion cancelled after {steps_completed} steps")]
    Cancelled { steps_completed: usize },

    #[error("{side:?} wheel failed after {steps_completed} steps: {source}")]
    Wheel {
        steps_completed: usize,
        side: crate::drive::WheelSide,
        source: crate::drive::WheelError,
    },

    #[error("Energy error: {0}")]
    Energy(#[from] crate::energy::EnergyError),
}
