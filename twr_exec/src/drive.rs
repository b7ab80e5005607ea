//! # Wheel drive interface
//!
//! The motion controller only ever asks a wheel to travel a signed distance.
//! Positive distances drive the rover forwards.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use serde::Serialize;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A driven wheel of the rover.
pub trait Wheel {
    /// Drive the wheel over the given distance, negative values driving it
    /// backwards.
    ///
    /// Units: meters
    fn run(&mut self, distance_m: f64) -> Result<(), WheelError>;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A simulated wheel which keeps track of every distance it was driven over.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OdometerWheel {
    /// Every distance demanded, in order.
    ///
    /// Units: meters
    pub runs: Vec<f64>,

    /// Signed sum of all runs.
    ///
    /// Units: meters
    pub total_m: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The two wheels of the rover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WheelSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WheelError {
    #[error("Wheel demand is not a finite distance: {0}")]
    InvalidDemand(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl OdometerWheel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all previous runs.
    pub fn reset(&mut self) {
        self.runs.clear();
        self.total_m = 0.0;
    }
}

impl Wheel for OdometerWheel {
    fn run(&mut self, distance_m: f64) -> Result<(), WheelError> {
        if !distance_m.is_finite() {
            return Err(WheelError::InvalidDemand(distance_m));
        }

        trace!("Wheel run {:.6} m", distance_m);

        self.runs.push(distance_m);
        self.total_m += distance_m;

        Ok(())
    }
}
