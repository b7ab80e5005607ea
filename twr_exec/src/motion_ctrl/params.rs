//! Parameters structure for MotionCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::MotionCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for motion control.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {

    // ---- CONTROL ----

    /// Speed of the fastest wheel during a motion.
    ///
    /// Units: meters/second
    pub speed_ms: f64,

    /// Duration of a single control step.
    ///
    /// Units: seconds
    pub time_step_s: f64,

    // ---- CAPABILITIES ----

    /// Energy drawn per meter travelled by each wheel.
    ///
    /// Units: energy units/meter
    pub consumption_per_length_unit: f64,

    // ---- GEOMETRY ----

    /// Distance between the two wheels.
    ///
    /// Units: meters
    pub wheel_axis_length_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Check that the parameters describe a usable controller.
    pub fn validate(&self) -> Result<(), MotionCtrlError> {
        let positive = [
            ("speed_ms", self.speed_ms),
            ("time_step_s", self.time_step_s),
            ("wheel_axis_length_m", self.wheel_axis_length_m),
        ];

        for (name, value) in positive.iter() {
            if !(value.is_finite() && *value > 0.0) {
                return Err(MotionCtrlError::InvalidParams(format!(
                    "{} must be strictly positive, found {}",
                    name, value
                )));
            }
        }

        if !(self.consumption_per_length_unit.is_finite()
            && self.consumption_per_length_unit >= 0.0)
        {
            return Err(MotionCtrlError::InvalidParams(format!(
                "consumption_per_length_unit must be positive, found {}",
                self.consumption_per_length_unit
            )));
        }

        Ok(())
    }

    /// Distance covered by the fastest wheel in a single step.
    ///
    /// Units: meters
    pub fn step_length_m(&self) -> f64 {
        self.speed_ms * self.time_step_s
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            speed_ms: 0.1,
            time_step_s: 0.1,
            consumption_per_length_unit: 1.0,
            wheel_axis_length_m: 1.0,
        }
    }
}
