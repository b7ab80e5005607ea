//! # Two-wheel rover executable parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwrExecParams {
    /// Energy available in the rover's tank at startup
    pub initial_energy: f64,

    /// Name of the file the loaded plans are saved to, relative to the
    /// session directory
    pub plan_file_name: String,
}

impl Default for TwrExecParams {
    fn default() -> Self {
        Self {
            initial_energy: 1000.0,
            plan_file_name: String::from("plan.json"),
        }
    }
}
