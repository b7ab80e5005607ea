//! Parameters structure for navigation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for navigation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Radius of the arcs used to round the corners of the path.
    ///
    /// The radius is reduced on corners whose segments are too short to fit
    /// it. A zero radius turns on the spot at every corner.
    ///
    /// Units: meters
    pub corner_radius_m: f64,

    /// Shortest translation kept in a plan once the corners are rounded.
    ///
    /// A translation whose rounded corners would leave less than this is
    /// absorbed into the arc of its end corner. Should not be less than the
    /// distance covered in one motion control step.
    ///
    /// Units: meters
    pub min_translation_length_m: f64,

    /// Smallest change of heading that gets a rotation, gentler corners are
    /// driven straight through.
    ///
    /// Units: radians
    pub min_deflection_rad: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            corner_radius_m: 1.0,
            min_translation_length_m: 0.05,
            min_deflection_rad: 0.01,
        }
    }
}
