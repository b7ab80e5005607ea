//! Navigator - converts raw waypoints into a plan

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;

use super::{Arranger, NavError, Params};
use crate::geometry::Vector2;
use crate::motion::{Motion, Translation};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Builds plans of motions from waypoints.
///
/// The navigator holds no state between calls, so the same waypoints always
/// give the same plan.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    arranger: Arranger,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Navigator {
    pub fn new(params: Params) -> Self {
        Self {
            arranger: Arranger::new(params),
        }
    }

    /// Convert raw `(x, y)` pairs into points.
    pub fn to_points(raw: &[(f64, f64)]) -> Vec<Vector2> {
        raw.iter().map(|&p| p.into()).collect()
    }

    /// Build one translation per pair of consecutive points.
    ///
    /// At least two points are needed, all of them finite, and two
    /// consecutive points must not be the same.
    pub fn to_translations(points: &[Vector2]) -> Result<Vec<Translation>, NavError> {
        if points.len() < 2 {
            return Err(NavError::InsufficientWaypoints(points.len()));
        }

        if let Some(i) = points.iter().position(|p| !(p.x().is_finite() && p.y().is_finite())) {
            return Err(NavError::NonFiniteWaypoint(i));
        }

        let mut translations = Vec::with_capacity(points.len() - 1);
        for pair in points.windows(2) {
            translations.push(Translation::new(pair[0], pair[1])?);
        }

        Ok(translations)
    }

    /// Join the translations with the rotations needed to follow them.
    pub fn arrange_translations(
        &self,
        translations: &[Translation],
    ) -> Result<Vec<Motion>, NavError> {
        self.arranger.arrange(translations)
    }

    /// Compute the full plan from the raw waypoints.
    pub fn compute_motions(&self, raw: &[(f64, f64)]) -> Result<Vec<Motion>, NavError> {
        let points = Self::to_points(raw);
        let translations = Self::to_translations(&points)?;
        let motions = self.arrange_translations(&translations)?;

        info!(
            "Computed plan of {} motions through {} waypoints, {:.3} m long",
            motions.len(),
            points.len(),
            Self::total_length(&motions)
        );

        Ok(motions)
    }

    /// Distance travelled by the rover's center over the whole plan.
    ///
    /// Units: meters
    pub fn total_length(motions: &[Motion]) -> f64 {
        motions.iter().map(Motion::length_m).sum()
    }
}
