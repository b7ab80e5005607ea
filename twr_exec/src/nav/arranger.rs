//! Arranger - joins translations with rotations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, trace};

use super::{NavError, Params};
use crate::geometry::{Arc, GeometryError, Vector2, EPSILON};
use crate::motion::{Motion, Rotation, Translation};
use util::raise_error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Inserts rotations between consecutive translations whose directions differ.
///
/// Corners are rounded with a tangent-continuous arc (a fillet): both
/// translations are shortened so that the rover leaves the first one and
/// joins the second one without a change of heading. Full reversals cannot be
/// rounded and are executed as a turn on the spot.
#[derive(Debug, Clone, Default)]
pub struct Arranger {
    params: Params,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Arranger {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Build the motions executing the given continuous sequence of
    /// translations.
    ///
    /// The output keeps the order of the translations, with rotations
    /// interleaved. Translations entirely consumed by the arcs of their
    /// corners are dropped.
    pub fn arrange(&self, translations: &[Translation]) -> Result<Vec<Motion>, NavError> {
        let mut motions = Vec::with_capacity(2 * translations.len());

        let mut iter = translations.iter().enumerate();

        // The previous translation, possibly already shortened at its start
        let mut previous = match iter.next() {
            Some((_, t)) => *t,
            None => return Ok(motions),
        };

        for (i, current) in iter {
            if previous.end != current.start {
                return Err(NavError::DiscontinuousPath(i));
            }

            let mut next = *current;
            let deflection_rad = deflection(&previous, current);
            let trim_m = self.trim_length(&previous, current, deflection_rad);

            if deflection_rad < self.params.min_deflection_rad {
                // Straight on, nothing to insert
                push_translation(&mut motions, previous);
            } else if previous.is_parallel_with(current)
                || self.params.corner_radius_m <= 0.0
                || trim_m <= EPSILON
            {
                push_translation(&mut motions, previous);
                motions.push(on_the_spot(&previous, current)?.into());
            } else {
                let join = previous.end;
                let arc_start = join - previous.direction * trim_m;
                let arc_end = join + current.direction * trim_m;

                let arc = Arc::from_endpoints_and_tangent(arc_start, arc_end, previous.direction)?;

                trace!(
                    "Corner {} at {}: radius {:.3} m, angle {:.3} rad",
                    i,
                    join,
                    arc.radius_m,
                    arc.angle_rad
                );

                push_translation(&mut motions, shortened(previous.start, arc_start, &previous));
                motions.push(Rotation::new(arc).into());

                next = shortened(arc_end, current.end, current);
            }

            previous = next;
        }

        push_translation(&mut motions, previous);

        debug!(
            "Arranged {} translations into {} motions",
            translations.len(),
            motions.len()
        );

        Ok(motions)
    }

    /// Distance to cut from both translations at their corner so that an arc
    /// of the configured radius fits.
    ///
    /// The cut never exceeds what is left of `previous`, nor half of
    /// `current` so that the next corner still has room. What remains of
    /// `previous` is either nothing or at least `min_translation_length_m`.
    fn trim_length(&self, previous: &Translation, current: &Translation, deflection_rad: f64) -> f64 {
        let remaining_m = previous.length_m;
        let max_m = 0.5 * current.length_m;
        let min_length_m = self.params.min_translation_length_m;

        let mut trim_m = (self.params.corner_radius_m * (deflection_rad / 2.0).tan())
            .min(remaining_m)
            .min(max_m);

        let leftover_m = remaining_m - trim_m;
        if leftover_m > EPSILON && leftover_m < min_length_m {
            if remaining_m <= max_m {
                trim_m = remaining_m;
            } else {
                trim_m = remaining_m - min_length_m;
            }
        }

        trim_m.max(0.0)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Unsigned change of heading between two translations.
///
/// Units: radians, in `[0, pi]`
fn deflection(previous: &Translation, current: &Translation) -> f64 {
    previous
        .direction
        .vectorial_product(&current.direction)
        .atan2(previous.direction.scalar_product(&current.direction))
        .abs()
}

/// Build the on the spot rotation at the join between two translations.
fn on_the_spot(previous: &Translation, current: &Translation) -> Result<Rotation, NavError> {
    let join = previous.end;

    match Arc::from_endpoints_and_tangents(join, join, previous.direction, current.direction) {
        Ok(arc) => Ok(Rotation::new(arc)),
        Err(e @ GeometryError::ArcConsistency { .. }) => {
            raise_error!("Inconsistent on the spot rotation at {}: {}", join, e)
        }
        Err(e) => Err(e.into()),
    }
}

/// Copy of `translation` running from `start` to `end`, keeping its direction.
fn shortened(start: Vector2, end: Vector2, translation: &Translation) -> Translation {
    Translation {
        start,
        end,
        length_m: Vector2::distance(&start, &end),
        direction: translation.direction,
    }
}

fn push_translation(motions: &mut Vec<Motion>, translation: Translation) {
    if translation.length_m > EPSILON {
        motions.push(translation.into());
    }
}
