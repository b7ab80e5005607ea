//! Implementations for the MotionCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace, warn};
use serde::Serialize;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

// Internal
use super::{MotionCtrlError, Params};
use crate::{
    drive::{Wheel, WheelError, WheelSide},
    energy::EnergySource,
    motion::Motion,
};
use util::{
    archive::{Archived, Archiver},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Motion control module state
pub struct MotionCtrl<W: Wheel> {
    pub(crate) params: Params,

    left: W,
    right: W,

    /// Raised from outside to interrupt the current motion between two steps.
    stop: Arc<AtomicBool>,

    /// Number of motions executed so far.
    num_motions: usize,

    last_step: Option<StepRecord>,
    arch_steps: Option<Archiver>,
}

/// The discretisation of a motion into equal steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepPlan {
    pub steps: usize,

    /// Units: meters
    pub left_step_m: f64,

    /// Units: meters
    pub right_step_m: f64,

    /// Energy drawn by a single step.
    pub energy_per_step: f64,
}

/// Outcome of a completed motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MotionReport {
    pub steps: usize,

    /// Units: meters
    pub left_distance_m: f64,

    /// Units: meters
    pub right_distance_m: f64,

    pub energy_consumed: f64,
}

/// Archived record of a single executed step.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StepRecord {
    /// Units: seconds since the start of the session
    pub time_s: f64,

    /// Index of the motion among all those executed by this controller
    pub motion: usize,

    pub step: usize,
    pub steps_total: usize,

    /// Units: meters
    pub left_m: f64,

    /// Units: meters
    pub right_m: f64,

    pub energy: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StepPlan {
    /// Total energy drawn by the whole motion.
    pub fn total_energy(&self) -> f64 {
        self.energy_per_step * self.steps as f64
    }
}

impl<W: Wheel> MotionCtrl<W> {
    /// Create a new controller driving the given wheels.
    pub fn new(params: Params, left: W, right: W) -> Result<Self, MotionCtrlError> {
        params.validate()?;

        Ok(Self {
            params,
            left,
            right,
            stop: Arc::new(AtomicBool::new(false)),
            num_motions: 0,
            last_step: None,
            arch_steps: None,
        })
    }

    /// Initialise archiving of every executed step into the session.
    pub fn init(&mut self, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
        self.arch_steps = Some(Archiver::from_path(session, "motion_ctrl/steps.csv")?);

        Ok(())
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn left(&self) -> &W {
        &self.left
    }

    pub fn right(&self) -> &W {
        &self.right
    }

    /// A handle on the stop flag, raise it to cancel the current motion.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    /// Lower the stop flag.
    pub fn clear_stop(&self) {
        self.stop.store(false, Ordering::SeqCst);
    }

    /// Compute how the motion would be divided into steps.
    pub fn plan_motion(&self, motion: &Motion) -> Result<StepPlan, MotionCtrlError> {
        match motion {
            Motion::Translation(t) => self.plan_translation(t),
            Motion::Rotation(r) => self.plan_rotation(r),
        }
    }

    /// Energy the motion will draw from the energy source.
    pub fn required_energy(&self, motion: &Motion) -> Result<f64, MotionCtrlError> {
        Ok(self.plan_motion(motion)?.total_energy())
    }

    /// Energy the whole plan will draw from the energy source.
    pub fn required_energy_for(&self, motions: &[Motion]) -> Result<f64, MotionCtrlError> {
        motions.iter().map(|m| self.required_energy(m)).sum()
    }

    /// Execute a single motion.
    pub fn run_motion<E: EnergySource>(
        &mut self,
        motion: &Motion,
        energy: &mut E,
    ) -> Result<MotionReport, MotionCtrlError> {
        match motion {
            Motion::Translation(t) => self.run_translation(t, energy),
            Motion::Rotation(r) => self.run_rotation(r, energy),
        }
    }

    /// Drive the wheels through every step of the plan.
    ///
    /// Energy is checked before each step. If the source cannot afford a step
    /// the motion stops there, leaving the wheels at the last completed step.
    /// A step's energy is drawn after both wheels ran it. If the right wheel
    /// fails the left one has already run the step.
    pub(crate) fn execute<E: EnergySource>(
        &mut self,
        plan: StepPlan,
        energy: &mut E,
    ) -> Result<MotionReport, MotionCtrlError> {
        let motion = self.num_motions;
        self.num_motions += 1;

        debug!(
            "Motion {}: {} steps, left {:.6} m, right {:.6} m, {:.6} energy per step",
            motion, plan.steps, plan.left_step_m, plan.right_step_m, plan.energy_per_step
        );

        let mut report = MotionReport::default();

        for step in 0..plan.steps {
            if self.stop.load(Ordering::SeqCst) {
                warn!("Motion {} cancelled after {} of {} steps", motion, step, plan.steps);
                return Err(MotionCtrlError::Cancelled {
                    steps_completed: step,
                });
            }

            if !energy.has_enough(plan.energy_per_step) {
                warn!(
                    "Motion {} aborted after {} of {} steps, energy exhausted",
                    motion, step, plan.steps
                );
                return Err(MotionCtrlError::InsufficientEnergy {
                    steps_completed: step,
                    steps_total: plan.steps,
                    required: plan.energy_per_step,
                    available: energy.quantity(),
                });
            }

            // Energy is only drawn once both wheels have moved
            if let Err(source) = self.left.run(plan.left_step_m) {
                return Err(wheel_fault(motion, step, WheelSide::Left, source));
            }
            if let Err(source) = self.right.run(plan.right_step_m) {
                return Err(wheel_fault(motion, step, WheelSide::Right, source));
            }
            energy.consume(plan.energy_per_step)?;

            report.steps += 1;
            report.left_distance_m += plan.left_step_m;
            report.right_distance_m += plan.right_step_m;
            report.energy_consumed += plan.energy_per_step;

            trace!(
                "Step {}/{}: left {:.6} m, right {:.6} m, {:.6} energy left",
                step + 1,
                plan.steps,
                report.left_distance_m,
                report.right_distance_m,
                energy.quantity()
            );

            self.last_step = Some(StepRecord {
                time_s: session::get_elapsed_seconds(),
                motion,
                step,
                steps_total: plan.steps,
                left_m: plan.left_step_m,
                right_m: plan.right_step_m,
                energy: plan.energy_per_step,
            });

            if let Err(e) = self.write() {
                warn!("Could not archive motion control step: {}", e);
            }
        }

        Ok(report)
    }

    /// Number of steps needed for a wheel to cover `distance_m` at the
    /// configured speed.
    pub(crate) fn num_steps(&self, distance_m: f64) -> Result<usize, MotionCtrlError> {
        if !distance_m.is_finite() {
            return Err(MotionCtrlError::InvalidDistance(distance_m));
        }

        let steps = ((distance_m.abs() / self.params.speed_ms) / self.params.time_step_s).floor();

        if steps < 1.0 {
            return Err(MotionCtrlError::ZeroSteps(distance_m));
        }

        Ok(steps as usize)
    }

    /// Energy drawn when the wheels run the given distances.
    pub(crate) fn step_energy(&self, left_m: f64, right_m: f64) -> f64 {
        (left_m.abs() + right_m.abs()) * self.params.consumption_per_length_unit
    }
}

fn wheel_fault(motion: usize, step: usize, side: WheelSide, source: WheelError) -> MotionCtrlError {
    warn!("Motion {} aborted at step {}, {:?} wheel fault: {}", motion, step + 1, side, source);

    MotionCtrlError::Wheel {
        steps_completed: step,
        side,
        source,
    }
}

impl<W: Wheel> Archived for MotionCtrl<W> {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let (Some(arch), Some(record)) = (self.arch_steps.as_mut(), self.last_step) {
            arch.serialise(record)?;
        }

        Ok(())
    }
}
