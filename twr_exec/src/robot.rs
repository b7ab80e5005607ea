//! # Robot module
//!
//! The robot owns everything needed to turn waypoints into wheel motions: the
//! navigator building plans, the motion controller executing them, and the
//! energy source paying for them.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};
use serde::Serialize;

// Internal
use crate::{
    drive::Wheel,
    energy::EnergySource,
    motion::Motion,
    motion_ctrl::{MotionCtrl, MotionCtrlError, MotionReport},
    nav::{NavError, Navigator},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A two-wheeled rover.
pub struct Robot<W: Wheel, E: EnergySource> {
    pub(crate) status: Status,

    navigator: Navigator,
    motion_ctrl: MotionCtrl<W>,
    energy: E,

    /// The plan waiting for execution.
    plan: Option<Vec<Motion>>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The activity of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    /// No plan loaded
    Idle,
    /// A plan is loaded and can be executed
    Loaded,
    /// A plan is being executed
    Moving,
}

/// Possible errors reported by the robot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RobotError {
    #[error("Could not compute the plan: {0}")]
    Nav(#[from] NavError),

    #[error("Could not execute the plan: {0}")]
    MotionCtrl(#[from] MotionCtrlError),

    #[error("The plan requires {required} energy units but only {available} are available")]
    InsufficientEnergy { required: f64, available: f64 },

    #[error(
        "Plan aborted at motion {motion_index} after {} completed motions: {source}",
        .completed.len()
    )]
    Aborted {
        motion_index: usize,

        /// Reports of the motions executed before the failure
        completed: Vec<MotionReport>,

        /// The failed motion, partially executed, and those after it
        remaining: Vec<Motion>,

        source: MotionCtrlError,
    },

    #[error("No plan has been loaded")]
    NoPlanLoaded,

    #[error("The robot is already moving")]
    AlreadyMoving,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<W: Wheel, E: EnergySource> Robot<W, E> {
    pub fn new(navigator: Navigator, motion_ctrl: MotionCtrl<W>, energy: E) -> Self {
        Self {
            status: Status::Idle,
            navigator,
            motion_ctrl,
            energy,
            plan: None,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_moving(&self) -> bool {
        self.status == Status::Moving
    }

    /// The loaded plan, if any.
    pub fn plan(&self) -> Option<&[Motion]> {
        self.plan.as_deref()
    }

    pub fn energy(&self) -> &E {
        &self.energy
    }

    pub fn motion_ctrl(&self) -> &MotionCtrl<W> {
        &self.motion_ctrl
    }

    /// Compute and store the plan through the given waypoints.
    ///
    /// The plan is only accepted if the energy source can pay for all of it.
    /// Any previously loaded plan is replaced.
    pub fn load_positions(&mut self, positions: &[(f64, f64)]) -> Result<&[Motion], RobotError> {
        if self.is_moving() {
            return Err(RobotError::AlreadyMoving);
        }

        let plan = self.navigator.compute_motions(positions)?;

        self.load_plan(plan)
    }

    /// Store an already computed plan, for instance the remainder of an
    /// aborted one.
    ///
    /// The same energy check as `load_positions` applies.
    pub fn load_plan(&mut self, plan: Vec<Motion>) -> Result<&[Motion], RobotError> {
        if self.is_moving() {
            return Err(RobotError::AlreadyMoving);
        }

        let required = self.motion_ctrl.required_energy_for(&plan)?;
        if !self.energy.has_enough(required) {
            warn!(
                "Plan rejected: requires {:.3} energy units, {:.3} available",
                required,
                self.energy.quantity()
            );
            return Err(RobotError::InsufficientEnergy {
                required,
                available: self.energy.quantity(),
            });
        }

        info!(
            "Plan of {} motions loaded, {:.3} energy units required",
            plan.len(),
            required
        );

        self.status = Status::Loaded;

        Ok(self.plan.insert(plan).as_slice())
    }

    /// Execute the loaded plan, one motion after the other.
    ///
    /// The plan is consumed whatever the outcome and the robot goes back to
    /// idle once it stops. If a motion fails the error holds the reports of
    /// the motions completed before it and the motions not yet completed,
    /// starting with the failed one.
    pub fn run(&mut self) -> Result<Vec<MotionReport>, RobotError> {
        if self.is_moving() {
            return Err(RobotError::AlreadyMoving);
        }

        let plan = self.plan.take().ok_or(RobotError::NoPlanLoaded)?;

        self.status = Status::Moving;
        self.motion_ctrl.clear_stop();

        info!("Executing plan of {} motions", plan.len());

        let result = self.execute_plan(plan);

        self.status = Status::Idle;

        match &result {
            Ok(_) => info!(
                "Plan executed, {:.3} energy units left",
                self.energy.quantity()
            ),
            Err(e) => warn!("Plan execution stopped: {}", e),
        }

        result
    }

    fn execute_plan(&mut self, mut plan: Vec<Motion>) -> Result<Vec<MotionReport>, RobotError> {
        let mut reports = Vec::with_capacity(plan.len());

        for motion_index in 0..plan.len() {
            match self.motion_ctrl.run_motion(&plan[motion_index], &mut self.energy) {
                Ok(r) => reports.push(r),
                Err(source) => {
                    return Err(RobotError::Aborted {
                        motion_index,
                        completed: reports,
                        remaining: plan.split_off(motion_index),
                        source,
                    })
                }
            }
        }

        Ok(reports)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        drive::{OdometerWheel, WheelError},
        energy::EnergyTank,
        motion_ctrl::Params as MotionCtrlParams,
        nav::Params as NavParams,
    };

    pub(crate) fn robot(quantity: f64) -> Robot<OdometerWheel, EnergyTank> {
        let motion_ctrl = MotionCtrl::new(
            MotionCtrlParams {
                speed_ms: 1.0,
                time_step_s: 0.1,
                ..MotionCtrlParams::default()
            },
            OdometerWheel::new(),
            OdometerWheel::new(),
        )
        .unwrap();

        Robot::new(
            Navigator::new(NavParams::default()),
            motion_ctrl,
            EnergyTank::new(quantity),
        )
    }

    fn default_robot(quantity: f64) -> Robot<OdometerWheel, EnergyTank> {
        Robot::new(
            Navigator::default(),
            MotionCtrl::new(
                MotionCtrlParams::default(),
                OdometerWheel::new(),
                OdometerWheel::new(),
            )
            .unwrap(),
            EnergyTank::new(quantity),
        )
    }

    /// A wheel failing on its n-th run only.
    pub(crate) struct FailingWheel {
        runs: usize,
        fail_on: usize,
    }

    impl FailingWheel {
        pub(crate) fn new(fail_on: usize) -> Self {
            Self { runs: 0, fail_on }
        }
    }

    impl Wheel for FailingWheel {
        fn run(&mut self, distance_m: f64) -> Result<(), WheelError> {
            self.runs += 1;
            if self.runs == self.fail_on {
                return Err(WheelError::InvalidDemand(distance_m));
            }
            Ok(())
        }
    }

    /// Robot whose left wheel fails on its `fail_on`-th run.
    pub(crate) fn failing_robot(fail_on: usize) -> Robot<FailingWheel, EnergyTank> {
        let motion_ctrl = MotionCtrl::new(
            MotionCtrlParams {
                speed_ms: 1.0,
                time_step_s: 0.1,
                ..MotionCtrlParams::default()
            },
            FailingWheel::new(fail_on),
            FailingWheel::new(0),
        )
        .unwrap();

        Robot::new(Navigator::default(), motion_ctrl, EnergyTank::new(100.0))
    }

    #[test]
    fn test_not_moving_by_default() {
        let robot = robot(100.0);

        assert!(!robot.is_moving());
        assert_eq!(robot.status(), Status::Idle);
        assert!(robot.plan().is_none());
    }

    #[test]
    fn test_is_moving() {
        let mut robot = robot(100.0);
        robot.status = Status::Moving;

        assert!(robot.is_moving());
        assert_eq!(
            robot.load_positions(&[(0.0, 0.0), (1.0, 0.0)]),
            Err(RobotError::AlreadyMoving)
        );
    }

    #[test]
    fn test_load_and_run() {
        let mut robot = robot(100.0);

        let num_motions = robot
            .load_positions(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])
            .unwrap()
            .len();
        assert_eq!(num_motions, 3);
        assert_eq!(robot.status(), Status::Loaded);

        let required = robot.motion_ctrl().required_energy_for(robot.plan().unwrap()).unwrap();

        let reports = robot.run().unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(robot.status(), Status::Idle);
        assert!(robot.plan().is_none());

        let consumed: f64 = reports.iter().map(|r| r.energy_consumed).sum();
        assert_abs_diff_eq!(consumed, required, epsilon = 1e-9);
        assert_abs_diff_eq!(robot.energy().quantity(), 100.0 - required, epsilon = 1e-9);

        // Both wheels travel the straights, the curve splits them
        let left = robot.motion_ctrl().left().total_m;
        let right = robot.motion_ctrl().right().total_m;
        assert!(right > left);
    }

    #[test]
    fn test_run_without_plan() {
        let mut robot = robot(100.0);

        assert_eq!(robot.run(), Err(RobotError::NoPlanLoaded));
    }

    #[test]
    fn test_plan_too_expensive() {
        let mut robot = robot(10.0);

        // 20 m of straight line costs 40 energy units
        match robot.load_positions(&[(0.0, 0.0), (20.0, 0.0)]) {
            Err(RobotError::InsufficientEnergy {
                required,
                available,
            }) => {
                assert_abs_diff_eq!(required, 40.0, epsilon = 1e-9);
                assert_eq!(available, 10.0);
            }
            r => panic!("Unexpected result: {:?}", r),
        }
        assert_eq!(robot.status(), Status::Idle);
        assert!(robot.plan().is_none());
    }

    #[test]
    fn test_invalid_waypoints() {
        let mut robot = robot(100.0);

        assert_eq!(
            robot.load_positions(&[(0.0, 0.0)]),
            Err(RobotError::Nav(NavError::InsufficientWaypoints(1)))
        );
    }

    #[test]
    fn test_cancelled_run_returns_to_idle() {
        let mut robot = robot(100.0);
        robot.load_positions(&[(0.0, 0.0), (5.0, 0.0)]).unwrap();

        // The flag is cleared when a run starts, so raising it beforehand has
        // no effect
        robot.motion_ctrl().stop_flag().store(true, std::sync::atomic::Ordering::SeqCst);
        assert!(robot.run().is_ok());
        assert_eq!(robot.status(), Status::Idle);
    }

    #[test]
    fn test_narrow_rectangle() {
        let mut robot = default_robot(1000.0);

        let plan = robot
            .load_positions(&[(0.0, 0.0), (10.0, 0.0), (10.0, 2.005), (0.0, 2.005)])
            .unwrap();
        assert_eq!(plan.len(), 4);

        assert_eq!(robot.run().unwrap().len(), 4);
    }

    #[test]
    fn test_gentle_bend() {
        let mut robot = default_robot(1000.0);

        let plan = robot
            .load_positions(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.01)])
            .unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|m| !m.is_rotation()));
    }

    #[test]
    fn test_aborted_run_keeps_progress() {
        // Fails in the middle of the corner
        let mut robot = failing_robot(200);

        let plan = robot
            .load_positions(&[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0)])
            .unwrap()
            .to_vec();
        assert_eq!(plan.len(), 3);

        let remaining = match robot.run() {
            Err(RobotError::Aborted {
                motion_index,
                completed,
                remaining,
                source,
            }) => {
                assert_eq!(motion_index, 1);
                assert_eq!(completed.len(), 1);
                assert_abs_diff_eq!(completed[0].left_distance_m, 19.0, epsilon = 1e-9);
                assert_eq!(remaining, plan[1..].to_vec());
                assert!(matches!(source, MotionCtrlError::Wheel { .. }));
                remaining
            }
            r => panic!("Unexpected result: {:?}", r),
        };
        assert_eq!(robot.status(), Status::Idle);

        // The remainder can be loaded again
        robot.load_plan(remaining).unwrap();
        assert_eq!(robot.run().unwrap().len(), 2);
    }
}
