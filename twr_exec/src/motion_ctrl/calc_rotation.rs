//! Rotation calculations
//!
//! Turns on the spot run the wheels in opposite directions around the middle
//! of the axle. Curved turns run both wheels forwards on concentric arcs, the
//! outer wheel setting the pace.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::*;
use crate::{
    drive::Wheel,
    energy::EnergySource,
    geometry::TurnDirection,
    motion::Rotation,
};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<W: Wheel> MotionCtrl<W> {
    /// Divide a rotation into steps.
    pub fn plan_rotation(&self, rotation: &Rotation) -> Result<StepPlan, MotionCtrlError> {
        if rotation.is_on_the_spot() {
            self.plan_on_the_spot(rotation)
        } else {
            self.plan_curved(rotation)
        }
    }

    /// Drive along the rotation.
    pub fn run_rotation<E: EnergySource>(
        &mut self,
        rotation: &Rotation,
        energy: &mut E,
    ) -> Result<MotionReport, MotionCtrlError> {
        let plan = self.plan_rotation(rotation)?;
        self.execute(plan, energy)
    }

    fn plan_on_the_spot(&self, rotation: &Rotation) -> Result<StepPlan, MotionCtrlError> {
        // Each wheel runs on a circle of diameter the axle length, the right
        // wheel forwards for a counter-clockwise turn.
        let wheel_m = rotation.arc.angle_rad * self.params.wheel_axis_length_m / 2.0;

        let steps = self.num_steps(wheel_m)?;
        let step_m = wheel_m / steps as f64;

        Ok(StepPlan {
            steps,
            left_step_m: -step_m,
            right_step_m: step_m,
            energy_per_step: self.step_energy(step_m, step_m),
        })
    }

    fn plan_curved(&self, rotation: &Rotation) -> Result<StepPlan, MotionCtrlError> {
        let half_axis_m = self.params.wheel_axis_length_m / 2.0;
        let outer_radius_m = rotation.arc.radius_m + half_axis_m;
        let inner_radius_m = rotation.arc.radius_m - half_axis_m;

        let outer_m = outer_radius_m * rotation.arc.angle_rad.abs();

        let steps = self.num_steps(outer_m)?;
        let outer_step_m = outer_m / steps as f64;

        // Negative when the arc is tighter than half the axle, the inner
        // wheel then runs backwards.
        let inner_step_m = outer_step_m * inner_radius_m / outer_radius_m;

        let (left_step_m, right_step_m) = match rotation.arc.direction {
            TurnDirection::Direct => (inner_step_m, outer_step_m),
            TurnDirection::Indirect => (outer_step_m, inner_step_m),
        };

        Ok(StepPlan {
            steps,
            left_step_m,
            right_step_m,
            energy_per_step: self.step_energy(left_step_m, right_step_m),
        })
    }
}

#[cfg(test)]
mod test {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;

    use super::super::state::test::controller;
    use super::*;
    use crate::{
        energy::EnergyTank,
        geometry::{Arc, Vector2},
    };

    fn on_the_spot(end_tangent: (f64, f64)) -> Rotation {
        Rotation::new(
            Arc::from_endpoints_and_tangents(
                Vector2::new(0.0, 0.0),
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                end_tangent.into(),
            )
            .unwrap(),
        )
    }

    fn quarter_circle(radius_m: f64, left: bool) -> Rotation {
        let end = if left {
            Vector2::new(radius_m, radius_m)
        } else {
            Vector2::new(radius_m, -radius_m)
        };

        Rotation::new(
            Arc::from_endpoints_and_tangent(Vector2::new(0.0, 0.0), end, Vector2::new(1.0, 0.0))
                .unwrap(),
        )
    }

    #[test]
    fn test_on_the_spot_reversal() {
        let mut ctrl = controller(0.1, 0.1);
        let mut tank = EnergyTank::new(100.0);

        let report = ctrl.run_rotation(&on_the_spot((-1.0, 0.0)), &mut tank).unwrap();

        // Each wheel covers half the circumference of a circle of diameter 1
        assert_abs_diff_eq!(ctrl.right().total_m, FRAC_PI_2, epsilon = 1e-9);
        assert_abs_diff_eq!(ctrl.left().total_m, -FRAC_PI_2, epsilon = 1e-9);
        assert_abs_diff_eq!(report.energy_consumed, PI, epsilon = 1e-9);
        assert!(ctrl.left().runs.iter().all(|&r| r < 0.0));
    }

    #[test]
    fn test_on_the_spot_clockwise() {
        let ctrl = controller(1.0, 0.1);

        let plan = ctrl.plan_rotation(&on_the_spot((0.0, -1.0))).unwrap();

        assert!(plan.left_step_m > 0.0);
        assert!(plan.right_step_m < 0.0);
        assert_abs_diff_eq!(plan.left_step_m, -plan.right_step_m);
    }

    #[test]
    fn test_curved_left() {
        let mut ctrl = controller(1.0, 0.1);
        let mut tank = EnergyTank::new(100.0);

        let rotation = quarter_circle(2.0, true);
        assert_eq!(rotation.arc.direction, TurnDirection::Direct);

        let report = ctrl.run_rotation(&rotation, &mut tank).unwrap();

        // Outer (right) wheel on a 2.5 m radius, inner (left) on 1.5 m
        assert_abs_diff_eq!(report.right_distance_m, 2.5 * FRAC_PI_2, epsilon = 1e-9);
        assert_abs_diff_eq!(report.left_distance_m, 1.5 * FRAC_PI_2, epsilon = 1e-9);
        assert_abs_diff_eq!(
            report.left_distance_m / report.right_distance_m,
            1.5 / 2.5,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(report.energy_consumed, 4.0 * FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn test_curved_right() {
        let ctrl = controller(1.0, 0.1);

        let rotation = quarter_circle(2.0, false);
        assert_eq!(rotation.arc.direction, TurnDirection::Indirect);

        let plan = ctrl.plan_rotation(&rotation).unwrap();
        assert_abs_diff_eq!(plan.right_step_m / plan.left_step_m, 1.5 / 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_tight_curve_reverses_inner_wheel() {
        let ctrl = controller(1.0, 0.1);

        let plan = ctrl.plan_rotation(&quarter_circle(0.25, true)).unwrap();

        assert!(plan.left_step_m < 0.0);
        assert!(plan.right_step_m > 0.0);
        assert_abs_diff_eq!(plan.left_step_m / plan.right_step_m, -1.0 / 3.0, epsilon = 1e-9);
    }
}
