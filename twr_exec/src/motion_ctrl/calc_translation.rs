//! Translation calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::*;
use crate::{drive::Wheel, energy::EnergySource, motion::Translation};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<W: Wheel> MotionCtrl<W> {
    /// Divide a translation into steps, both wheels running the same distance.
    pub fn plan_translation(&self, translation: &Translation) -> Result<StepPlan, MotionCtrlError> {
        let steps = self.num_steps(translation.length_m)?;
        let step_m = translation.length_m / steps as f64;

        Ok(StepPlan {
            steps,
            left_step_m: step_m,
            right_step_m: step_m,
            energy_per_step: self.step_energy(step_m, step_m),
        })
    }

    /// Drive straight along the translation.
    pub fn run_translation<E: EnergySource>(
        &mut self,
        translation: &Translation,
        energy: &mut E,
    ) -> Result<MotionReport, MotionCtrlError> {
        let plan = self.plan_translation(translation)?;
        self.execute(plan, energy)
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::super::state::test::controller;
    use super::*;
    use crate::{energy::EnergyTank, geometry::Vector2};

    #[test]
    fn test_plan_translation() {
        let ctrl = controller(0.5, 1.0);
        let t = Translation::new(Vector2::new(1.0, 1.0), Vector2::new(4.0, 5.0)).unwrap();

        let plan = ctrl.plan_translation(&t).unwrap();

        assert_eq!(plan.steps, 10);
        assert_abs_diff_eq!(plan.left_step_m, 0.5);
        assert_abs_diff_eq!(plan.right_step_m, 0.5);
        assert_abs_diff_eq!(plan.energy_per_step, 1.0);
        assert_abs_diff_eq!(plan.total_energy(), 10.0);
    }

    #[test]
    fn test_uneven_division() {
        let mut ctrl = controller(1.0, 1.0);
        let mut tank = EnergyTank::new(100.0);
        let t = Translation::new(Vector2::new(0.0, 0.0), Vector2::new(0.0, 2.5)).unwrap();

        // 2.5 m at 1 m per step only fits 2 whole steps, each is stretched
        let report = ctrl.run_translation(&t, &mut tank).unwrap();

        assert_eq!(report.steps, 2);
        assert_eq!(ctrl.left().runs, vec![1.25, 1.25]);
        assert_abs_diff_eq!(report.left_distance_m, 2.5);
        assert_abs_diff_eq!(report.energy_consumed, 5.0);
    }
}
