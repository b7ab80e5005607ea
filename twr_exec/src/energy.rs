//! # Energy source interface

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Amount by which a demand may exceed the available quantity and still be
/// accepted. Absorbs the rounding of per-step consumption.
pub const ENERGY_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Something the rover draws its energy from.
pub trait EnergySource {
    /// The quantity still available.
    fn quantity(&self) -> f64;

    /// Return true if `amount` can be consumed.
    fn has_enough(&self, amount: f64) -> bool;

    /// Draw `amount` from the source.
    fn consume(&mut self, amount: f64) -> Result<(), EnergyError>;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A finite tank of energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyTank {
    quantity: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum EnergyError {
    #[error("Cannot consume {requested} energy units, only {available} available")]
    Overdraw { requested: f64, available: f64 },

    #[error("Cannot consume a negative amount of energy: {0}")]
    NegativeAmount(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl EnergyTank {
    /// Create a new tank, negative quantities are treated as empty.
    pub fn new(quantity: f64) -> Self {
        Self {
            quantity: quantity.max(0.0),
        }
    }
}

impl Default for EnergyTank {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

impl EnergySource for EnergyTank {
    fn quantity(&self) -> f64 {
        self.quantity
    }

    fn has_enough(&self, amount: f64) -> bool {
        amount <= self.quantity + ENERGY_TOLERANCE
    }

    fn consume(&mut self, amount: f64) -> Result<(), EnergyError> {
        if amount < 0.0 {
            return Err(EnergyError::NegativeAmount(amount));
        }

        if !self.has_enough(amount) {
            return Err(EnergyError::Overdraw {
                requested: amount,
                available: self.quantity,
            });
        }

        self.quantity = (self.quantity - amount).max(0.0);

        if self.quantity == 0.0 {
            debug!("Energy tank empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_consume() {
        let mut tank = EnergyTank::new(10.0);

        assert!(tank.has_enough(10.0));
        assert!(!tank.has_enough(10.1));

        tank.consume(4.0).unwrap();
        assert_abs_diff_eq!(tank.quantity(), 6.0);

        assert_eq!(
            tank.consume(7.0),
            Err(EnergyError::Overdraw {
                requested: 7.0,
                available: 6.0
            })
        );
        assert_abs_diff_eq!(tank.quantity(), 6.0);

        assert_eq!(tank.consume(-1.0), Err(EnergyError::NegativeAmount(-1.0)));
    }

    #[test]
    fn test_rounding_residue() {
        let mut tank = EnergyTank::new(0.3);

        // 0.1 + 0.2 is slightly more than 0.3
        tank.consume(0.1).unwrap();
        tank.consume(0.2).unwrap();

        assert_eq!(tank.quantity(), 0.0);
    }

    #[test]
    fn test_negative_initial_quantity() {
        assert_eq!(EnergyTank::new(-5.0).quantity(), 0.0);
    }
}
