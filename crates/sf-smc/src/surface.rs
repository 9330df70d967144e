//! Sliding surface shared by every control-law variant.
//!
//! The surface is a weighted linear combination of joint tracking errors and
//! their derivatives. Its zero set defines the reduced-order dynamics the
//! controller drives the plant onto; each `(k, lambda)` pair places one
//! second-order pole pair of those dynamics.

use serde::{Deserialize, Serialize};
use sf_core::PlantState;

use crate::error::{SmcError, SmcResult};

/// Surface gains for the two controlled joints.
///
/// `sigma = k1 * (theta1_dot + lam1 * theta1) + k2 * (theta2_dot + lam2 * theta2)`
///
/// Regulation to the origin: the tracking error is the state itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGains {
    /// Weight on the first joint error combination.
    pub k1: f64,
    /// Weight on the second joint error combination.
    pub k2: f64,
    /// Pole placement for the first joint (1/seconds).
    pub lam1: f64,
    /// Pole placement for the second joint (1/seconds).
    pub lam2: f64,
}

impl SurfaceGains {
    /// Create validated surface gains.
    ///
    /// # Errors
    ///
    /// Returns an error if any gain is non-finite, if a weight is not
    /// positive, or if a pole placement is negative.
    pub fn new(k1: f64, k2: f64, lam1: f64, lam2: f64) -> SmcResult<Self> {
        for (v, what) in [
            (k1, "surface k1"),
            (k2, "surface k2"),
            (lam1, "surface lam1"),
            (lam2, "surface lam2"),
        ] {
            if !v.is_finite() {
                return Err(SmcError::NonFinite { what });
            }
        }
        if k1 <= 0.0 || k2 <= 0.0 {
            return Err(SmcError::InvalidArg {
                what: "surface weights k1, k2 must be positive",
            });
        }
        if lam1 < 0.0 || lam2 < 0.0 {
            return Err(SmcError::InvalidArg {
                what: "surface poles lam1, lam2 must be non-negative",
            });
        }
        Ok(Self { k1, k2, lam1, lam2 })
    }

    /// Surface with unit joint weights, poles only.
    pub fn unit_weights(lam1: f64, lam2: f64) -> SmcResult<Self> {
        Self::new(1.0, 1.0, lam1, lam2)
    }

    /// Evaluate the surface value for the current plant state.
    pub fn sigma(&self, plant: &PlantState) -> f64 {
        self.k1 * (plant.theta1_dot() + self.lam1 * plant.theta1())
            + self.k2 * (plant.theta2_dot() + self.lam2 * plant.theta2())
    }

    /// The two `(k, lambda)` pole pairs, in joint order.
    pub fn pole_pairs(&self) -> [(f64, f64); 2] {
        [(self.k1, self.lam1), (self.k2, self.lam2)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigma_at_origin_is_zero() {
        let s = SurfaceGains::new(5.0, 3.0, 2.0, 1.0).unwrap();
        assert_eq!(s.sigma(&PlantState::zero()), 0.0);
    }

    #[test]
    fn sigma_weights_both_joints() {
        let s = SurfaceGains::new(2.0, 3.0, 1.0, 1.0).unwrap();
        // theta1 = 0.1 with lam1 = 1 contributes 2 * 0.1; theta2_dot = 0.2
        // contributes 3 * 0.2
        let plant = PlantState::new(0.0, 0.1, 0.0, 0.0, 0.0, 0.2);
        assert!((s.sigma(&plant) - (0.2 + 0.6)).abs() < 1e-12);
    }

    #[test]
    fn invalid_gains_rejected() {
        assert!(SurfaceGains::new(0.0, 1.0, 1.0, 1.0).is_err());
        assert!(SurfaceGains::new(1.0, -1.0, 1.0, 1.0).is_err());
        assert!(SurfaceGains::new(1.0, 1.0, -0.5, 1.0).is_err());
        assert!(SurfaceGains::new(f64::NAN, 1.0, 1.0, 1.0).is_err());
    }
}
