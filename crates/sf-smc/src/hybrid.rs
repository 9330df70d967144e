//! Hybrid adaptive super-twisting controller.
//!
//! Two regimes, selected by a hysteresis-banded threshold on `|sigma|`:
//!
//! - **Reaching** (far from the surface): super-twisting structure with high
//!   fixed gains to accelerate convergence
//! - **Sliding** (near the surface): super-twisting with slowly adapted
//!   gains `k1(t)`, `k2(t)`
//!
//! Mode transitions happen at most once per step and only after `|sigma|`
//! crosses the whole hysteresis band, so the mode machine cannot chatter
//! between regimes the way the raw surface value does.

use serde::{Deserialize, Serialize};
use sf_core::PlantState;

use crate::error::{SmcError, SmcResult};
use crate::surface::SurfaceGains;
use crate::switching::{saturate, SwitchFn};

/// Discrete regime of the hybrid controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HybridMode {
    /// Far from the surface; fixed high gains.
    Reaching,
    /// Near the surface; adapted super-twisting gains.
    Sliding,
}

/// Hybrid adaptive super-twisting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridAdaptiveStaSmc {
    /// Initial (and floor) value of the adapted gain k1(t).
    pub k1_init: f64,
    /// Initial (and floor) value of the adapted gain k2(t).
    pub k2_init: f64,
    /// Sliding surface (unit joint weights; poles lam1, lam2).
    pub surface: SurfaceGains,
    /// Adaptation rate for k1(t), k2(t) in sliding mode (1/seconds).
    pub adapt_rate: f64,
    /// Ceiling for the adapted k1(t).
    pub k1_max: f64,
    /// Ceiling for the adapted k2(t).
    pub k2_max: f64,
    /// Fixed reaching-mode gain replacing k1.
    pub k1_reach: f64,
    /// Fixed reaching-mode gain replacing k2.
    pub k2_reach: f64,
    /// Center of the mode-switch band on |sigma|.
    pub sigma_threshold: f64,
    /// Half-width of the hysteresis band.
    pub hysteresis: f64,
    /// Clamp on the auxiliary integrator magnitude.
    pub u_int_limit: f64,
    /// Boundary-layer width phi.
    pub boundary_layer: f64,
    /// Actuator saturation limit (newtons).
    pub max_force: f64,
    /// Boundary-layer sign approximation.
    pub switch_fn: SwitchFn,
}

/// Hybrid controller internal state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridState {
    /// Adapted gain k1(t).
    pub k1: f64,
    /// Adapted gain k2(t).
    pub k2: f64,
    /// Auxiliary integrator value.
    pub u_int: f64,
    /// Current regime.
    pub mode: HybridMode,
}

impl HybridAdaptiveStaSmc {
    /// Create a hybrid adaptive super-twisting law.
    ///
    /// # Arguments
    ///
    /// * `k1_init` - Initial adapted gain k1 (must be positive)
    /// * `k2_init` - Initial adapted gain k2 (must be positive)
    /// * `lam1`, `lam2` - Surface pole placements (must be non-negative)
    /// * `boundary_layer` - Boundary-layer width (must be positive)
    /// * `max_force` - Actuator limit (must be positive)
    pub fn new(
        k1_init: f64,
        k2_init: f64,
        lam1: f64,
        lam2: f64,
        boundary_layer: f64,
        max_force: f64,
    ) -> SmcResult<Self> {
        if !k1_init.is_finite() || k1_init <= 0.0 {
            return Err(SmcError::InvalidArg {
                what: "k1_init must be positive",
            });
        }
        if !k2_init.is_finite() || k2_init <= 0.0 {
            return Err(SmcError::InvalidArg {
                what: "k2_init must be positive",
            });
        }
        if !boundary_layer.is_finite() || boundary_layer <= 0.0 {
            return Err(SmcError::InvalidArg {
                what: "boundary_layer must be positive",
            });
        }
        if !max_force.is_finite() || max_force <= 0.0 {
            return Err(SmcError::InvalidArg {
                what: "max_force must be positive",
            });
        }
        let surface = SurfaceGains::unit_weights(lam1, lam2)?;
        Ok(Self {
            k1_init,
            k2_init,
            surface,
            adapt_rate: 0.5,
            k1_max: 100.0,
            k2_max: 100.0,
            k1_reach: 2.0 * k1_init,
            k2_reach: 2.0 * k2_init,
            sigma_threshold: 0.5,
            hysteresis: 0.1,
            u_int_limit: max_force,
            boundary_layer,
            max_force,
            switch_fn: SwitchFn::default(),
        })
    }

    /// Set the fixed reaching-mode gains.
    pub fn with_reaching_gains(mut self, k1_reach: f64, k2_reach: f64) -> Self {
        self.k1_reach = k1_reach;
        self.k2_reach = k2_reach;
        self
    }

    /// Set the sliding-mode adaptation rate and gain ceilings.
    pub fn with_adaptation(mut self, adapt_rate: f64, k1_max: f64, k2_max: f64) -> Self {
        self.adapt_rate = adapt_rate;
        self.k1_max = k1_max;
        self.k2_max = k2_max;
        self
    }

    /// Set the mode-switch threshold and hysteresis half-width.
    ///
    /// # Errors
    ///
    /// Returns an error if the band is not positive or the hysteresis does
    /// not fit inside the threshold.
    pub fn with_mode_band(mut self, sigma_threshold: f64, hysteresis: f64) -> SmcResult<Self> {
        if !sigma_threshold.is_finite() || sigma_threshold <= 0.0 {
            return Err(SmcError::InvalidArg {
                what: "sigma_threshold must be positive",
            });
        }
        if !hysteresis.is_finite() || hysteresis < 0.0 || hysteresis >= sigma_threshold {
            return Err(SmcError::InvalidArg {
                what: "hysteresis must be non-negative and smaller than sigma_threshold",
            });
        }
        self.sigma_threshold = sigma_threshold;
        self.hysteresis = hysteresis;
        Ok(self)
    }

    /// Set the auxiliary integrator clamp.
    pub fn with_integral_limit(mut self, limit: f64) -> Self {
        self.u_int_limit = limit;
        self
    }

    /// Set the boundary-layer sign approximation.
    pub fn with_switch_fn(mut self, switch_fn: SwitchFn) -> Self {
        self.switch_fn = switch_fn;
        self
    }

    /// True when the discontinuous-gain dominance `k1 > k2` holds for the
    /// adapted pair.
    pub fn gain_dominance_ok(&self) -> bool {
        self.k1_init > self.k2_init
    }

    /// Internal state at controller instantiation: gains at their initial
    /// values, integrator at zero, reaching mode.
    pub fn initial_state(&self) -> HybridState {
        HybridState {
            k1: self.k1_init,
            k2: self.k2_init,
            u_int: 0.0,
            mode: HybridMode::Reaching,
        }
    }

    /// One-directional-per-step mode transition with hysteresis.
    fn next_mode(&self, mode: HybridMode, sigma_abs: f64) -> HybridMode {
        match mode {
            HybridMode::Reaching if sigma_abs < self.sigma_threshold - self.hysteresis => {
                HybridMode::Sliding
            }
            HybridMode::Sliding if sigma_abs > self.sigma_threshold + self.hysteresis => {
                HybridMode::Reaching
            }
            other => other,
        }
    }

    /// Advance one control step.
    pub fn update(&self, state: &HybridState, plant: &PlantState, dt: f64) -> (HybridState, f64) {
        let sigma = self.surface.sigma(plant);
        let switch = self.switch_fn.approx_sign(sigma, self.boundary_layer);

        let mode = self.next_mode(state.mode, sigma.abs());

        let (k1_next, k2_next, k1_eff, k2_eff) = match mode {
            HybridMode::Sliding => {
                let k1 = (state.k1 + dt * self.adapt_rate * sigma.abs())
                    .clamp(self.k1_init, self.k1_max);
                let k2 = (state.k2 + dt * self.adapt_rate * sigma.abs())
                    .clamp(self.k2_init, self.k2_max);
                (k1, k2, k1, k2)
            }
            HybridMode::Reaching => (state.k1, state.k2, self.k1_reach, self.k2_reach),
        };

        let u = -k1_eff * sigma.abs().sqrt() * switch + state.u_int;
        let u_int_next =
            (state.u_int + dt * (-k2_eff * switch)).clamp(-self.u_int_limit, self.u_int_limit);

        let next = HybridState {
            k1: k1_next,
            k2: k2_next,
            u_int: u_int_next,
            mode,
        };
        (next, saturate(u, self.max_force))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn law() -> HybridAdaptiveStaSmc {
        HybridAdaptiveStaSmc::new(6.0, 3.0, 4.0, 3.0, 0.05, 150.0)
            .unwrap()
            .with_mode_band(0.5, 0.1)
            .unwrap()
    }

    #[test]
    fn starts_in_reaching_mode() {
        assert_eq!(law().initial_state().mode, HybridMode::Reaching);
    }

    #[test]
    fn enters_sliding_below_band() {
        let l = law();
        // sigma = theta1_dot small: |sigma| < 0.4
        let plant = PlantState::new(0.0, 0.0, 0.0, 0.0, 0.1, 0.0);
        let (next, _) = l.update(&l.initial_state(), &plant, 0.01);
        assert_eq!(next.mode, HybridMode::Sliding);
    }

    #[test]
    fn stays_in_reaching_inside_hysteresis_band() {
        let l = law();
        // |sigma| = 0.45: inside [0.4, 0.6], no transition
        let plant = PlantState::new(0.0, 0.0, 0.0, 0.0, 0.45, 0.0);
        let (next, _) = l.update(&l.initial_state(), &plant, 0.01);
        assert_eq!(next.mode, HybridMode::Reaching);
    }

    #[test]
    fn returns_to_reaching_above_band() {
        let l = law();
        let mut state = l.initial_state();
        state.mode = HybridMode::Sliding;
        let plant = PlantState::new(0.0, 0.0, 0.0, 0.0, 0.7, 0.0);
        let (next, _) = l.update(&state, &plant, 0.01);
        assert_eq!(next.mode, HybridMode::Reaching);
    }

    #[test]
    fn sliding_mode_adapts_gains_upward() {
        let l = law();
        let plant = PlantState::new(0.0, 0.0, 0.0, 0.0, 0.2, 0.0);
        let mut state = l.initial_state();
        for _ in 0..50 {
            let (next, _) = l.update(&state, &plant, 0.01);
            state = next;
        }
        assert_eq!(state.mode, HybridMode::Sliding);
        assert!(state.k1 > l.k1_init);
        assert!(state.k2 > l.k2_init);
        assert!(state.k1 <= l.k1_max);
    }

    #[test]
    fn reaching_mode_leaves_adapted_gains_untouched() {
        let l = law();
        let plant = PlantState::new(0.0, 0.0, 0.0, 0.0, 2.0, 0.0);
        let (next, _) = l.update(&l.initial_state(), &plant, 0.01);
        assert_eq!(next.mode, HybridMode::Reaching);
        assert_eq!(next.k1, l.k1_init);
        assert_eq!(next.k2, l.k2_init);
    }

    #[test]
    fn integrator_is_clamped() {
        let l = law().with_integral_limit(1.0);
        let plant = PlantState::new(0.0, 0.0, 0.0, 0.0, 2.0, 0.0);
        let mut state = l.initial_state();
        for _ in 0..10_000 {
            let (next, force) = l.update(&state, &plant, 0.01);
            assert!(force.abs() <= l.max_force);
            state = next;
        }
        assert!(state.u_int.abs() <= 1.0);
    }

    #[test]
    fn invalid_parameters() {
        assert!(HybridAdaptiveStaSmc::new(0.0, 3.0, 4.0, 3.0, 0.05, 150.0).is_err());
        assert!(HybridAdaptiveStaSmc::new(6.0, 3.0, -4.0, 3.0, 0.05, 150.0).is_err());
        let base = HybridAdaptiveStaSmc::new(6.0, 3.0, 4.0, 3.0, 0.05, 150.0).unwrap();
        assert!(base.clone().with_mode_band(0.5, 0.6).is_err());
        assert!(base.with_mode_band(-1.0, 0.1).is_err());
    }
}
