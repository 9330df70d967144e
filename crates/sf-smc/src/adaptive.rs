//! Adaptive sliding-mode controller.
//!
//! `u = -kd * sigma - K(t) * switch(sigma, phi)`
//!
//! The switching gain is not fixed: it grows at rate `gamma` while `|sigma|`
//! is outside the dead zone and leaks back toward zero otherwise, so the
//! controller finds the gain the disturbance level actually requires instead
//! of carrying a worst-case constant. `K(t)` is clamped to a non-negative
//! floor; a negative switching gain would push the plant away from the
//! surface.

use serde::{Deserialize, Serialize};
use sf_core::PlantState;

use crate::error::{SmcError, SmcResult};
use crate::surface::SurfaceGains;
use crate::switching::{saturate, SwitchFn};

/// Adaptive SMC configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveSmc {
    /// Sliding surface gains.
    pub surface: SurfaceGains,
    /// Adaptation rate gamma (1/seconds).
    pub gamma: f64,
    /// Dead zone on |sigma| below which the gain stops growing.
    pub dead_zone: f64,
    /// Floor for the adapted gain (non-negative).
    pub k_min: f64,
    /// Ceiling for the adapted gain.
    pub k_max: f64,
    /// Initial adapted gain.
    pub k_init: f64,
    /// Leak rate pulling the gain back toward the floor (1/seconds).
    pub leak: f64,
    /// Linear feedback weight on the surface value.
    pub surface_feedback: f64,
    /// Boundary-layer width phi.
    pub boundary_layer: f64,
    /// Actuator saturation limit (newtons).
    pub max_force: f64,
    /// Boundary-layer sign approximation.
    pub switch_fn: SwitchFn,
}

/// Adaptive SMC internal state: the estimated switching gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveState {
    /// Current adapted gain K(t).
    pub k: f64,
}

impl AdaptiveSmc {
    /// Create an adaptive SMC law.
    ///
    /// # Arguments
    ///
    /// * `surface` - Sliding surface gains
    /// * `gamma` - Adaptation rate (must be positive)
    /// * `boundary_layer` - Boundary-layer width (must be positive)
    /// * `max_force` - Actuator limit (must be positive)
    pub fn new(
        surface: SurfaceGains,
        gamma: f64,
        boundary_layer: f64,
        max_force: f64,
    ) -> SmcResult<Self> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(SmcError::InvalidArg {
                what: "gamma must be positive",
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
        Ok(Self {
            surface,
            gamma,
            dead_zone: 0.0,
            k_min: 0.0,
            k_max: 1e3,
            k_init: 0.0,
            leak: 0.0,
            surface_feedback: 1.0,
            boundary_layer,
            max_force,
            switch_fn: SwitchFn::default(),
        })
    }

    /// Set the dead zone on |sigma|.
    pub fn with_dead_zone(mut self, dead_zone: f64) -> Self {
        self.dead_zone = dead_zone;
        self
    }

    /// Set the adapted-gain range and initial value.
    pub fn with_gain_range(mut self, k_min: f64, k_max: f64, k_init: f64) -> Self {
        self.k_min = k_min;
        self.k_max = k_max;
        self.k_init = k_init;
        self
    }

    /// Set the leak rate.
    pub fn with_leak(mut self, leak: f64) -> Self {
        self.leak = leak;
        self
    }

    /// Set the linear surface feedback weight.
    pub fn with_surface_feedback(mut self, kd: f64) -> Self {
        self.surface_feedback = kd;
        self
    }

    /// Set the boundary-layer sign approximation.
    pub fn with_switch_fn(mut self, switch_fn: SwitchFn) -> Self {
        self.switch_fn = switch_fn;
        self
    }

    /// Internal state at controller instantiation.
    pub fn initial_state(&self) -> AdaptiveState {
        AdaptiveState { k: self.k_init }
    }

    /// Advance one control step.
    ///
    /// The adaptation law runs first, then the new gain drives the switching
    /// term; both happen exactly once per step.
    pub fn update(&self, state: &AdaptiveState, plant: &PlantState, dt: f64) -> (AdaptiveState, f64) {
        let sigma = self.surface.sigma(plant);

        let growth = self.gamma * (sigma.abs() - self.dead_zone);
        let k_raw = state.k + dt * growth - dt * self.leak * state.k;
        let k_next = k_raw.clamp(self.k_min, self.k_max);

        let switch = self.switch_fn.approx_sign(sigma, self.boundary_layer);
        let u = -self.surface_feedback * sigma - k_next * switch;

        (AdaptiveState { k: k_next }, saturate(u, self.max_force))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn law() -> AdaptiveSmc {
        let surface = SurfaceGains::new(10.0, 8.0, 3.0, 2.0).unwrap();
        AdaptiveSmc::new(surface, 2.0, 0.05, 150.0)
            .unwrap()
            .with_dead_zone(0.01)
    }

    #[test]
    fn gain_grows_outside_dead_zone() {
        let l = law();
        let plant = PlantState::new(0.0, 0.2, 0.1, 0.0, 0.0, 0.0);
        let mut state = l.initial_state();
        for _ in 0..20 {
            let (next, _) = l.update(&state, &plant, 0.01);
            state = next;
        }
        assert!(state.k > 0.0);
    }

    #[test]
    fn gain_floored_at_k_min() {
        let l = law();
        // |sigma| = 0 inside the dead zone: growth is negative
        let plant = PlantState::zero();
        let mut state = l.initial_state();
        for _ in 0..100 {
            let (next, _) = l.update(&state, &plant, 0.01);
            state = next;
        }
        assert_eq!(state.k, l.k_min);
    }

    #[test]
    fn gain_capped_at_k_max() {
        let surface = SurfaceGains::new(10.0, 8.0, 3.0, 2.0).unwrap();
        let l = AdaptiveSmc::new(surface, 100.0, 0.05, 150.0)
            .unwrap()
            .with_gain_range(0.0, 5.0, 0.0);
        let plant = PlantState::new(0.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        let mut state = l.initial_state();
        for _ in 0..100 {
            let (next, _) = l.update(&state, &plant, 0.01);
            state = next;
        }
        assert_eq!(state.k, 5.0);
    }

    #[test]
    fn leak_pulls_gain_down() {
        let surface = SurfaceGains::new(10.0, 8.0, 3.0, 2.0).unwrap();
        let l = AdaptiveSmc::new(surface, 2.0, 0.05, 150.0)
            .unwrap()
            .with_dead_zone(0.5)
            .with_leak(1.0)
            .with_gain_range(0.0, 100.0, 10.0);
        // Inside the dead zone the leak term dominates
        let plant = PlantState::zero();
        let (next, _) = l.update(&l.initial_state(), &plant, 0.01);
        assert!(next.k < 10.0);
    }

    #[test]
    fn force_respects_saturation() {
        let l = law();
        let plant = PlantState::new(0.0, 2.0, 2.0, 0.0, 8.0, 8.0);
        let mut state = l.initial_state();
        for _ in 0..200 {
            let (next, force) = l.update(&state, &plant, 0.01);
            assert!(force.abs() <= l.max_force);
            state = next;
        }
    }

    #[test]
    fn invalid_parameters() {
        let surface = SurfaceGains::new(10.0, 8.0, 3.0, 2.0).unwrap();
        assert!(AdaptiveSmc::new(surface, 0.0, 0.05, 150.0).is_err());
        assert!(AdaptiveSmc::new(surface, 2.0, -1.0, 150.0).is_err());
        assert!(AdaptiveSmc::new(surface, 2.0, 0.05, f64::INFINITY).is_err());
    }
}
