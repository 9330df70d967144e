//! Classical sliding-mode controller.
//!
//! `u = -kd * sigma - K * switch(sigma, phi)`, saturated to the actuator
//! limit. The controller is stateless: the whole law is a function of the
//! current plant state.
//!
//! Chattering is bounded by the boundary-layer width `phi`, but the
//! steady-state tracking error grows with it: inside the layer the switching
//! term behaves like a finite-gain proportional term, so the plant settles
//! at the surface offset where disturbances balance that gain. Pick `phi`
//! as the acceptable residual band, not smaller.

use serde::{Deserialize, Serialize};
use sf_core::PlantState;

use crate::error::{SmcError, SmcResult};
use crate::surface::SurfaceGains;
use crate::switching::{saturate, SwitchFn};

/// Classical SMC configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicalSmc {
    /// Sliding surface gains.
    pub surface: SurfaceGains,
    /// Switching gain K (newtons).
    pub switch_gain: f64,
    /// Boundary-layer width phi.
    pub boundary_layer: f64,
    /// Linear feedback weight on the surface value.
    pub surface_feedback: f64,
    /// Actuator saturation limit (newtons).
    pub max_force: f64,
    /// Boundary-layer sign approximation.
    pub switch_fn: SwitchFn,
}

impl ClassicalSmc {
    /// Create a classical SMC law.
    ///
    /// # Arguments
    ///
    /// * `surface` - Sliding surface gains
    /// * `switch_gain` - Switching gain K (must be non-negative)
    /// * `boundary_layer` - Boundary-layer width (must be positive)
    /// * `max_force` - Actuator limit (must be positive)
    pub fn new(
        surface: SurfaceGains,
        switch_gain: f64,
        boundary_layer: f64,
        max_force: f64,
    ) -> SmcResult<Self> {
        if !switch_gain.is_finite() || switch_gain < 0.0 {
            return Err(SmcError::InvalidArg {
                what: "switch_gain must be finite and non-negative",
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
            switch_gain,
            boundary_layer,
            surface_feedback: 1.0,
            max_force,
            switch_fn: SwitchFn::default(),
        })
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

    /// Compute the saturated control force for the current plant state.
    pub fn update(&self, plant: &PlantState) -> f64 {
        let sigma = self.surface.sigma(plant);
        let switch = self.switch_fn.approx_sign(sigma, self.boundary_layer);
        let u = -self.surface_feedback * sigma - self.switch_gain * switch;
        saturate(u, self.max_force)
    }
}
