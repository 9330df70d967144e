//! Boundary-layer switching functions and actuator saturation.
//!
//! A discontinuous `sign(sigma)` term causes chattering: high-frequency
//! oscillation of the control signal around the surface. Inside a boundary
//! layer of width `phi` the sign is replaced by a continuous approximation.
//! The trade-off is explicit: a wider layer switches less but leaves a
//! steady-state tracking error proportional to the width.

use serde::{Deserialize, Serialize};

/// Continuous approximation used for `sign(sigma)` inside the boundary layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchFn {
    /// Smooth `tanh(sigma / phi)`.
    #[default]
    Tanh,
    /// Piecewise-linear `clamp(sigma / phi, -1, 1)`.
    Linear,
}

impl SwitchFn {
    /// Evaluate the boundary-layer approximation of `sign(sigma)`.
    ///
    /// `phi` is the boundary-layer width; callers validate `phi > 0` at
    /// construction time.
    pub fn approx_sign(&self, sigma: f64, phi: f64) -> f64 {
        let scaled = sigma / phi;
        match self {
            SwitchFn::Tanh => scaled.tanh(),
            SwitchFn::Linear => scaled.clamp(-1.0, 1.0),
        }
    }
}

/// Clamp a control force to the actuator's physical limit.
///
/// Every variant applies this before returning; it is the single shared side
/// effect of the control laws besides their own state update.
pub fn saturate(force: f64, max_force: f64) -> f64 {
    force.clamp(-max_force, max_force)
}
