//! Gain tuning for sigmaflow controllers.
//!
//! Two layers:
//!
//! - [`perf`]: pure closed-form indicators of a gain vector (damping ratio,
//!   estimated overshoot, estimated settling time, robustness margin)
//! - [`pso`]: a constrained particle-swarm optimizer that searches a bounded
//!   gain space, scoring candidates with the analytic multi-objective cost
//!   in [`objective`]
//!
//! Constraint handling is soft throughout: a candidate whose implied damping
//! ratios leave the target band pays a quadratic penalty, but no point inside
//! the search bounds is ever infeasible.

pub mod error;
pub mod objective;
pub mod perf;
pub mod pso;

pub use error::TuneError;
pub use objective::{cost, damping_penalty, CostWeights};
pub use perf::{
    damping_ratio, estimated_overshoot, estimated_settling_time, robustness_margin,
};
pub use pso::{tune, GainBounds, PsoConfig, TuneResult};
