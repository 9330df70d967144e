//! Sliding-mode control laws for sigmaflow.
//!
//! This crate implements the control-law engine: four sliding-mode variants
//! sharing one sliding surface and one stateful advance contract.
//!
//! # Architecture
//!
//! - Every variant computes the same sliding surface, a weighted combination
//!   of joint tracking errors and their derivatives
//! - Each variant is a pure config struct plus an explicit state struct;
//!   `update` consumes the old state and returns the next one
//! - [`Controller`] wraps a variant and its state behind a closed tagged
//!   enum, adds the fail-safe hold for non-finite inputs, and applies no
//!   allocation on the per-step path
//!
//! # Variants
//!
//! - **Classical**: boundary-layered switching; stateless. Wider boundary
//!   layer means less chattering but more residual tracking error.
//! - **Super-twisting**: second-order algorithm; integrates the discontinuous
//!   term so the control signal itself stays continuous
//! - **Adaptive**: switching gain grows while the surface error is outside a
//!   dead zone, with leakage and a non-negative floor
//! - **Hybrid adaptive super-twisting**: hysteresis-banded mode machine that
//!   runs high fixed gains far from the surface and a slowly adapted
//!   super-twisting law near it

pub mod adaptive;
pub mod classical;
pub mod controller;
pub mod error;
pub mod hybrid;
pub mod super_twisting;
pub mod surface;
pub mod switching;
pub mod variant;

pub use adaptive::{AdaptiveSmc, AdaptiveState};
pub use classical::ClassicalSmc;
pub use controller::{Controller, SmcLaw, SmcState, Step, StepStatus};
pub use error::{SmcError, SmcResult};
pub use hybrid::{HybridAdaptiveStaSmc, HybridMode, HybridState};
pub use super_twisting::{StaState, SuperTwistingSmc};
pub use surface::SurfaceGains;
pub use switching::{saturate, SwitchFn};
pub use variant::VariantKind;
