//! Controller construction and configuration migration for sigmaflow.
//!
//! Turns a raw configuration request (variant name, flat gain vector, flat
//! key/value parameter map) into a configured [`sf_smc::Controller`]:
//!
//! - validates the gain-vector arity against the variant's fixed layout
//! - migrates deprecated parameter names per variant, collecting
//!   deprecation events for the caller's logging layer
//! - flags soft gain-constraint violations without rejecting them
//!
//! The builder is an explicit object the caller instantiates and passes
//! around; there is no process-wide warner.

pub mod artifact;
pub mod builder;
pub mod deprecation;
pub mod error;
pub mod params;

pub use artifact::GainArtifact;
pub use builder::{BuildOutput, BuildRequest, ControllerBuilder};
pub use deprecation::{Deprecation, DeprecationAction, DeprecationEvent, DeprecationSeverity};
pub use error::ConfigError;
pub use params::{get_or, ParamMap};
