//! Error types for control-law construction.

use thiserror::Error;

/// Result type for control-law operations.
pub type SmcResult<T> = Result<T, SmcError>;

/// Errors that can occur when configuring a control law.
///
/// The per-step `advance` path never returns these; runtime numerical faults
/// are reported through [`crate::StepStatus`] instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SmcError {
    /// Invalid argument provided to a constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Non-finite value provided where a finite one is required.
    #[error("Non-finite value for {what}")]
    NonFinite { what: &'static str },
}
