//! Error types for controller construction.

use sf_smc::SmcError;
use thiserror::Error;

/// Errors returned by a build call.
///
/// Fatal to that build call only; deprecated or unknown parameter keys are
/// not errors (they degrade to defaults and emit events instead).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown controller variant: {name}")]
    UnknownVariant { name: String },

    #[error("Wrong gain count for {variant}: expected {expected}, got {got}")]
    WrongArity {
        variant: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Invalid controller parameters: {0}")]
    InvalidParams(#[from] SmcError),
}
