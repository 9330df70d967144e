//! Error types for gain tuning.

use thiserror::Error;

/// Errors raised while setting up an optimization run.
///
/// The optimizer itself never fails once running: out-of-bounds positions
/// are clamped and constraint violations only raise cost.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TuneError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Bounds dimension mismatch: expected {expected}, got {got}")]
    BoundsMismatch { expected: usize, got: usize },
}
