//! sf-core: stable foundation for sigmaflow.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - state (fixed-size plant state vector)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod state;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use state::PlantState;
