//! adv-core: stable foundation for the advection solvers.
//!
//! Contains:
//! - grid (discretization description + derived spacing)
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - timing (opt-in wall clock timers)
//! - error (shared error types)

pub mod error;
pub mod grid;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{AdvError, AdvResult};
pub use grid::GridSpec;
pub use numeric::*;
