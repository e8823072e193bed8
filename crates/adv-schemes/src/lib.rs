//! Explicit finite-difference solvers for the 1D linear advection equation
//! `du/dt + c du/dx = 0`.
//!
//! Provides:
//! - Courant number computation and the CFL stability gate
//! - Dirichlet and periodic boundary policies
//! - Superbee flux limiter
//! - First-order upwind, Lax-Wendroff and TVD (flux-limited) engines
//! - Dense space-time solution field and simple diagnostics

pub mod boundary;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod field;
pub mod lax_wendroff;
pub mod limiter;
pub mod stability;
pub mod tvd;
pub mod upwind;

// Re-exports for public API
pub use boundary::BoundaryPolicy;
pub use diagnostics::{extrema, mass, total_variation};
pub use engine::{
    Scheme, SchemeEngine, SolveOptions, SolvePhase, StepContext, StepEvent, run_engine, solve,
    solve_with,
};
pub use error::{SchemeError, SchemeResult};
pub use field::SolutionField;
pub use lax_wendroff::LaxWendroff;
pub use limiter::{FluxLimiter, Superbee, superbee, superbee_slice};
pub use stability::{check_stability, courant_number, max_stable_dt};
pub use tvd::Tvd;
pub use upwind::Upwind;
