//! Shared application service layer for the advection solvers.
//!
//! Frontends hand over a request (file or in-memory document); this crate
//! lowers it, runs the selected scheme and packages the field together with
//! timing and diagnostics.

pub mod error;
pub mod progress;
pub mod query;
pub mod run_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage};
pub use query::{
    CourantReport, RunSummary, column_csv, courant_report, get_run_summary, level, node_history,
};
pub use run_service::{
    CheckedRequest, Diagnostics, RequestSource, RunOptions, RunRequest, RunResponse,
    RunTimingSummary, SolutionDocument, check, run, run_with_progress,
};
