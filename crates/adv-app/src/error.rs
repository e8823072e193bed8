//! Error types for the adv-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives frontends one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Stability check failed: courant number {courant}")]
    Unstable { courant: f64 },

    #[error("Time level {level} out of range (nt = {nt})")]
    LevelOutOfRange { level: usize, nt: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for adv-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<adv_project::ProjectError> for AppError {
    fn from(err: adv_project::ProjectError) -> Self {
        AppError::Request(err.to_string())
    }
}

impl From<adv_schemes::SchemeError> for AppError {
    fn from(err: adv_schemes::SchemeError) -> Self {
        match err {
            adv_schemes::SchemeError::Stability { courant } => AppError::Unstable { courant },
            other => AppError::Solver(other.to_string()),
        }
    }
}

impl From<adv_core::AdvError> for AppError {
    fn from(err: adv_core::AdvError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
