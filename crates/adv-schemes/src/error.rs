//! Error types for scheme execution.

use adv_core::AdvError;
use thiserror::Error;

/// Errors raised before any time level is computed.
///
/// A solve either returns a fully populated field or one of these; there are
/// no partial results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemeError {
    #[error("CFL condition violated: courant number {courant} must satisfy |c * dt / dx| <= 1")]
    Stability { courant: f64 },

    #[error("Solve setup error: {0}")]
    Setup(#[from] AdvError),
}

pub type SchemeResult<T> = Result<T, SchemeError>;

impl SchemeError {
    /// Courant number carried by a stability failure.
    pub fn courant(&self) -> Option<f64> {
        match self {
            SchemeError::Stability { courant } => Some(*courant),
            SchemeError::Setup(_) => None,
        }
    }
}
