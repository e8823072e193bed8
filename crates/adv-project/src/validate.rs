//! Request validation.

use crate::schema::{BoundaryConditionsDef, InitialConditionDef, ProfileDef, SolveRequest};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Length mismatch: {field} has {got} entries, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        got: usize,
    },

    #[error("Conflicting boundary conditions: {reason}")]
    BoundaryConflict { reason: String },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn finite(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite"))
    }
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    finite(field, v)?;
    if v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be positive"))
    }
}

pub fn validate_request(request: &SolveRequest) -> Result<(), ValidationError> {
    finite("c", request.c)?;
    positive("length", request.length)?;
    positive("dt", request.dt)?;
    if request.nx < 2 {
        return Err(invalid("nx", request.nx, "need at least 2 nodes"));
    }
    if request.nt < 1 {
        return Err(invalid("nt", request.nt, "need at least 1 time level"));
    }
    validate_initial(&request.initial_condition, request.nx)?;
    if let Some(bc) = &request.boundary_conditions {
        validate_boundary(bc)?;
    }
    Ok(())
}

fn validate_initial(initial: &InitialConditionDef, nx: usize) -> Result<(), ValidationError> {
    match initial {
        InitialConditionDef::Values(values) => {
            if values.len() != nx {
                return Err(ValidationError::LengthMismatch {
                    field: "initial_condition".to_string(),
                    expected: nx,
                    got: values.len(),
                });
            }
            if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(invalid(
                    &format!("initial_condition[{i}]"),
                    v,
                    "must be finite",
                ));
            }
        }
        InitialConditionDef::Profile(ProfileDef::SquarePulse {
            start,
            end,
            amplitude,
        }) => {
            finite("initial_condition.start", *start)?;
            finite("initial_condition.end", *end)?;
            finite("initial_condition.amplitude", *amplitude)?;
            if end <= start {
                return Err(invalid("initial_condition.end", end, "must exceed start"));
            }
        }
        InitialConditionDef::Profile(ProfileDef::Sine { periods, amplitude }) => {
            finite("initial_condition.periods", *periods)?;
            finite("initial_condition.amplitude", *amplitude)?;
        }
        InitialConditionDef::Profile(ProfileDef::Constant { value }) => {
            finite("initial_condition.value", *value)?;
        }
    }
    Ok(())
}

fn validate_boundary(bc: &BoundaryConditionsDef) -> Result<(), ValidationError> {
    match bc {
        BoundaryConditionsDef::Value(v) => finite("boundary_conditions", *v),
        BoundaryConditionsDef::Edges(edges) => {
            if edges.periodic && (edges.left.is_some() || edges.right.is_some()) {
                return Err(ValidationError::BoundaryConflict {
                    reason: "periodic boundaries take no edge values".to_string(),
                });
            }
            if edges.left.is_none() && edges.right.is_some() {
                return Err(ValidationError::BoundaryConflict {
                    reason: "a right edge value requires a left edge value".to_string(),
                });
            }
            if let Some(left) = edges.left {
                finite("boundary_conditions.left", left)?;
            }
            if let Some(right) = edges.right.and_then(|r| r.fixed()) {
                finite("boundary_conditions.right", right)?;
            }
            Ok(())
        }
    }
}
