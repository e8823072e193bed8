//! Solve request document.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolveRequest {
    #[serde(default)]
    pub scheme: SchemeDef,
    /// Advection speed.
    pub c: f64,
    pub length: f64,
    pub nx: usize,
    pub nt: usize,
    pub dt: f64,
    pub initial_condition: InitialConditionDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_conditions: Option<BoundaryConditionsDef>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SchemeDef {
    #[default]
    Upwind,
    #[serde(alias = "lax-wendroff", alias = "laxwendroff")]
    LaxWendroff,
    #[serde(alias = "superbee")]
    Tvd,
}

/// Explicit node values, or a profile sampled at the grid nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum InitialConditionDef {
    Values(Vec<f64>),
    Profile(ProfileDef),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProfileDef {
    /// `amplitude` strictly inside `(start, end)`, zero elsewhere.
    SquarePulse {
        start: f64,
        end: f64,
        #[serde(default = "default_amplitude")]
        amplitude: f64,
    },
    /// `amplitude * sin(2 pi periods x / length)`.
    Sine {
        #[serde(default = "default_periods")]
        periods: f64,
        #[serde(default = "default_amplitude")]
        amplitude: f64,
    },
    Constant {
        value: f64,
    },
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_periods() -> f64 {
    1.0
}

/// Boundary configuration as accepted on the wire.
///
/// A bare number is the left Dirichlet value; an empty mapping (or no
/// `boundary_conditions` key at all) means periodic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BoundaryConditionsDef {
    Value(f64),
    Edges(BoundaryEdgesDef),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BoundaryEdgesDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<RightEdgeDef>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub periodic: bool,
}

/// Right edge: a fixed value, or `extrapolate` to copy the previous level's
/// last node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RightEdgeDef {
    Value(f64),
    Mode(EdgeMode),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    Extrapolate,
}

impl RightEdgeDef {
    /// Fixed value, or `None` for an extrapolated edge.
    pub fn fixed(&self) -> Option<f64> {
        match *self {
            RightEdgeDef::Value(v) => Some(v),
            RightEdgeDef::Mode(EdgeMode::Extrapolate) => None,
        }
    }
}
