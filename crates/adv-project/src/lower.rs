//! Conversion of a validated request into solver inputs.

use std::f64::consts::PI;

use adv_core::{GridSpec, Real};
use adv_schemes::{BoundaryPolicy, Scheme};

use crate::ProjectResult;
use crate::schema::{
    BoundaryConditionsDef, InitialConditionDef, ProfileDef, SchemeDef, SolveRequest,
};
use crate::validate::validate_request;

/// Everything a scheme needs, resolved once at the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverInputs {
    pub scheme: Scheme,
    pub c: Real,
    pub grid: GridSpec,
    pub initial: Vec<Real>,
    pub boundary: BoundaryPolicy,
}

impl From<SchemeDef> for Scheme {
    fn from(def: SchemeDef) -> Self {
        match def {
            SchemeDef::Upwind => Scheme::Upwind,
            SchemeDef::LaxWendroff => Scheme::LaxWendroff,
            SchemeDef::Tvd => Scheme::Tvd,
        }
    }
}

impl From<Scheme> for SchemeDef {
    fn from(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Upwind => SchemeDef::Upwind,
            Scheme::LaxWendroff => SchemeDef::LaxWendroff,
            Scheme::Tvd => SchemeDef::Tvd,
        }
    }
}

/// Map the wire boundary configuration onto a policy.
///
/// Assumes the configuration already passed validation.
pub fn boundary_policy(bc: Option<&BoundaryConditionsDef>) -> BoundaryPolicy {
    match bc {
        None => BoundaryPolicy::Periodic,
        Some(BoundaryConditionsDef::Value(left)) => BoundaryPolicy::dirichlet(*left),
        Some(BoundaryConditionsDef::Edges(edges)) => match edges.left {
            Some(left) if !edges.periodic => BoundaryPolicy::Dirichlet {
                left,
                right: edges.right.and_then(|r| r.fixed()),
            },
            _ => BoundaryPolicy::Periodic,
        },
    }
}

/// Sample the initial condition at every node of `grid`.
pub fn sample_initial(initial: &InitialConditionDef, grid: &GridSpec) -> Vec<Real> {
    match initial {
        InitialConditionDef::Values(values) => values.clone(),
        InitialConditionDef::Profile(profile) => grid
            .node_positions()
            .into_iter()
            .map(|x| sample_profile(profile, x, grid.length()))
            .collect(),
    }
}

fn sample_profile(profile: &ProfileDef, x: Real, length: Real) -> Real {
    match *profile {
        ProfileDef::SquarePulse {
            start,
            end,
            amplitude,
        } => {
            if x > start && x < end {
                amplitude
            } else {
                0.0
            }
        }
        ProfileDef::Sine { periods, amplitude } => {
            amplitude * (2.0 * PI * periods * x / length).sin()
        }
        ProfileDef::Constant { value } => value,
    }
}

/// Validate and resolve a request.
pub fn lower_request(request: &SolveRequest) -> ProjectResult<SolverInputs> {
    validate_request(request)?;
    let grid = GridSpec::new(request.length, request.nx, request.nt, request.dt)?;
    Ok(SolverInputs {
        scheme: request.scheme.into(),
        c: request.c,
        initial: sample_initial(&request.initial_condition, &grid),
        boundary: boundary_policy(request.boundary_conditions.as_ref()),
        grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BoundaryEdgesDef, EdgeMode, RightEdgeDef};

    #[test]
    fn boundary_forms_map_to_one_policy() {
        assert_eq!(boundary_policy(None), BoundaryPolicy::Periodic);
        assert_eq!(
            boundary_policy(Some(&BoundaryConditionsDef::Value(0.5))),
            BoundaryPolicy::dirichlet(0.5)
        );
        assert_eq!(
            boundary_policy(Some(&BoundaryConditionsDef::Edges(
                BoundaryEdgesDef::default()
            ))),
            BoundaryPolicy::Periodic
        );
        assert_eq!(
            boundary_policy(Some(&BoundaryConditionsDef::Edges(BoundaryEdgesDef {
                left: Some(1.0),
                right: Some(RightEdgeDef::Value(2.0)),
                periodic: false,
            }))),
            BoundaryPolicy::dirichlet_both(1.0, 2.0)
        );
        assert_eq!(
            boundary_policy(Some(&BoundaryConditionsDef::Edges(BoundaryEdgesDef {
                left: Some(1.0),
                right: Some(RightEdgeDef::Mode(EdgeMode::Extrapolate)),
                periodic: false,
            }))),
            BoundaryPolicy::dirichlet(1.0)
        );
    }

    #[test]
    fn square_pulse_is_strictly_inside() {
        let grid = GridSpec::new(1.0, 5, 2, 0.1).unwrap();
        let profile = InitialConditionDef::Profile(ProfileDef::SquarePulse {
            start: 0.25,
            end: 0.75,
            amplitude: 2.0,
        });
        assert_eq!(sample_initial(&profile, &grid), vec![0.0, 0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn sine_profile_spans_the_domain() {
        let grid = GridSpec::new(2.0, 5, 2, 0.1).unwrap();
        let profile = InitialConditionDef::Profile(ProfileDef::Sine {
            periods: 1.0,
            amplitude: 3.0,
        });
        let u = sample_initial(&profile, &grid);
        assert!(u[0].abs() < 1e-12);
        assert!((u[1] - 3.0).abs() < 1e-12);
        assert!((u[3] + 3.0).abs() < 1e-12);
    }
}
