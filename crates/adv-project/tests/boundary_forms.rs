//! Every accepted spelling of `boundary_conditions` lowers to one policy.

use adv_project::{
    BoundaryConditionsDef, BoundaryEdgesDef, EdgeMode, ProjectError, RightEdgeDef, ValidationError,
    from_json_str, from_yaml_str, lower_request,
};
use adv_schemes::{BoundaryPolicy, Scheme};

fn request_yaml(extra: &str) -> String {
    format!(
        "c: 1.0\nlength: 1.0\nnx: 5\nnt: 3\ndt: 0.2\ninitial_condition: [0.0, 0.0, 1.0, 0.0, 0.0]\n{extra}"
    )
}

fn policy(extra: &str) -> BoundaryPolicy {
    let request = from_yaml_str(&request_yaml(extra)).unwrap();
    lower_request(&request).unwrap().boundary
}

#[test]
fn missing_key_means_periodic() {
    assert_eq!(policy(""), BoundaryPolicy::Periodic);
    assert_eq!(policy("boundary_conditions: {}\n"), BoundaryPolicy::Periodic);
    assert_eq!(
        policy("boundary_conditions:\n  periodic: true\n"),
        BoundaryPolicy::Periodic
    );
}

#[test]
fn bare_number_is_left_dirichlet() {
    assert_eq!(
        policy("boundary_conditions: 0.25\n"),
        BoundaryPolicy::dirichlet(0.25)
    );
}

#[test]
fn mapping_sets_edges() {
    assert_eq!(
        policy("boundary_conditions:\n  left: 1.0\n"),
        BoundaryPolicy::dirichlet(1.0)
    );
    assert_eq!(
        policy("boundary_conditions:\n  left: 1.0\n  right: -1.0\n"),
        BoundaryPolicy::dirichlet_both(1.0, -1.0)
    );
}

#[test]
fn extrapolate_keyword_leaves_right_unset() {
    assert_eq!(
        policy("boundary_conditions:\n  left: 0.5\n  right: extrapolate\n"),
        BoundaryPolicy::dirichlet(0.5)
    );
    let json = r#"{"c": 1.0, "length": 1.0, "nx": 3, "nt": 2, "dt": 0.1,
        "initial_condition": [0.0, 1.0, 0.0],
        "boundary_conditions": {"left": 0.0, "right": "extrapolate"}}"#;
    let request = from_json_str(json).unwrap();
    assert_eq!(
        request.boundary_conditions,
        Some(BoundaryConditionsDef::Edges(BoundaryEdgesDef {
            left: Some(0.0),
            right: Some(RightEdgeDef::Mode(EdgeMode::Extrapolate)),
            periodic: false,
        }))
    );
    assert_eq!(
        lower_request(&request).unwrap().boundary,
        BoundaryPolicy::dirichlet(0.0)
    );
}

#[test]
fn unknown_right_keyword_does_not_parse() {
    assert!(from_yaml_str(&request_yaml("boundary_conditions:\n  left: 0.0\n  right: reflect\n")).is_err());
}

#[test]
fn right_without_left_is_rejected() {
    let err = from_yaml_str(&request_yaml("boundary_conditions:\n  right: 1.0\n")).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::BoundaryConflict { .. })
    ));
}

#[test]
fn periodic_with_edges_is_rejected() {
    let err = from_yaml_str(&request_yaml(
        "boundary_conditions:\n  periodic: true\n  left: 0.0\n",
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::BoundaryConflict { .. })
    ));
}

#[test]
fn misspelled_edge_key_does_not_parse() {
    assert!(from_yaml_str(&request_yaml("boundary_conditions:\n  lft: 0.0\n")).is_err());
}

#[test]
fn json_scheme_aliases() {
    let json = r#"{"scheme": "lax-wendroff", "c": 0.5, "length": 1.0, "nx": 3, "nt": 2,
        "dt": 0.1, "initial_condition": [0.0, 1.0, 0.0]}"#;
    let inputs = lower_request(&from_json_str(json).unwrap()).unwrap();
    assert_eq!(inputs.scheme, Scheme::LaxWendroff);
    assert_eq!(inputs.boundary, BoundaryPolicy::Periodic);
}
