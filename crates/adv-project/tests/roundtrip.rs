use adv_project::*;

fn golden() -> SolveRequest {
    SolveRequest {
        scheme: SchemeDef::Upwind,
        c: 1.0,
        length: 1.0,
        nx: 5,
        nt: 3,
        dt: 0.2,
        initial_condition: InitialConditionDef::Values(vec![0.0, 0.0, 1.0, 0.0, 0.0]),
        boundary_conditions: Some(BoundaryConditionsDef::Edges(BoundaryEdgesDef {
            left: Some(0.0),
            right: None,
            periodic: false,
        })),
    }
}

#[test]
fn roundtrip_yaml_golden_request() {
    let request = golden();
    validate_request(&request).unwrap();

    let path = std::env::temp_dir().join("adv_project_roundtrip_golden.yaml");
    save_yaml(&path, &request).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(request, loaded);
}

#[test]
fn roundtrip_json_profile_request() {
    let request = SolveRequest {
        scheme: SchemeDef::Tvd,
        initial_condition: InitialConditionDef::Profile(ProfileDef::Sine {
            periods: 2.0,
            amplitude: 0.5,
        }),
        boundary_conditions: None,
        ..golden()
    };

    let path = std::env::temp_dir().join("adv_project_roundtrip_profile.json");
    save_json(&path, &request).unwrap();
    let loaded = load_request(&path).unwrap();

    assert_eq!(request, loaded);
}

#[test]
fn save_refuses_invalid_request() {
    let request = SolveRequest {
        nx: 1,
        ..golden()
    };
    let path = std::env::temp_dir().join("adv_project_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &request),
        Err(ProjectError::Validation(_))
    ));
}

#[test]
fn unknown_extension_is_rejected() {
    let path = std::path::Path::new("request.toml");
    assert!(matches!(
        load_request(path),
        Err(ProjectError::UnsupportedFormat(ext)) if ext == "toml"
    ));
}
