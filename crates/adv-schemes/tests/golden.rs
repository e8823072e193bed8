//! End-to-end regressions shared by every scheme.

use adv_core::{GridSpec, Real, Tolerances, slices_nearly_equal};
use adv_schemes::{BoundaryPolicy, Scheme, SchemeError, lax_wendroff, solve, tvd, upwind};

const PULSE: [Real; 5] = [0.0, 0.0, 1.0, 0.0, 0.0];

fn boundaries() -> [BoundaryPolicy; 3] {
    [
        BoundaryPolicy::dirichlet(0.0),
        BoundaryPolicy::dirichlet_both(0.25, -0.5),
        BoundaryPolicy::Periodic,
    ]
}

#[test]
fn upwind_pulse_regression() {
    // c = 1, length = 1, nx = 5, nt = 3, dt = 0.2 -> dx = 0.25, courant = 0.8
    let grid = GridSpec::new(1.0, 5, 3, 0.2).unwrap();
    assert_eq!(grid.dx(), 0.25);

    let field = solve(
        Scheme::Upwind,
        1.0,
        &grid,
        &PULSE,
        &BoundaryPolicy::dirichlet(0.0),
    )
    .unwrap();

    assert_eq!(field.nx(), 5);
    assert_eq!(field.nt(), 3);
    assert!(slices_nearly_equal(
        field.column(1).unwrap(),
        &[0.0, 0.0, 0.2, 0.8, 0.0],
        Tolerances::default()
    ));
}

#[test]
fn raw_parameter_entry_points_agree_with_dispatcher() {
    let grid = GridSpec::new(1.0, 5, 4, 0.2).unwrap();
    let boundary = BoundaryPolicy::Periodic;
    let via_modules = [
        upwind::solve(1.0, 1.0, 5, 4, 0.2, &PULSE, boundary).unwrap(),
        lax_wendroff::solve(1.0, 1.0, 5, 4, 0.2, &PULSE, boundary).unwrap(),
        tvd::solve(1.0, 1.0, 5, 4, 0.2, &PULSE, boundary).unwrap(),
    ];
    for (scheme, expected) in Scheme::ALL.into_iter().zip(via_modules) {
        let field = solve(scheme, 1.0, &grid, &PULSE, &boundary).unwrap();
        assert_eq!(field, expected, "{scheme}");
    }
}

#[test]
fn initial_column_is_untouched() {
    let grid = GridSpec::new(1.0, 5, 6, 0.1).unwrap();
    for scheme in Scheme::ALL {
        for boundary in boundaries() {
            for c in [1.0, -1.0, 0.0] {
                let field = solve(scheme, c, &grid, &PULSE, &boundary).unwrap();
                assert_eq!(field.initial(), &PULSE, "{scheme} {boundary:?} c={c}");
            }
        }
    }
}

#[test]
fn unit_courant_is_admitted_for_both_signs() {
    // dx = 0.25, dt = 0.25
    let grid = GridSpec::new(1.0, 5, 4, 0.25).unwrap();
    for scheme in Scheme::ALL {
        for c in [1.0, -1.0] {
            let result = solve(scheme, c, &grid, &PULSE, &BoundaryPolicy::Periodic);
            assert!(result.is_ok(), "{scheme} c={c}: {result:?}");
        }
    }
}

#[test]
fn courant_above_one_is_rejected_before_stepping() {
    let grid = GridSpec::new(1.0, 5, 4, 0.25).unwrap();
    for scheme in Scheme::ALL {
        for c in [1.0 + 1e-9, -1.0 - 1e-9, 4.0, -4.0] {
            let err = solve(scheme, c, &grid, &PULSE, &BoundaryPolicy::Periodic).unwrap_err();
            match err {
                SchemeError::Stability { courant } => assert!(courant.abs() > 1.0),
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}

#[test]
fn wrong_initial_length_is_rejected() {
    let grid = GridSpec::new(1.0, 5, 4, 0.1).unwrap();
    for scheme in Scheme::ALL {
        let err = solve(scheme, 1.0, &grid, &[0.0; 4], &BoundaryPolicy::Periodic).unwrap_err();
        assert!(matches!(err, SchemeError::Setup(_)));
    }
}
