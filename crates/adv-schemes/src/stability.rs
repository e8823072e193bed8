//! CFL stability gate.

use adv_core::{GridSpec, Real};

use crate::error::{SchemeError, SchemeResult};

/// Courant number `c * dt / dx`.
#[inline]
pub fn courant_number(c: Real, dt: Real, dx: Real) -> Real {
    c * dt / dx
}

/// Compute the Courant number for `c` on `grid` and reject unstable setups.
///
/// The bound is `|courant| <= 1` for every scheme, so negative speeds are held
/// to the same limit as positive ones. A non-finite courant number is rejected.
pub fn check_stability(c: Real, grid: &GridSpec) -> SchemeResult<Real> {
    let courant = courant_number(c, grid.dt(), grid.dx());
    if !courant.is_finite() || courant.abs() > 1.0 {
        return Err(SchemeError::Stability { courant });
    }
    Ok(courant)
}

/// Largest time step that keeps `|courant| <= 1`, or `None` when `c == 0`.
pub fn max_stable_dt(c: Real, dx: Real) -> Option<Real> {
    if c == 0.0 || !c.is_finite() {
        None
    } else {
        Some(dx / c.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(dt: Real) -> GridSpec {
        GridSpec::new(1.0, 5, 3, dt).unwrap()
    }

    #[test]
    fn golden_courant() {
        let nu = check_stability(1.0, &grid(0.2)).unwrap();
        assert!((nu - 0.8).abs() < 1e-15);
    }

    #[test]
    fn unit_courant_passes_both_signs() {
        assert_eq!(check_stability(1.0, &grid(0.25)).unwrap(), 1.0);
        assert_eq!(check_stability(-1.0, &grid(0.25)).unwrap(), -1.0);
    }

    #[test]
    fn negative_speed_uses_absolute_value() {
        let err = check_stability(-2.0, &grid(0.25)).unwrap_err();
        assert_eq!(err, SchemeError::Stability { courant: -2.0 });
    }

    #[test]
    fn nan_speed_is_rejected() {
        assert!(check_stability(Real::NAN, &grid(0.25)).is_err());
    }

    #[test]
    fn max_dt_reaches_unit_courant() {
        let dt = max_stable_dt(-2.0, 0.5).unwrap();
        assert_eq!(dt, 0.25);
        assert!(max_stable_dt(0.0, 0.5).is_none());
    }

    proptest! {
        #[test]
        fn gate_threshold(nu in -3.0_f64..3.0) {
            // dx = 0.25, dt = 0.25 so courant == c
            let result = check_stability(nu, &grid(0.25));
            if nu.abs() <= 1.0 {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.is_err());
            }
        }
    }
}
