//! Flux limiters for the TVD scheme.
//!
//! A limiter maps the ratio `r` of consecutive gradients to a weight on the
//! high-order flux correction. `phi = 0` falls back to first-order upwind,
//! `phi = 1` recovers Lax-Wendroff.

use adv_core::Real;

/// Guard added to the downwind difference of a gradient ratio.
pub const DEFAULT_EPSILON: Real = 1e-10;

/// Gradient ratio `upwind / (downwind + eps)`.
#[inline]
pub fn gradient_ratio(upwind_diff: Real, downwind_diff: Real, eps: Real) -> Real {
    upwind_diff / (downwind_diff + eps)
}

/// Superbee: `max(0, min(2r, 1), min(r, 2))`.
///
/// NaN ratios map to 0.
#[inline]
pub fn superbee(r: Real) -> Real {
    if r.is_nan() {
        return 0.0;
    }
    0.0_f64.max((2.0 * r).min(1.0)).max(r.min(2.0))
}

/// Superbee applied element-wise.
pub fn superbee_slice(r: &[Real]) -> Vec<Real> {
    r.iter().copied().map(superbee).collect()
}

/// Limiter used by [`crate::Tvd`].
///
/// Implementations must return a non-negative coefficient.
pub trait FluxLimiter: Send + Sync {
    fn name(&self) -> &'static str;

    fn phi(&self, r: Real) -> Real;

    fn phi_slice(&self, r: &[Real], out: &mut [Real]) {
        for (o, &ri) in out.iter_mut().zip(r) {
            *o = self.phi(ri);
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Superbee;

impl FluxLimiter for Superbee {
    fn name(&self) -> &'static str {
        "superbee"
    }

    #[inline]
    fn phi(&self, r: Real) -> Real {
        superbee(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reference_values() {
        assert_eq!(superbee(0.0), 0.0);
        assert_eq!(superbee(0.5), 1.0);
        assert_eq!(superbee(1.0), 1.0);
        assert_eq!(superbee(1.5), 1.5);
        assert_eq!(superbee(3.0), 2.0);
        assert_eq!(superbee(0.25), 0.5);
    }

    #[test]
    fn opposite_gradients_are_fully_limited() {
        assert_eq!(superbee(-0.7), 0.0);
        assert_eq!(superbee(Real::NEG_INFINITY), 0.0);
        assert_eq!(superbee(Real::NAN), 0.0);
    }

    #[test]
    fn slice_and_scalar_agree() {
        let r = [-1.0, 0.0, 0.25, 0.5, 1.0, 1.5, 4.0];
        let expected: Vec<Real> = r.iter().map(|&x| superbee(x)).collect();
        assert_eq!(superbee_slice(&r), expected);

        let mut out = [0.0; 7];
        Superbee.phi_slice(&r, &mut out);
        assert_eq!(out.to_vec(), expected);
    }

    #[test]
    fn ratio_guard_avoids_division_by_zero() {
        let r = gradient_ratio(1.0, 0.0, DEFAULT_EPSILON);
        assert!(r.is_finite());
        assert_eq!(superbee(r), 2.0);
        assert_eq!(gradient_ratio(0.0, 0.0, DEFAULT_EPSILON), 0.0);
    }

    proptest! {
        #[test]
        fn superbee_stays_in_sweby_region(r in -10.0_f64..10.0) {
            let phi = superbee(r);
            prop_assert!(phi >= 0.0);
            prop_assert!(phi <= 2.0);
            if r >= 0.0 {
                prop_assert!(phi <= 2.0 * r + 1e-15);
            }
        }
    }
}
