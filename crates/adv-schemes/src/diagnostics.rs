//! Scalar diagnostics over one time level.

use adv_core::Real;

/// `sum |u[i+1] - u[i]|`.
pub fn total_variation(level: &[Real]) -> Real {
    level.windows(2).map(|w| (w[1] - w[0]).abs()).sum()
}

/// Discrete integral `dx * sum u[i]`.
pub fn mass(level: &[Real], dx: Real) -> Real {
    dx * level.iter().sum::<Real>()
}

/// `(min, max)` of a level, or `None` when it is empty.
pub fn extrema(level: &[Real]) -> Option<(Real, Real)> {
    let mut iter = level.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), u| (lo.min(u), hi.max(u))))
}
