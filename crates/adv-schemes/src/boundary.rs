//! Edge updates applied once per time level.

use adv_core::{AdvError, Real};

use crate::error::SchemeResult;
use crate::field::SolutionField;

/// How the two domain edges are set at each new time level.
///
/// Chosen once when a request is lowered; engines only ever call the
/// `apply_*` methods and never reinterpret the configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryPolicy {
    /// Fixed edge values. An unset `right` copies the previous level's last
    /// node, which behaves as a crude open (extrapolated) outflow edge.
    Dirichlet { left: Real, right: Option<Real> },
    /// Each edge takes the previous level's value from the opposite edge.
    Periodic,
}

impl BoundaryPolicy {
    pub fn dirichlet(left: Real) -> Self {
        BoundaryPolicy::Dirichlet { left, right: None }
    }

    pub fn dirichlet_both(left: Real, right: Real) -> Self {
        BoundaryPolicy::Dirichlet {
            left,
            right: Some(right),
        }
    }

    /// Write node 0 of `cur` from the policy and the completed level `prev`.
    #[inline]
    pub fn apply_left(&self, prev: &[Real], cur: &mut [Real]) {
        cur[0] = match *self {
            BoundaryPolicy::Dirichlet { left, .. } => left,
            BoundaryPolicy::Periodic => prev[prev.len() - 1],
        };
    }

    /// Write the last node of `cur`.
    #[inline]
    pub fn apply_right(&self, prev: &[Real], cur: &mut [Real]) {
        let last = cur.len() - 1;
        cur[last] = match *self {
            BoundaryPolicy::Dirichlet {
                right: Some(right), ..
            } => right,
            BoundaryPolicy::Dirichlet { right: None, .. } => prev[last],
            BoundaryPolicy::Periodic => prev[0],
        };
    }

    /// Write both edges of `cur`.
    pub fn apply_levels(&self, prev: &[Real], cur: &mut [Real]) {
        self.apply_left(prev, cur);
        self.apply_right(prev, cur);
    }

    /// Set both edges of time level `t` (`1 <= t < nt`) in `field`.
    pub fn apply(&self, field: &mut SolutionField, t: usize) -> SchemeResult<()> {
        if t == 0 || t >= field.nt() {
            return Err(AdvError::InvalidArg {
                what: "boundary level must satisfy 1 <= t < nt",
            }
            .into());
        }
        let (prev, cur) = field.split_levels(t);
        self.apply_levels(prev, cur);
        Ok(())
    }

    /// Value of the node just outside the left edge, as seen from `prev`.
    ///
    /// Periodic domains wrap to the last node; fixed edges have no ghost value.
    #[inline]
    pub(crate) fn left_ghost(&self, prev: &[Real]) -> Option<Real> {
        match self {
            BoundaryPolicy::Periodic => Some(prev[prev.len() - 1]),
            BoundaryPolicy::Dirichlet { .. } => None,
        }
    }

    /// Value of the node just outside the right edge.
    #[inline]
    pub(crate) fn right_ghost(&self, prev: &[Real]) -> Option<Real> {
        match self {
            BoundaryPolicy::Periodic => Some(prev[0]),
            BoundaryPolicy::Dirichlet { .. } => None,
        }
    }
}
