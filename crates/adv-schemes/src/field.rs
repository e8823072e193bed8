//! Dense space-time solution field.

use adv_core::{AdvError, GridSpec, Real};
use nalgebra::DMatrix;

use crate::error::SchemeResult;

/// `nx x nt` matrix of solution values, indexed `[space][time]`.
///
/// Column 0 holds the initial condition. Every other column is written once,
/// by a scheme engine, after its predecessor is complete. Only the engines in
/// this crate can mutate a field; callers receive it by value.
#[derive(Clone, Debug, PartialEq)]
pub struct SolutionField {
    data: DMatrix<Real>,
}

impl SolutionField {
    /// Allocate an `nx x nt` field and place `initial` in column 0.
    pub(crate) fn with_initial(grid: &GridSpec, initial: &[Real]) -> SchemeResult<Self> {
        if initial.len() != grid.nx() {
            return Err(AdvError::LengthMismatch {
                what: "initial condition",
                expected: grid.nx(),
                got: initial.len(),
            }
            .into());
        }
        let mut data = DMatrix::zeros(grid.nx(), grid.nt());
        data.column_mut(0).copy_from_slice(initial);
        Ok(Self { data })
    }

    /// Previous level (read-only) and level `t` (writable).
    ///
    /// Storage is column-major, so each time level is one contiguous slice and
    /// the split never aliases.
    pub(crate) fn split_levels(&mut self, t: usize) -> (&[Real], &mut [Real]) {
        debug_assert!(t >= 1 && t < self.nt());
        let nx = self.nx();
        let (before, after) = self.data.as_mut_slice().split_at_mut(t * nx);
        (&before[(t - 1) * nx..], &mut after[..nx])
    }

    /// Number of spatial nodes.
    pub fn nx(&self) -> usize {
        self.data.nrows()
    }

    /// Number of time levels, including the initial one.
    pub fn nt(&self) -> usize {
        self.data.ncols()
    }

    pub fn get(&self, x: usize, t: usize) -> Option<Real> {
        self.data.get((x, t)).copied()
    }

    /// All nodes at time level `t`.
    pub fn column(&self, t: usize) -> Option<&[Real]> {
        if t >= self.nt() {
            return None;
        }
        let nx = self.nx();
        Some(&self.data.as_slice()[t * nx..(t + 1) * nx])
    }

    pub fn initial(&self) -> &[Real] {
        &self.data.as_slice()[..self.nx()]
    }

    pub fn final_level(&self) -> &[Real] {
        let nx = self.nx();
        let start = (self.nt() - 1) * nx;
        &self.data.as_slice()[start..start + nx]
    }

    /// Time history of node `x`.
    pub fn row(&self, x: usize) -> Option<Vec<Real>> {
        if x >= self.nx() {
            return None;
        }
        Some(self.data.row(x).iter().copied().collect())
    }

    /// Nested rows `[space][time]`, the layout the JSON response uses.
    pub fn to_rows(&self) -> Vec<Vec<Real>> {
        self.data
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}
