//! Second-order Lax-Wendroff scheme.
//!
//! Central difference plus a `courant^2` diffusion correction. Both edges are
//! set from the boundary policy first, then interior nodes `1..=nx-2`.
//! Dispersive error shows up as oscillations next to sharp fronts.

use adv_core::{GridSpec, Real};

use crate::boundary::BoundaryPolicy;
use crate::engine::{SchemeEngine, SolveOptions, StepContext, run_engine, sweep};
use crate::error::SchemeResult;
use crate::field::SolutionField;

#[derive(Clone, Copy, Debug, Default)]
pub struct LaxWendroff;

impl SchemeEngine for LaxWendroff {
    fn name(&self) -> &'static str {
        "lax_wendroff"
    }

    fn advance(&mut self, ctx: &StepContext<'_>, prev: &[Real], cur: &mut [Real]) {
        ctx.boundary.apply_levels(prev, cur);
        let nu = ctx.courant;
        let half_nu = 0.5 * nu;
        let half_nu2 = 0.5 * nu * nu;
        let last = prev.len() - 1;
        sweep(ctx, cur, 1..last, |x| {
            let (ul, uc, ur) = (prev[x - 1], prev[x], prev[x + 1]);
            uc - half_nu * (ur - ul) + half_nu2 * (ur - 2.0 * uc + ul)
        });
    }
}

/// Lax-Wendroff solve from raw discretization parameters.
pub fn solve(
    c: Real,
    length: Real,
    nx: usize,
    nt: usize,
    dt: Real,
    initial: &[Real],
    boundary: BoundaryPolicy,
) -> SchemeResult<SolutionField> {
    let grid = GridSpec::new(length, nx, nt, dt)?;
    solve_on(c, &grid, initial, &boundary)
}

/// Lax-Wendroff solve on an existing grid.
pub fn solve_on(
    c: Real,
    grid: &GridSpec,
    initial: &[Real],
    boundary: &BoundaryPolicy,
) -> SchemeResult<SolutionField> {
    run_engine(
        &mut LaxWendroff,
        c,
        grid,
        initial,
        boundary,
        &SolveOptions::default(),
        None,
    )
}
