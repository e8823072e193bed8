//! First-order upwind scheme.
//!
//! `u[x, t] = u[x, t-1] - courant * (u[x, t-1] - u[x-1, t-1])` for every node
//! `x >= 1`; node 0 comes from the boundary policy. Only the left edge is set
//! by the policy, the last node falls out of the interior update.
//!
//! The stencil looks left, so the scheme assumes `c > 0` and is stable for
//! `0 <= courant <= 1`. A negative speed passes the (symmetric) stability gate
//! but is still integrated with the same left-biased stencil, which amplifies
//! errors; the engine logs a warning instead of switching stencils.

use adv_core::{GridSpec, Real};
use tracing::warn;

use crate::boundary::BoundaryPolicy;
use crate::engine::{SchemeEngine, SolveOptions, StepContext, run_engine, sweep};
use crate::error::SchemeResult;
use crate::field::SolutionField;

#[derive(Clone, Copy, Debug, Default)]
pub struct Upwind;

impl SchemeEngine for Upwind {
    fn name(&self) -> &'static str {
        "upwind"
    }

    fn prepare(&mut self, ctx: &StepContext<'_>) {
        if ctx.c < 0.0 {
            warn!(
                c = ctx.c,
                "upwind stencil assumes c > 0; negative speed is integrated as-is"
            );
        }
    }

    fn advance(&mut self, ctx: &StepContext<'_>, prev: &[Real], cur: &mut [Real]) {
        ctx.boundary.apply_left(prev, cur);
        let nu = ctx.courant;
        sweep(ctx, cur, 1..prev.len(), |x| {
            prev[x] - nu * (prev[x] - prev[x - 1])
        });
    }
}

/// Upwind solve from raw discretization parameters.
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

/// Upwind solve on an existing grid.
pub fn solve_on(
    c: Real,
    grid: &GridSpec,
    initial: &[Real],
    boundary: &BoundaryPolicy,
) -> SchemeResult<SolutionField> {
    run_engine(
        &mut Upwind,
        c,
        grid,
        initial,
        boundary,
        &SolveOptions::default(),
        None,
    )
}
