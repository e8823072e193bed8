//! Read-only queries over a completed run.

use std::fmt::Write as _;

use adv_core::units::{self, m, mps, s};
use adv_core::{GridSpec, Real};
use adv_schemes::{SolutionField, check_stability, max_stable_dt};

use crate::error::{AppError, AppResult};
use crate::run_service::RunResponse;

/// Compact description of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub scheme: String,
    pub courant: Real,
    pub node_count: usize,
    pub level_count: usize,
    pub t_end: Real,
    pub total_variation_ratio: Real,
    pub mass_change: Real,
}

pub fn get_run_summary(response: &RunResponse) -> RunSummary {
    let d = &response.diagnostics;
    let total_variation_ratio = if d.initial_total_variation > 0.0 {
        d.final_total_variation / d.initial_total_variation
    } else {
        1.0
    };
    RunSummary {
        scheme: response.scheme.to_string(),
        courant: response.courant,
        node_count: response.grid.nx(),
        level_count: response.grid.nt(),
        t_end: response.grid.t_end(),
        total_variation_ratio,
        mass_change: d.final_mass - d.initial_mass,
    }
}

/// Stability figures for a discretization, independent of any request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourantReport {
    pub dx: Real,
    pub courant: Real,
    pub stable: bool,
    /// Largest `dt` the gate accepts; `None` when `c == 0`.
    pub max_stable_dt: Option<Real>,
}

/// Courant number for speed `c` (m/s) on `nx` nodes over `length` (m) with
/// step `dt` (s).
pub fn courant_report(c: Real, length: Real, nx: usize, dt: Real) -> AppResult<CourantReport> {
    let grid = GridSpec::from_quantities(m(length), nx, 1, s(dt))?;
    let courant = units::courant(mps(c), s(grid.dt()), m(grid.dx()));
    Ok(CourantReport {
        dx: grid.dx(),
        courant,
        stable: check_stability(c, &grid).is_ok(),
        max_stable_dt: max_stable_dt(c, grid.dx()),
    })
}

/// All node values at time level `t`.
pub fn level(field: &SolutionField, t: usize) -> AppResult<&[Real]> {
    field.column(t).ok_or(AppError::LevelOutOfRange {
        level: t,
        nt: field.nt(),
    })
}

/// Time history of node `x`.
pub fn node_history(field: &SolutionField, x: usize) -> AppResult<Vec<Real>> {
    field.row(x).ok_or_else(|| {
        AppError::InvalidInput(format!("node {x} out of range (nx = {})", field.nx()))
    })
}

/// CSV (`x,u`) of one time level.
pub fn column_csv(response: &RunResponse, t: usize) -> AppResult<String> {
    let values = level(&response.solution, t)?;
    let mut csv = String::from("x,u\n");
    for (i, u) in values.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = writeln!(csv, "{},{}", response.grid.x(i), u);
    }
    Ok(csv)
}
