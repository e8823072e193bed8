//! Scheme engine trait and the shared time-stepping driver.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use adv_core::{AdvError, GridSpec, Real};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::boundary::BoundaryPolicy;
use crate::error::SchemeResult;
use crate::field::SolutionField;
use crate::lax_wendroff::LaxWendroff;
use crate::limiter::DEFAULT_EPSILON;
use crate::stability::check_stability;
use crate::tvd::Tvd;
use crate::upwind::Upwind;

/// Scheme selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// First-order upwind (default).
    #[default]
    Upwind,
    /// Second-order Lax-Wendroff.
    LaxWendroff,
    /// Flux-limited TVD scheme with the Superbee limiter.
    Tvd,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Upwind, Scheme::LaxWendroff, Scheme::Tvd];

    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Upwind => "upwind",
            Scheme::LaxWendroff => "lax_wendroff",
            Scheme::Tvd => "tvd",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = AdvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "upwind" => Ok(Scheme::Upwind),
            "lax_wendroff" | "laxwendroff" | "lw" => Ok(Scheme::LaxWendroff),
            "tvd" | "superbee" => Ok(Scheme::Tvd),
            _ => Err(AdvError::InvalidArg {
                what: "unknown scheme (expected upwind, lax_wendroff or tvd)",
            }),
        }
    }
}

/// Tuning knobs that do not change the discrete equations.
#[derive(Clone, Copy, Debug)]
pub struct SolveOptions {
    /// Sweep interior nodes with rayon when at least this many are updated
    /// per level.
    pub parallel_threshold: usize,
    /// Guard in the TVD gradient ratio denominator.
    pub limiter_epsilon: Real,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            limiter_epsilon: DEFAULT_EPSILON,
        }
    }
}

impl SolveOptions {
    pub fn parallel(threshold: usize) -> Self {
        Self {
            parallel_threshold: threshold,
            ..Self::default()
        }
    }
}

/// Per-solve constants handed to an engine at every level.
#[derive(Clone, Copy, Debug)]
pub struct StepContext<'a> {
    pub c: Real,
    pub courant: Real,
    pub grid: &'a GridSpec,
    pub boundary: &'a BoundaryPolicy,
    pub options: &'a SolveOptions,
}

impl StepContext<'_> {
    /// `dt / dx`.
    #[inline]
    pub fn lambda(&self) -> Real {
        self.grid.dt() / self.grid.dx()
    }

    fn parallel_for(&self, nodes: usize) -> bool {
        nodes >= self.options.parallel_threshold
    }
}

/// Lifecycle of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolvePhase {
    Initialized,
    Stepping,
    Complete,
    Failed,
}

/// Progress notification emitted by [`solve_with`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepEvent {
    pub phase: SolvePhase,
    /// Last completed time level.
    pub level: usize,
    pub total_levels: usize,
    pub courant: Option<Real>,
}

/// One explicit time-stepping method.
///
/// `advance` fills time level `cur` from the completed level `prev`. It must
/// write every node of `cur` it owns and read only from `prev`.
pub trait SchemeEngine {
    fn name(&self) -> &'static str;

    /// Called once after the stability gate passes, before the first level.
    fn prepare(&mut self, _ctx: &StepContext<'_>) {}

    fn advance(&mut self, ctx: &StepContext<'_>, prev: &[Real], cur: &mut [Real]);
}

/// Write `cur[i] = update(i)` for every `i` in `nodes`.
///
/// Nodes of one level are independent, so large sweeps go through rayon.
pub(crate) fn sweep<F>(ctx: &StepContext<'_>, cur: &mut [Real], nodes: Range<usize>, update: F)
where
    F: Fn(usize) -> Real + Sync + Send,
{
    let start = nodes.start;
    let span = &mut cur[nodes];
    if ctx.parallel_for(span.len()) {
        span.par_iter_mut()
            .enumerate()
            .for_each(|(k, u)| *u = update(start + k));
    } else {
        for (k, u) in span.iter_mut().enumerate() {
            *u = update(start + k);
        }
    }
}

/// Gate, allocate, then step every level in order.
///
/// Nothing is allocated or stepped unless the stability gate passes.
pub fn run_engine<E: SchemeEngine>(
    engine: &mut E,
    c: Real,
    grid: &GridSpec,
    initial: &[Real],
    boundary: &BoundaryPolicy,
    options: &SolveOptions,
    mut on_step: Option<&mut dyn FnMut(StepEvent)>,
) -> SchemeResult<SolutionField> {
    let total_levels = grid.nt();
    let mut emit = |phase, level, courant| {
        if let Some(cb) = on_step.as_mut() {
            cb(StepEvent {
                phase,
                level,
                total_levels,
                courant,
            });
        }
    };
    emit(SolvePhase::Initialized, 0, None);

    let gated = check_stability(c, grid)
        .and_then(|courant| SolutionField::with_initial(grid, initial).map(|f| (courant, f)));
    let (courant, mut field) = match gated {
        Ok(ok) => ok,
        Err(err) => {
            debug!(scheme = engine.name(), error = %err, "solve rejected");
            emit(SolvePhase::Failed, 0, err.courant());
            return Err(err);
        }
    };

    debug!(
        scheme = engine.name(),
        c,
        courant,
        nx = grid.nx(),
        nt = grid.nt(),
        dx = grid.dx(),
        dt = grid.dt(),
        "starting solve"
    );

    let ctx = StepContext {
        c,
        courant,
        grid,
        boundary,
        options,
    };
    engine.prepare(&ctx);
    for t in 1..total_levels {
        let (prev, cur) = field.split_levels(t);
        engine.advance(&ctx, prev, cur);
        trace!(level = t, "level complete");
        emit(SolvePhase::Stepping, t, Some(courant));
    }

    emit(SolvePhase::Complete, total_levels - 1, Some(courant));
    Ok(field)
}

/// Solve with the chosen scheme and default options.
pub fn solve(
    scheme: Scheme,
    c: Real,
    grid: &GridSpec,
    initial: &[Real],
    boundary: &BoundaryPolicy,
) -> SchemeResult<SolutionField> {
    solve_with(
        scheme,
        c,
        grid,
        initial,
        boundary,
        &SolveOptions::default(),
        None,
    )
}

/// Solve with the chosen scheme, explicit options and optional progress hook.
pub fn solve_with(
    scheme: Scheme,
    c: Real,
    grid: &GridSpec,
    initial: &[Real],
    boundary: &BoundaryPolicy,
    options: &SolveOptions,
    on_step: Option<&mut dyn FnMut(StepEvent)>,
) -> SchemeResult<SolutionField> {
    match scheme {
        Scheme::Upwind => run_engine(&mut Upwind, c, grid, initial, boundary, options, on_step),
        Scheme::LaxWendroff => run_engine(
            &mut LaxWendroff,
            c,
            grid,
            initial,
            boundary,
            options,
            on_step,
        ),
        Scheme::Tvd => run_engine(
            &mut Tvd::superbee(grid.nx()),
            c,
            grid,
            initial,
            boundary,
            options,
            on_step,
        ),
    }
}
