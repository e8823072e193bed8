//! Run execution service.

use std::path::Path;
use std::time::Instant;

use adv_core::timing::Timer;
use adv_core::{GridSpec, Real};
use adv_project::{SolveRequest, SolverInputs, load_request, lower_request};
use adv_schemes::{
    Scheme, SolutionField, SolveOptions, SolvePhase, StepEvent, check_stability, extrema, mass,
    solve_with, total_variation,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::AppResult;
use crate::progress::{RunProgressEvent, RunStage};

/// Where the request document comes from.
#[derive(Debug, Clone, Copy)]
pub enum RequestSource<'a> {
    /// YAML or JSON file, chosen by extension.
    Path(&'a Path),
    Document(&'a SolveRequest),
}

/// Options for running a solve.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Replace the scheme named in the request.
    pub scheme_override: Option<Scheme>,
    pub solve: SolveOptions,
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub source: RequestSource<'a>,
    pub options: RunOptions,
}

impl<'a> RunRequest<'a> {
    pub fn from_path(path: &'a Path) -> Self {
        Self {
            source: RequestSource::Path(path),
            options: RunOptions::default(),
        }
    }

    pub fn from_document(document: &'a SolveRequest) -> Self {
        Self {
            source: RequestSource::Document(document),
            options: RunOptions::default(),
        }
    }
}

/// Wall clock breakdown of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunTimingSummary {
    pub load_time_s: f64,
    pub lower_time_s: f64,
    pub solve_time_s: f64,
    pub diagnostics_time_s: f64,
    pub total_time_s: f64,
}

/// Scalar summaries of the first and last time levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Diagnostics {
    pub initial_total_variation: Real,
    pub final_total_variation: Real,
    pub initial_mass: Real,
    pub final_mass: Real,
    pub final_min: Real,
    pub final_max: Real,
}

impl Diagnostics {
    pub fn of(field: &SolutionField, dx: Real) -> Self {
        let (final_min, final_max) = extrema(field.final_level()).unwrap_or((0.0, 0.0));
        Self {
            initial_total_variation: total_variation(field.initial()),
            final_total_variation: total_variation(field.final_level()),
            initial_mass: mass(field.initial(), dx),
            final_mass: mass(field.final_level(), dx),
            final_min,
            final_max,
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub scheme: Scheme,
    pub c: Real,
    pub courant: Real,
    pub grid: GridSpec,
    pub solution: SolutionField,
    pub diagnostics: Diagnostics,
    pub timing: RunTimingSummary,
}

/// Serializable view of a run: the `solution` matrix is `[space][time]`.
///
/// Grid fields (`length`, `nx`, `nt`, `dt`, `dx`) sit at the top level.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionDocument {
    pub scheme: String,
    pub c: Real,
    pub courant: Real,
    #[serde(flatten)]
    pub grid: GridSpec,
    pub solution: Vec<Vec<Real>>,
    pub diagnostics: Diagnostics,
}

impl RunResponse {
    pub fn to_document(&self) -> SolutionDocument {
        SolutionDocument {
            scheme: self.scheme.to_string(),
            c: self.c,
            courant: self.courant,
            grid: self.grid,
            solution: self.solution.to_rows(),
            diagnostics: self.diagnostics,
        }
    }

    pub fn to_json(&self, pretty: bool) -> AppResult<String> {
        let document = self.to_document();
        let json = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(json)
    }
}

/// A lowered request that passed the stability gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckedRequest {
    pub scheme: Scheme,
    pub c: Real,
    pub courant: Real,
    pub grid: GridSpec,
}

/// Load, validate and gate a request without stepping it.
///
/// An unstable request is an error ([`crate::AppError::Unstable`]).
pub fn check(request: &RunRequest<'_>) -> AppResult<CheckedRequest> {
    let inputs = match request.source {
        RequestSource::Path(path) => lower_request(&load_request(path)?)?,
        RequestSource::Document(document) => lower_request(document)?,
    };
    let scheme = request.options.scheme_override.unwrap_or(inputs.scheme);
    let courant = check_stability(inputs.c, &inputs.grid)?;
    Ok(CheckedRequest {
        scheme,
        c: inputs.c,
        courant,
        grid: inputs.grid,
    })
}

/// Execute a run.
pub fn run(request: &RunRequest<'_>) -> AppResult<RunResponse> {
    run_with_progress(request, None)
}

/// Execute a run, reporting stages and completed time levels.
pub fn run_with_progress(
    request: &RunRequest<'_>,
    mut progress: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let total_timer = Timer::start("run total");
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    let mut emit = |event: RunProgressEvent| {
        if let Some(cb) = progress.as_mut() {
            cb(event);
        }
    };

    emit(RunProgressEvent::stage(
        RunStage::LoadingRequest,
        started.elapsed().as_secs_f64(),
        None,
    ));
    let load_start = Instant::now();
    let loaded;
    let document = match request.source {
        RequestSource::Path(path) => {
            loaded = load_request(path)?;
            &loaded
        }
        RequestSource::Document(document) => document,
    };
    timing.load_time_s = load_start.elapsed().as_secs_f64();

    emit(RunProgressEvent::stage(
        RunStage::Lowering,
        started.elapsed().as_secs_f64(),
        None,
    ));
    let lower_start = Instant::now();
    let SolverInputs {
        scheme,
        c,
        grid,
        initial,
        boundary,
    } = lower_request(document)?;
    let scheme = request.options.scheme_override.unwrap_or(scheme);
    timing.lower_time_s = lower_start.elapsed().as_secs_f64();

    emit(RunProgressEvent::stage(
        RunStage::CheckingStability,
        started.elapsed().as_secs_f64(),
        None,
    ));
    let courant = match check_stability(c, &grid) {
        Ok(courant) => courant,
        Err(err) => {
            warn!(%scheme, error = %err, "run rejected by stability gate");
            emit(RunProgressEvent::stage(
                RunStage::Failed,
                started.elapsed().as_secs_f64(),
                Some(err.to_string()),
            ));
            return Err(err.into());
        }
    };
    info!(%scheme, c, courant, nx = grid.nx(), nt = grid.nt(), "starting run");

    let solve_timer = Timer::start("solve");
    let solution = {
        let mut on_step = |step: StepEvent| {
            if step.phase == SolvePhase::Stepping {
                emit(RunProgressEvent {
                    scheme: Some(scheme),
                    stage: RunStage::Stepping,
                    elapsed_wall_s: started.elapsed().as_secs_f64(),
                    level: Some(step.level),
                    total_levels: Some(step.total_levels),
                    message: None,
                });
            }
        };
        solve_with(
            scheme,
            c,
            &grid,
            &initial,
            &boundary,
            &request.options.solve,
            Some(&mut on_step),
        )?
    };
    timing.solve_time_s = solve_timer.elapsed_s();
    solve_timer.stop_and_print();

    emit(RunProgressEvent::stage(
        RunStage::ComputingDiagnostics,
        started.elapsed().as_secs_f64(),
        None,
    ));
    let diag_start = Instant::now();
    let diagnostics = Diagnostics::of(&solution, grid.dx());
    timing.diagnostics_time_s = diag_start.elapsed().as_secs_f64();

    timing.total_time_s = total_timer.elapsed_s();
    total_timer.stop_and_print();
    info!(
        %scheme,
        total_time_s = timing.total_time_s,
        final_total_variation = diagnostics.final_total_variation,
        "run complete"
    );
    emit(RunProgressEvent::stage(
        RunStage::Completed,
        started.elapsed().as_secs_f64(),
        None,
    ));

    Ok(RunResponse {
        scheme,
        c,
        courant,
        grid,
        solution,
        diagnostics,
        timing,
    })
}
