use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use adv_app::{
    AppError, AppResult, RunOptions, RunProgressEvent, RunRequest, RunStage, query, run_service,
};
use adv_schemes::{Scheme, SolveOptions};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "adv-cli")]
#[command(about = "1D linear advection solver (upwind, Lax-Wendroff, TVD)", long_about = None)]
struct Cli {
    /// Print per-phase wall-clock timings (same as setting ADV_TIMING)
    #[arg(long, global = true)]
    timing: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a request file and check it against the CFL limit
    Validate {
        /// Path to the request (YAML or JSON)
        request_path: PathBuf,
    },
    /// Solve a request and write the solution as JSON
    Solve {
        /// Path to the request (YAML or JSON)
        request_path: PathBuf,
        /// Override the scheme named in the request (upwind, lax_wendroff, tvd)
        #[arg(long)]
        scheme: Option<Scheme>,
        /// Output JSON file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
        /// Sweep nodes in parallel once a level has this many interior nodes
        #[arg(long)]
        parallel_threshold: Option<usize>,
    },
    /// Compute the Courant number for a discretization
    Courant {
        #[arg(long)]
        c: f64,
        #[arg(long)]
        length: f64,
        #[arg(long)]
        nx: usize,
        #[arg(long)]
        dt: f64,
    },
    /// Export one time level of a solved request as CSV
    ExportColumn {
        /// Path to the request (YAML or JSON)
        request_path: PathBuf,
        /// Time level (0 = initial condition)
        level: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing (stderr keeps stdout clean for JSON/CSV)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.timing {
        adv_core::timing::enable_timing();
    }

    match cli.command {
        Commands::Validate { request_path } => cmd_validate(&request_path),
        Commands::Solve {
            request_path,
            scheme,
            output,
            pretty,
            parallel_threshold,
        } => cmd_solve(
            &request_path,
            scheme,
            output.as_deref(),
            pretty,
            parallel_threshold,
        ),
        Commands::Courant { c, length, nx, dt } => cmd_courant(c, length, nx, dt),
        Commands::ExportColumn {
            request_path,
            level,
            output,
        } => cmd_export_column(&request_path, level, output.as_deref()),
    }
}

fn cmd_validate(request_path: &Path) -> AppResult<()> {
    eprintln!("Validating request: {}", request_path.display());
    let checked = match run_service::check(&RunRequest::from_path(request_path)) {
        Ok(checked) => checked,
        Err(err) => {
            eprintln!("✗ {}", err);
            return Err(err);
        }
    };
    eprintln!("✓ Request is valid");
    eprintln!(
        "  scheme={}  nx={}  nt={}  dx={:.6}  courant={:.4}",
        checked.scheme,
        checked.grid.nx(),
        checked.grid.nt(),
        checked.grid.dx(),
        checked.courant
    );
    Ok(())
}

fn cmd_solve(
    request_path: &Path,
    scheme: Option<Scheme>,
    output: Option<&Path>,
    pretty: bool,
    parallel_threshold: Option<usize>,
) -> AppResult<()> {
    let solve = parallel_threshold.map_or_else(SolveOptions::default, SolveOptions::parallel);
    let request = RunRequest {
        options: RunOptions {
            scheme_override: scheme,
            solve,
        },
        ..RunRequest::from_path(request_path)
    };

    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let response = run_service::run_with_progress(
        &request,
        Some(&mut |event: RunProgressEvent| {
            let emit_now = last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    );
    clear_progress_line();
    let response = response?;

    let summary = query::get_run_summary(&response);
    info!(
        scheme = %summary.scheme,
        courant = summary.courant,
        "solve finished"
    );
    eprintln!(
        "✓ Solved with {} (courant = {:.4})",
        summary.scheme, summary.courant
    );
    eprintln!(
        "  Levels: {}  Nodes: {}  t_end: {:.4}",
        summary.level_count, summary.node_count, summary.t_end
    );
    eprintln!(
        "  TV ratio: {:.4}  mass change: {:.3e}",
        summary.total_variation_ratio, summary.mass_change
    );
    print_timing_summary(&response.timing);

    let json = response.to_json(pretty)?;
    if let Some(path) = output {
        std::fs::write(path, json).map_err(|source| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        eprintln!("✓ Wrote solution to {}", path.display());
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn cmd_courant(c: f64, length: f64, nx: usize, dt: f64) -> AppResult<()> {
    let report = query::courant_report(c, length, nx, dt)?;
    println!("dx = {}", report.dx);
    println!("courant = {}", report.courant);
    if report.stable {
        println!("stable (|courant| <= 1)");
    } else {
        warn!(courant = report.courant, "time step violates the CFL limit");
        println!("unstable (|courant| > 1)");
    }
    if let Some(dt_max) = report.max_stable_dt {
        println!("max stable dt = {}", dt_max);
    }
    Ok(())
}

fn cmd_export_column(request_path: &Path, level: usize, output: Option<&Path>) -> AppResult<()> {
    let response = run_service::run(&RunRequest::from_path(request_path))?;
    let csv = query::column_csv(&response, level)?;

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv).map_err(|source| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        eprintln!(
            "✓ Exported level {} ({} nodes) to {}",
            level,
            response.grid.nx(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(100));
    let _ = io::stderr().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (event.stage, event.fraction_complete()) {
        (RunStage::Stepping, Some(fraction)) => {
            let width = 28usize;
            let filled = ((fraction * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            eprint!(
                "\r[{}] {:>6.2}%  level={}/{}  elapsed={:.1}s",
                bar,
                fraction * 100.0,
                event.level.unwrap_or(0),
                event.total_levels.unwrap_or(0).saturating_sub(1),
                event.elapsed_wall_s
            );
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            eprint!("{}", line);
        }
    }
    let _ = io::stderr().flush();
}

fn print_timing_summary(timing: &adv_app::RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    let solve_pct = 100.0 * timing.solve_time_s / total;

    eprintln!("\nTiming summary:");
    eprintln!("  Load:    {:.3}s", timing.load_time_s);
    eprintln!("  Lower:   {:.3}s", timing.lower_time_s);
    eprintln!("  Solve:   {:.3}s ({:.1}%)", timing.solve_time_s, solve_pct);
    eprintln!("  Diagnostics: {:.3}s", timing.diagnostics_time_s);
    eprintln!("  Total:   {:.3}s", timing.total_time_s);
}
