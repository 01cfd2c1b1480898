//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` defaults and parses CLI arguments
//! - installs logging
//! - validates input before any computation starts
//! - runs the calibration pipeline and writes outputs

use std::io::stdout;

use clap::Parser;

use crate::cli::{CalcArgs, Command, RangeArgs};
use crate::domain::{CalendarGrid, RunConfig};
use crate::error::Res14cError;
use crate::io::{csv_path, ensure_output_dir, load_calibration_curve};
use crate::progress::{ProgressSink, TerminalProgress, TracingProgress};

pub mod pipeline;

pub use pipeline::{RunOutput, calc_ranges, run_calc};

/// Entry point for the `res14c` binary.
pub fn run() -> Result<(), Res14cError> {
    // Must happen before parsing so clap's `env` defaults can see `.env` values.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Calc(args) => handle_calc(args),
        Command::Range(args) => handle_range(args),
    }
}

fn handle_calc(args: CalcArgs) -> Result<(), Res14cError> {
    let config = run_config_from_args(&args);
    config.validate()?;

    let output = args.output.as_deref().map(csv_path);
    if let Some(path) = &output {
        ensure_output_dir(path)?;
    }
    if let Some(path) = &args.json {
        ensure_output_dir(path)?;
    }

    let mut terminal = TerminalProgress::default();
    let mut logged = TracingProgress::default();
    let sink: &mut dyn ProgressSink = if args.quiet { &mut logged } else { &mut terminal };
    let run = run_calc(&config, sink);
    if !args.quiet {
        terminal.finish();
    }
    let run = run?;

    let summary = crate::report::format_run_summary(&config, &run.table, run.samples);
    match &output {
        Some(path) => {
            crate::io::write_results_csv(path, &run.table)?;
            println!("{summary}");
            println!("Results saved as: {}", path.display());
        }
        None => {
            crate::io::write_results_csv_to(stdout().lock(), &run.table)?;
            eprintln!("{summary}");
        }
    }
    if let Some(path) = &args.json {
        crate::io::write_results_json(path, &config.params(), &run.table)?;
    }

    Ok(())
}

fn handle_range(args: RangeArgs) -> Result<(), Res14cError> {
    let curve = load_calibration_curve(&args.curve)?;
    let grid = CalendarGrid::spanning(&curve);
    let sample = crate::sampling::get_range(args.age, f64::from(args.uncert), &curve, &grid)?;
    let bounds = crate::sampling::interval_bounds(&sample.distribution, grid.ages());
    tracing::debug!(age = args.age, width = sample.width, "single range evaluated");

    println!("{}", crate::report::format_range(args.age, args.uncert, bounds));
    Ok(())
}

pub fn run_config_from_args(args: &CalcArgs) -> RunConfig {
    RunConfig {
        cal_bp_from: args.from,
        cal_bp_to: args.to,
        uncert: args.uncert,
        curve_path: args.curve.clone(),
        workers: (args.workers > 0).then_some(args.workers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn zero_workers_means_automatic() {
        let mut args = CalcArgs {
            from: 500,
            to: 600,
            uncert: 20,
            curve: PathBuf::from("intcal13.14c"),
            output: None,
            json: None,
            workers: 0,
            quiet: true,
        };
        assert_eq!(run_config_from_args(&args).workers, None);
        args.workers = 3;
        let config = run_config_from_args(&args);
        assert_eq!(config.workers, Some(3));
        assert_eq!((config.cal_bp_from, config.cal_bp_to, config.uncert), (500, 600, 20));
    }
}
