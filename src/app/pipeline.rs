//! The calibration pipeline shared by every front-end.
//!
//! curve load -> scan span -> calendar grid -> parallel range sampling -> per-year aggregation
//!
//! Front-ends only decide how progress is shown and where the table goes.

use std::time::Instant;

use crate::domain::{
    CalendarGrid, CalibrationCurve, RangeSample, ResultTable, RunConfig, default_workers,
};
use crate::error::Res14cError;
use crate::io::load_calibration_curve;
use crate::progress::ProgressSink;
use crate::report::aggregate_by_year;
use crate::sampling::sample_ranges;

/// Everything a `calc` run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: ResultTable,
    pub c14_from: i64,
    pub c14_to: i64,
    pub samples: usize,
    pub workers: usize,
}

/// Compute the resolution table for `config`.
pub fn calc_ranges(
    config: &RunConfig,
    progress: &mut dyn ProgressSink,
) -> Result<ResultTable, Res14cError> {
    run_calc(config, progress).map(|out| out.table)
}

/// Like [`calc_ranges`], but also returns run statistics.
pub fn run_calc(
    config: &RunConfig,
    progress: &mut dyn ProgressSink,
) -> Result<RunOutput, Res14cError> {
    config.validate()?;
    let curve = load_calibration_curve(&config.curve_path)?;
    run_calc_with_curve(config, &curve, progress)
}

/// Execute the pipeline against an already loaded curve.
pub fn run_calc_with_curve(
    config: &RunConfig,
    curve: &CalibrationCurve,
    progress: &mut dyn ProgressSink,
) -> Result<RunOutput, Res14cError> {
    let uncert = f64::from(config.uncert);
    let (c14_from, c14_to) = scan_span(curve, config.cal_bp_from, config.cal_bp_to, uncert)?;
    let grid = CalendarGrid::spanning(curve);
    let workers = config.workers.unwrap_or_else(default_workers);
    tracing::info!(c14_from, c14_to, grid_points = grid.len(), workers, "scan span selected");

    progress.set_status(&format!("Calculating ranges ({workers} CPUs used)"));
    let started = Instant::now();
    let mut samples = sample_ranges(c14_from, c14_to, uncert, curve, &grid, workers)?;
    tracing::info!(
        samples = samples.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "range sampling finished"
    );

    // Completion order depends on scheduling; fix it so sums are reproducible.
    samples.sort_by_key(|s: &RangeSample| s.c14_age);

    let table = aggregate_by_year(
        &samples,
        &grid,
        config.cal_bp_from as f64,
        config.cal_bp_to as f64,
        progress,
    );
    tracing::info!(rows = table.len(), "aggregation finished");

    Ok(RunOutput {
        table,
        c14_from,
        c14_to,
        samples: samples.len(),
        workers,
    })
}

/// Integer raw-age span covering the curve's 14C values in `[from, to]`, padded by 2σ.
pub fn scan_span(
    curve: &CalibrationCurve,
    cal_bp_from: i64,
    cal_bp_to: i64,
    uncert: f64,
) -> Result<(i64, i64), Res14cError> {
    let (lo, hi) = curve
        .c14_range_within(cal_bp_from as f64, cal_bp_to as f64)
        .ok_or(Res14cError::EmptySpan {
            from: cal_bp_from,
            to: cal_bp_to,
        })?;
    // Halves go to the even neighbour.
    let from = (lo - 2.0 * uncert).round_ties_even() as i64;
    let to = (hi + 2.0 * uncert).round_ties_even() as i64;
    Ok((from, to))
}
