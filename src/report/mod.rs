//! Per-year aggregation of range samples, plus terminal formatting (`format`).
//!
//! Each sample contributes its width to every output grid point, weighted by
//! its own calibrated probability at that point. The result only depends on
//! the set of samples, not on the order they were produced in.

use crate::domain::{CalendarGrid, RangeSample, ResultRow, ResultTable};
use crate::math::calc_percentile;
use crate::progress::ProgressSink;

pub mod format;

pub use format::*;

/// Weighted widths collected for one calendar grid point.
#[derive(Debug, Clone, Default)]
pub struct YearAggregate {
    pub widths: Vec<f64>,
    pub weights: Vec<f64>,
}

impl YearAggregate {
    fn with_capacity(n: usize) -> Self {
        Self {
            widths: Vec::with_capacity(n),
            weights: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, width: f64, weight: f64) {
        self.widths.push(width);
        self.weights.push(weight);
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weighted mean width; `None` when the weights sum to zero.
    pub fn mean(&self) -> Option<f64> {
        let total = self.total_weight();
        if !(total > 0.0) {
            return None;
        }
        let weighted: f64 = self
            .widths
            .iter()
            .zip(self.weights.iter())
            .map(|(w, p)| w * p)
            .sum();
        Some(weighted / total)
    }

    /// Row for `cal_bp`; all statistics are NaN for a zero-weight aggregate.
    pub fn to_row(&self, cal_bp: f64) -> ResultRow {
        let Some(mean_width) = self.mean() else {
            tracing::warn!(cal_bp, "zero total weight; row reported as NaN");
            return ResultRow {
                cal_bp,
                mean_width: f64::NAN,
                width_p05: f64::NAN,
                width_p95: f64::NAN,
            };
        };
        ResultRow {
            cal_bp,
            mean_width,
            width_p05: calc_percentile(&self.widths, &self.weights, 0.05).unwrap_or(f64::NAN),
            width_p95: calc_percentile(&self.widths, &self.weights, 0.95).unwrap_or(f64::NAN),
        }
    }
}

/// Regroup samples by grid point inside `[cal_bp_from, cal_bp_to]` and summarize each.
///
/// Reports "Collecting data" then per-sample percentages, then "Calculating means".
pub fn aggregate_by_year(
    samples: &[RangeSample],
    grid: &CalendarGrid,
    cal_bp_from: f64,
    cal_bp_to: f64,
    progress: &mut dyn ProgressSink,
) -> ResultTable {
    let indices = grid.indices_within(cal_bp_from, cal_bp_to);
    let mut years: Vec<YearAggregate> = indices
        .iter()
        .map(|_| YearAggregate::with_capacity(samples.len()))
        .collect();

    progress.set_status("Collecting data");
    let total = samples.len();
    for (n, sample) in samples.iter().enumerate() {
        for (year, &idx) in years.iter_mut().zip(indices.iter()) {
            year.push(sample.width, sample.distribution[idx]);
        }
        progress.update_progress(percent(n + 1, total));
    }

    progress.set_status("Calculating means");
    let ages = grid.ages();
    indices
        .iter()
        .zip(years.iter())
        .map(|(&idx, year)| year.to_row(ages[idx]))
        .collect()
}

fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done as f64 / total as f64) * 100.0)
        .round_ties_even()
        .min(100.0) as u8
}
