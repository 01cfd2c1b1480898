//! Shared domain types.
//!
//! Types that leave the engine (`ResultRow`, `RunParams`) are serializable so
//! they can be exported to JSON alongside the CSV table.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Res14cError;

/// Spacing of the calendar grid, in calendar years.
pub const GRID_STEP: f64 = 0.5;

/// Probability mass enclosed by the reported calibrated interval.
pub const INTERVAL_MASS: f64 = 0.954;

/// Upper bound on the number of sampling workers.
pub const MAX_WORKERS: usize = 8;

/// One row of a calibration curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Calendar age, years BP.
    pub cal_bp: f64,
    /// Expected conventional radiocarbon age, 14C years BP.
    pub c14_bp: f64,
    /// 1-sigma uncertainty of `c14_bp`.
    pub sigma: f64,
}

/// A calibration curve sorted ascending by calendar age.
///
/// Duplicate calendar ages are kept in input order.
#[derive(Debug, Clone)]
pub struct CalibrationCurve {
    points: Vec<CurvePoint>,
}

impl CalibrationCurve {
    /// Build a curve from unsorted points. The sort is stable.
    pub fn new(mut points: Vec<CurvePoint>) -> Result<Self, Res14cError> {
        if points.is_empty() {
            return Err(Res14cError::EmptyCurve);
        }
        points.sort_by(|a, b| a.cal_bp.total_cmp(&b.cal_bp));
        Ok(Self { points })
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(min, max)` calendar age covered by the curve.
    pub fn cal_range(&self) -> (f64, f64) {
        let first = self.points[0].cal_bp;
        let last = self.points[self.points.len() - 1].cal_bp;
        (first, last)
    }

    /// `(min, max)` radiocarbon age over curve points whose calendar age lies in `[from, to]`.
    pub fn c14_range_within(&self, from: f64, to: f64) -> Option<(f64, f64)> {
        self.points
            .iter()
            .filter(|p| p.cal_bp >= from && p.cal_bp <= to)
            .fold(None, |acc, p| match acc {
                None => Some((p.c14_bp, p.c14_bp)),
                Some((lo, hi)) => Some((lo.min(p.c14_bp), hi.max(p.c14_bp))),
            })
    }
}

/// Fixed-step calendar ages at which every distribution is evaluated.
///
/// Spans `[min, max)` of the curve's calendar range, like a half-open `arange`.
#[derive(Debug, Clone)]
pub struct CalendarGrid {
    ages: Vec<f64>,
}

impl CalendarGrid {
    pub fn spanning(curve: &CalibrationCurve) -> Self {
        let (start, stop) = curve.cal_range();
        Self::with_step(start, stop, GRID_STEP)
    }

    pub fn with_step(start: f64, stop: f64, step: f64) -> Self {
        let n = if stop > start {
            ((stop - start) / step).ceil() as usize
        } else {
            0
        };
        let ages = (0..n).map(|i| start + i as f64 * step).collect();
        Self { ages }
    }

    pub fn ages(&self) -> &[f64] {
        &self.ages
    }

    pub fn len(&self) -> usize {
        self.ages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    /// Indices of grid points inside `[from, to]`, ascending.
    pub fn indices_within(&self, from: f64, to: f64) -> Vec<usize> {
        self.ages
            .iter()
            .enumerate()
            .filter(|(_, age)| **age >= from && **age <= to)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Normalized probability per calendar grid point.
pub type Distribution = Vec<f64>;

/// Result of evaluating one raw radiocarbon age.
#[derive(Debug, Clone)]
pub struct RangeSample {
    pub c14_age: i64,
    pub width: f64,
    pub distribution: Distribution,
}

/// Aggregated interval widths for one calendar grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub cal_bp: f64,
    pub mean_width: f64,
    pub width_p05: f64,
    pub width_p95: f64,
}

/// Result rows ascending by calendar age.
pub type ResultTable = Vec<ResultRow>;

/// Validated engine input.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub cal_bp_from: i64,
    pub cal_bp_to: i64,
    /// Measurement uncertainty, 14C years.
    pub uncert: u32,
    pub curve_path: PathBuf,
    /// Pool size override; `None` picks from available parallelism.
    pub workers: Option<usize>,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), Res14cError> {
        if self.cal_bp_to <= self.cal_bp_from {
            return Err(Res14cError::InvalidInput(format!(
                "time range end ({}) must be greater than start ({}).",
                self.cal_bp_to, self.cal_bp_from
            )));
        }
        if self.uncert == 0 {
            return Err(Res14cError::InvalidInput(
                "uncertainty must be greater than zero.".to_string(),
            ));
        }
        if self.workers == Some(0) {
            return Err(Res14cError::InvalidInput(
                "worker count must be at least 1.".to_string(),
            ));
        }
        if !self.curve_path.is_file() {
            return Err(Res14cError::InvalidInput(format!(
                "calibration curve '{}' is not a readable file.",
                self.curve_path.display()
            )));
        }
        Ok(())
    }

    pub fn params(&self) -> RunParams {
        RunParams {
            cal_bp_from: self.cal_bp_from,
            cal_bp_to: self.cal_bp_to,
            uncert: self.uncert,
            curve: self.curve_path.display().to_string(),
        }
    }
}

/// Run parameters as recorded in exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParams {
    pub cal_bp_from: i64,
    pub cal_bp_to: i64,
    pub uncert: u32,
    pub curve: String,
}

/// Default pool size: one core left free, capped at [`MAX_WORKERS`].
pub fn default_workers() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    cpus.saturating_sub(1).clamp(1, MAX_WORKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(cal_bp: f64, c14_bp: f64) -> CurvePoint {
        CurvePoint {
            cal_bp,
            c14_bp,
            sigma: 10.0,
        }
    }

    #[test]
    fn curve_sort_keeps_duplicates_in_input_order() {
        let curve = CalibrationCurve::new(vec![
            pt(20.0, 1.0),
            pt(10.0, 2.0),
            pt(20.0, 3.0),
            pt(0.0, 4.0),
        ])
        .unwrap();
        let c14: Vec<f64> = curve.points().iter().map(|p| p.c14_bp).collect();
        assert_eq!(c14, vec![4.0, 2.0, 1.0, 3.0]);
    }

    #[test]
    fn empty_curve_is_rejected() {
        assert!(matches!(
            CalibrationCurve::new(Vec::new()),
            Err(Res14cError::EmptyCurve)
        ));
    }

    #[test]
    fn grid_is_half_open() {
        let grid = CalendarGrid::with_step(0.0, 2.0, 0.5);
        assert_eq!(grid.ages(), &[0.0, 0.5, 1.0, 1.5]);
        assert_eq!(grid.indices_within(0.5, 1.0), vec![1, 2]);
    }

    #[test]
    fn c14_range_only_uses_points_inside_span() {
        let curve =
            CalibrationCurve::new(vec![pt(0.0, 5.0), pt(100.0, 90.0), pt(200.0, 300.0)]).unwrap();
        assert_eq!(curve.c14_range_within(0.0, 100.0), Some((5.0, 90.0)));
        assert_eq!(curve.c14_range_within(150.0, 160.0), None);
    }

    #[test]
    fn default_workers_is_bounded() {
        let n = default_workers();
        assert!((1..=MAX_WORKERS).contains(&n));
    }

    #[test]
    fn validate_rejects_inverted_range_and_zero_uncert() {
        let mut cfg = RunConfig {
            cal_bp_from: 100,
            cal_bp_to: 50,
            uncert: 20,
            curve_path: PathBuf::from("does-not-matter.14c"),
            workers: None,
        };
        assert!(matches!(cfg.validate(), Err(Res14cError::InvalidInput(_))));
        cfg.cal_bp_to = 200;
        cfg.uncert = 0;
        assert!(matches!(cfg.validate(), Err(Res14cError::InvalidInput(_))));
        cfg.uncert = 20;
        // Still fails: the curve file does not exist.
        assert!(matches!(cfg.validate(), Err(Res14cError::InvalidInput(_))));
    }
}
