//! Calibrated distribution and 95.4% interval width for one raw radiocarbon age.
//!
//! The width is the span between the extreme grid points of the selected
//! high-density set. For multimodal distributions this covers the gaps between
//! modes; it is not the summed length of the disjoint sub-intervals.

use crate::domain::{CalendarGrid, CalibrationCurve, Distribution, INTERVAL_MASS, RangeSample};
use crate::error::Res14cError;
use crate::math::{calibrate_curve, interp_linear};

/// Evaluate a raw age: normalized distribution on `grid` plus interval width.
pub fn get_range(
    c14_age: i64,
    uncert: f64,
    curve: &CalibrationCurve,
    grid: &CalendarGrid,
) -> Result<RangeSample, Res14cError> {
    let distribution = calibrated_distribution(c14_age, uncert, curve, grid)?;
    let width = match interval_bounds(&distribution, grid.ages()) {
        Some((lo, hi)) => hi - lo,
        None => 0.0,
    };
    Ok(RangeSample {
        c14_age,
        width,
        distribution,
    })
}

/// Calibration likelihood interpolated onto `grid` and normalized to sum to 1.
pub fn calibrated_distribution(
    c14_age: i64,
    uncert: f64,
    curve: &CalibrationCurve,
    grid: &CalendarGrid,
) -> Result<Distribution, Res14cError> {
    let points = curve.points();
    let density = calibrate_curve(c14_age as f64, uncert, points);
    let cal: Vec<f64> = points.iter().map(|p| p.cal_bp).collect();

    let mut dist = interp_linear(&cal, &density, grid.ages());
    let total: f64 = dist.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(Res14cError::DegenerateDistribution { c14_age });
    }
    for v in &mut dist {
        *v /= total;
    }
    Ok(dist)
}

/// `(min, max)` calendar age of the grid points holding the densest 95.4% of mass.
///
/// Points are taken in descending density (ties by grid order) while the
/// running mass stays at or below 0.954. Returns `None` if even the densest
/// point alone exceeds that mass.
pub fn interval_bounds(distribution: &[f64], ages: &[f64]) -> Option<(f64, f64)> {
    let mut order: Vec<usize> = (0..distribution.len()).collect();
    order.sort_by(|&a, &b| distribution[b].total_cmp(&distribution[a]));

    let mut mass = 0.0;
    let mut bounds: Option<(f64, f64)> = None;
    for idx in order {
        mass += distribution[idx];
        if mass > INTERVAL_MASS {
            break;
        }
        let age = ages[idx];
        bounds = Some(match bounds {
            None => (age, age),
            Some((lo, hi)) => (lo.min(age), hi.max(age)),
        });
    }
    bounds
}
