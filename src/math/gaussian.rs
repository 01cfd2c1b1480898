//! Gaussian calibration likelihood (Bronk Ramsey 2008).
//!
//! For a measurement `a ± u` and a curve point `c ± cu`:
//!
//! ```text
//! σ² = u² + cu²
//! p  = exp(-(a - c)² / (2σ²)) / sqrt(σ²)
//! ```
//!
//! The value is an unnormalized likelihood; callers normalize over the grid.

use crate::domain::CurvePoint;

/// Likelihood of a raw radiocarbon age against one curve value.
pub fn calibrate(c14_age: f64, uncert: f64, curve_c14: f64, curve_sigma: f64) -> f64 {
    let var = uncert * uncert + curve_sigma * curve_sigma;
    let d = c14_age - curve_c14;
    (-(d * d) / (2.0 * var)).exp() / var.sqrt()
}

/// Evaluate [`calibrate`] at every curve point, in curve order.
pub fn calibrate_curve(c14_age: f64, uncert: f64, points: &[CurvePoint]) -> Vec<f64> {
    points
        .iter()
        .map(|p| calibrate(c14_age, uncert, p.c14_bp, p.sigma))
        .collect()
}
