//! Piecewise-linear interpolation onto a grid.
//!
//! Knots must be sorted ascending by `x`. Repeated `x` knots are allowed and
//! never produce a division by zero. Queries outside the knot range are
//! extrapolated along the end segments.

/// Interpolate `(xs, ys)` at every point of `grid`.
pub fn interp_linear(xs: &[f64], ys: &[f64], grid: &[f64]) -> Vec<f64> {
    debug_assert_eq!(xs.len(), ys.len());
    match xs.len() {
        0 => return vec![0.0; grid.len()],
        1 => return vec![ys[0]; grid.len()],
        _ => {}
    }

    grid.iter()
        .map(|&x| {
            // First knot with xs[hi] >= x, kept off the ends so both neighbours exist.
            let hi = xs.partition_point(|&k| k < x).clamp(1, xs.len() - 1);
            let lo = hi - 1;
            let dx = xs[hi] - xs[lo];
            if dx == 0.0 {
                return ys[hi];
            }
            ys[lo] + (ys[hi] - ys[lo]) * (x - xs[lo]) / dx
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_knots_and_midpoints() {
        let xs = [0.0, 10.0, 20.0];
        let ys = [0.0, 1.0, 3.0];
        let out = interp_linear(&xs, &ys, &[0.0, 5.0, 10.0, 15.0, 20.0]);
        let expected = [0.0, 0.5, 1.0, 2.0, 3.0];
        for (a, b) in out.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn duplicate_knots_do_not_divide_by_zero() {
        let xs = [0.0, 0.0, 10.0];
        let ys = [4.0, 2.0, 12.0];
        let out = interp_linear(&xs, &ys, &[0.0, 5.0]);
        assert!(out.iter().all(|v| v.is_finite()));
        assert_eq!(out[0], 2.0);
        assert!((out[1] - 7.0).abs() < 1e-12);
    }

    #[test]
    fn single_knot_is_constant() {
        assert_eq!(interp_linear(&[3.0], &[9.0], &[0.0, 3.0, 7.0]), vec![9.0; 3]);
    }
}
