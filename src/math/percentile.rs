//! Weighted nearest-rank percentile.
//!
//! Values are sorted ascending (stable, so equal values keep input order) and
//! their weights accumulated. The selected rank is the one whose cumulative
//! weight is closest to `k * total`; when that rank still falls short of the
//! target, the next rank is taken instead. No interpolation between ranks.

use std::cmp::Ordering;

/// Weighted percentile of `values` at fraction `k` in `[0, 1]`.
///
/// Returns `None` for empty input.
pub fn calc_percentile(values: &[f64], weights: &[f64], k: f64) -> Option<f64> {
    debug_assert_eq!(values.len(), weights.len());
    if values.is_empty() {
        return None;
    }

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

    let mut cumsum = Vec::with_capacity(order.len());
    let mut acc = 0.0;
    for &i in &order {
        acc += weights[i];
        cumsum.push(acc);
    }
    let target = k * acc;

    // First index with the smallest distance to the target.
    let mut idx = 0;
    let mut best = (cumsum[0] - target).abs();
    for (i, &c) in cumsum.iter().enumerate().skip(1) {
        let d = (c - target).abs();
        if d < best {
            best = d;
            idx = i;
        }
    }
    if cumsum[idx] < target {
        idx = (idx + 1).min(cumsum.len() - 1);
    }

    Some(values[order[idx]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_return_min_and_max() {
        let values = [40.0, 10.0, 30.0, 20.0, 50.0];
        let weights = [0.3, 1.0, 2.0, 0.5, 0.7];
        assert_eq!(calc_percentile(&values, &weights, 0.0), Some(10.0));
        assert_eq!(calc_percentile(&values, &weights, 1.0), Some(50.0));
    }

    #[test]
    fn uniform_weights_give_nearest_rank_median() {
        let w5 = [1.0; 5];
        assert_eq!(calc_percentile(&[5.0, 1.0, 4.0, 2.0, 3.0], &w5, 0.5), Some(3.0));

        // Even count: tie between ranks 2 and 3 resolves to the lower one.
        let w4 = [1.0; 4];
        assert_eq!(calc_percentile(&[40.0, 10.0, 30.0, 20.0], &w4, 0.5), Some(20.0));
    }

    #[test]
    fn short_rank_advances_to_next() {
        // cumsum = [1, 2, 10]; target for k=0.25 is 2.5 -> closest is 2 (< 2.5) -> next.
        let values = [1.0, 2.0, 3.0];
        let weights = [1.0, 1.0, 8.0];
        assert_eq!(calc_percentile(&values, &weights, 0.25), Some(3.0));
    }

    #[test]
    fn heavy_weight_dominates() {
        let values = [100.0, 200.0, 300.0];
        let weights = [0.01, 10.0, 0.01];
        assert_eq!(calc_percentile(&values, &weights, 0.05), Some(200.0));
        assert_eq!(calc_percentile(&values, &weights, 0.95), Some(200.0));
    }

    #[test]
    fn empty_input_has_no_percentile() {
        assert_eq!(calc_percentile(&[], &[], 0.5), None);
    }
}
