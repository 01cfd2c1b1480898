//! Formatted terminal output.
//!
//! Kept separate from aggregation so the numeric code stays free of presentation
//! concerns and output changes stay localized.

use crate::domain::{ResultTable, RunConfig};

/// Summary printed after a `calc` run.
pub fn format_run_summary(config: &RunConfig, table: &ResultTable, samples: usize) -> String {
    let mut out = String::new();

    out.push_str("=== res14c - Radiocarbon Dating Resolution ===\n");
    out.push_str(&format!("Curve: {}\n", config.curve_path.display()));
    out.push_str(&format!(
        "Span: {}..{} cal BP | uncertainty: ±{} 14C yr\n",
        config.cal_bp_from, config.cal_bp_to, config.uncert
    ));
    out.push_str(&format!(
        "Samples: {samples} raw 14C ages | rows: {}\n",
        table.len()
    ));

    let finite: Vec<_> = table.iter().filter(|r| r.mean_width.is_finite()).collect();
    if finite.is_empty() {
        out.push_str("No finite resolution values.\n");
        return out;
    }

    let best = finite
        .iter()
        .min_by(|a, b| a.mean_width.total_cmp(&b.mean_width))
        .copied();
    let worst = finite
        .iter()
        .max_by(|a, b| a.mean_width.total_cmp(&b.mean_width))
        .copied();
    let overall = finite.iter().map(|r| r.mean_width).sum::<f64>() / finite.len() as f64;

    out.push_str(&format!("Mean resolution over span: {overall:.1} yr\n"));
    if let (Some(best), Some(worst)) = (best, worst) {
        out.push_str(&format!(
            "Best:  {:>8.1} cal BP -> {:.1} yr (5-95%: {:.1}..{:.1})\n",
            best.cal_bp, best.mean_width, best.width_p05, best.width_p95
        ));
        out.push_str(&format!(
            "Worst: {:>8.1} cal BP -> {:.1} yr (5-95%: {:.1}..{:.1})\n",
            worst.cal_bp, worst.mean_width, worst.width_p05, worst.width_p95
        ));
    }
    let skipped = table.len() - finite.len();
    if skipped > 0 {
        out.push_str(&format!("Rows without probability mass: {skipped}\n"));
    }
    out
}

/// One-line description of a single calibrated age.
pub fn format_range(c14_age: i64, uncert: u32, bounds: Option<(f64, f64)>) -> String {
    match bounds {
        Some((lo, hi)) => format!(
            "{c14_age} ± {uncert} 14C BP -> 95.4%: {hi:.1}..{lo:.1} cal BP (width {:.1} yr)",
            hi - lo
        ),
        None => format!(
            "{c14_age} ± {uncert} 14C BP -> 95.4% mass sits on a single grid point (width 0.0 yr)"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResultRow;
    use std::path::PathBuf;

    fn config() -> RunConfig {
        RunConfig {
            cal_bp_from: 0,
            cal_bp_to: 10,
            uncert: 20,
            curve_path: PathBuf::from("curve.14c"),
            workers: None,
        }
    }

    fn row(cal_bp: f64, mean_width: f64) -> ResultRow {
        ResultRow {
            cal_bp,
            mean_width,
            width_p05: mean_width - 1.0,
            width_p95: mean_width + 1.0,
        }
    }

    #[test]
    fn summary_names_best_and_worst_years() {
        let table = vec![row(0.0, 50.0), row(0.5, 20.0), row(1.0, 80.0)];
        let s = format_run_summary(&config(), &table, 12);
        assert!(s.contains("Samples: 12 raw 14C ages | rows: 3"));
        assert!(s.contains("Mean resolution over span: 50.0 yr"));
        assert!(s.contains("Best:       0.5 cal BP -> 20.0 yr"));
        assert!(s.contains("Worst:      1.0 cal BP -> 80.0 yr"));
        assert!(!s.contains("without probability mass"));
    }

    #[test]
    fn summary_counts_nan_rows() {
        let table = vec![row(0.0, 50.0), row(0.5, f64::NAN)];
        let s = format_run_summary(&config(), &table, 3);
        assert!(s.contains("Rows without probability mass: 1"));
    }

    #[test]
    fn range_line_lists_older_bound_first() {
        let s = format_range(1000, 25, Some((850.0, 950.5)));
        assert_eq!(
            s,
            "1000 ± 25 14C BP -> 95.4%: 950.5..850.0 cal BP (width 100.5 yr)"
        );
    }
}
