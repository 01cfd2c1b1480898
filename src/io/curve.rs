//! Calibration curve loading.
//!
//! Curve files are plain text: `#` lines are comments, every other line is
//! `cal_bp,c14_bp,sigma`. Any malformed line aborts the whole load; no partial
//! curve is ever returned.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{CalibrationCurve, CurvePoint};
use crate::error::Res14cError;

/// Load a calibration curve file, sorted ascending by calendar age.
pub fn load_calibration_curve(path: &Path) -> Result<CalibrationCurve, Res14cError> {
    let file = File::open(path).map_err(|e| Res14cError::io(path, e))?;
    let curve = parse_calibration_curve(file)?;

    let (cal_min, cal_max) = curve.cal_range();
    tracing::info!(
        path = %path.display(),
        points = curve.len(),
        cal_min,
        cal_max,
        "calibration curve loaded"
    );
    Ok(curve)
}

/// Parse curve rows from any reader.
pub fn parse_calibration_curve<R: Read>(reader: R) -> Result<CalibrationCurve, Res14cError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| Res14cError::CurveParse {
            line: e.position().map(|p| p.line() as usize).unwrap_or(idx + 1),
            message: e.to_string(),
        })?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);
        let point =
            parse_row(&record).map_err(|message| Res14cError::CurveParse { line, message })?;
        points.push(point);
    }

    CalibrationCurve::new(points)
}

fn parse_row(record: &StringRecord) -> Result<CurvePoint, String> {
    if record.len() != 3 {
        return Err(format!("expected 3 fields, found {}", record.len()));
    }
    let field = |i: usize, name: &str| -> Result<f64, String> {
        let raw = &record[i];
        raw.parse::<f64>()
            .map_err(|_| format!("{name} '{raw}' is not a number"))
    };
    Ok(CurvePoint {
        cal_bp: field(0, "calendar age")?,
        c14_bp: field(1, "radiocarbon age")?,
        sigma: field(2, "radiocarbon sigma")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::{SeedableRng, rngs::StdRng};

    const SAMPLE: &str = "\
# test curve
# cal BP, 14C BP, sigma
100,120,15
0,5,10
50,60.5,12
";

    #[test]
    fn skips_comments_and_sorts_by_calendar_age() {
        let curve = parse_calibration_curve(SAMPLE.as_bytes()).unwrap();
        assert_eq!(curve.len(), 3);
        let cal: Vec<f64> = curve.points().iter().map(|p| p.cal_bp).collect();
        assert_eq!(cal, vec![0.0, 50.0, 100.0]);
        assert_eq!(curve.points()[1].c14_bp, 60.5);
        assert_eq!(curve.points()[2].sigma, 15.0);
    }

    #[test]
    fn output_is_sorted_for_any_line_order() {
        let lines: Vec<String> = (0..40)
            .map(|i| format!("{},{},{}", i * 5, 1000 - i * 3, 10 + i % 4))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let mut shuffled = lines.clone();
            shuffled.shuffle(&mut rng);
            let text = format!("# header\n{}\n", shuffled.join("\n"));
            let curve = parse_calibration_curve(text.as_bytes()).unwrap();
            assert_eq!(curve.len(), lines.len());
            assert!(
                curve
                    .points()
                    .windows(2)
                    .all(|w| w[0].cal_bp <= w[1].cal_bp)
            );
        }
    }

    #[test]
    fn wrong_field_count_is_fatal() {
        let err = parse_calibration_curve("0,1,2\n5,6\n".as_bytes()).unwrap_err();
        match err {
            Res14cError::CurveParse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("expected 3 fields"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_field_is_fatal() {
        let err = parse_calibration_curve("0,abc,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Res14cError::CurveParse { line: 1, .. }));
    }

    #[test]
    fn comment_only_file_is_empty_curve() {
        let err = parse_calibration_curve("# nothing here\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Res14cError::EmptyCurve));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_calibration_curve(&dir.path().join("absent.14c")).unwrap_err();
        assert!(matches!(err, Res14cError::Io { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.14c");
        std::fs::write(&path, SAMPLE).unwrap();
        let curve = load_calibration_curve(&path).unwrap();
        assert_eq!(curve.cal_range(), (0.0, 100.0));
    }
}
