//! Export the result table to CSV or JSON.
//!
//! The CSV layout is fixed: two title lines, a column header, then one row per
//! calendar grid point.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::domain::{ResultRow, RunParams};
use crate::error::Res14cError;

pub const CSV_TITLE: &str = "Resolution of radiocarbon dating";
pub const CSV_UNITS: &str = "All values in Calendar Years BP";
pub const CSV_COLUMNS: [&str; 4] = [
    "Sample Age",
    "Mean Resolution",
    "5th Percentile Resolution",
    "95th Percentile Resolution",
];

/// Write the result table as CSV to `path`.
pub fn write_results_csv(path: &Path, rows: &[ResultRow]) -> Result<(), Res14cError> {
    let file = File::create(path).map_err(|e| Res14cError::io(path, e))?;
    write_results_csv_to(file, rows)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "results written");
    Ok(())
}

/// Write the result table as CSV to any writer.
pub fn write_results_csv_to<W: Write>(writer: W, rows: &[ResultRow]) -> Result<(), Res14cError> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    let fail = |e: csv::Error| Res14cError::Output(format!("CSV: {e}"));

    wtr.write_record([CSV_TITLE]).map_err(fail)?;
    wtr.write_record([CSV_UNITS]).map_err(fail)?;
    wtr.write_record(CSV_COLUMNS).map_err(fail)?;
    for r in rows {
        wtr.write_record([
            fixed6(r.cal_bp),
            fixed6(r.mean_width),
            fixed6(r.width_p05),
            fixed6(r.width_p95),
        ])
        .map_err(fail)?;
    }
    wtr.flush()
        .map_err(|e| Res14cError::Output(format!("CSV flush: {e}")))?;
    Ok(())
}

/// Six-decimal fixed notation; non-finite values print as `nan`, `inf`, `-inf`.
fn fixed6(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{value:.6}")
    }
}

#[derive(Debug, Serialize)]
struct ResultsFile<'a> {
    tool: &'static str,
    generated: String,
    params: &'a RunParams,
    rows: &'a [ResultRow],
}

/// Write the result table plus run parameters as pretty JSON.
pub fn write_results_json(
    path: &Path,
    params: &RunParams,
    rows: &[ResultRow],
) -> Result<(), Res14cError> {
    let file = File::create(path).map_err(|e| Res14cError::io(path, e))?;
    let doc = ResultsFile {
        tool: "res14c",
        generated: Utc::now().to_rfc3339(),
        params,
        rows,
    };
    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| Res14cError::Output(format!("JSON: {e}")))?;
    Ok(())
}

/// Force a `.csv` file name: anything after the first `.` is replaced.
///
/// `out` -> `out.csv`, `out.txt` -> `out.csv`, `out.CSV` is kept as is.
pub fn csv_path(path: &Path) -> PathBuf {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return path.to_path_buf();
    };
    if name.to_lowercase().ends_with(".csv") {
        return path.to_path_buf();
    }
    let stem = name.split('.').next().unwrap_or(name);
    path.with_file_name(format!("{stem}.csv"))
}

/// The output file must land in an existing directory.
pub fn ensure_output_dir(path: &Path) -> Result<(), Res14cError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(Res14cError::InvalidInput(format!(
            "output directory '{}' does not exist.",
            dir.display()
        )));
    }
    Ok(())
}
