//! Report output: CSV, terminal table and JSON renderings of [`OutputRow`]s.

use comfy_table::{presets, Cell, ContentArrangement, Table};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::models::{OutputRow, REPORT_HEADERS};

/// Message printed instead of an empty table
pub const EMPTY_REPORT: &str = "No papers found.";

/// Errors that can occur while writing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write rows as CSV with the report headers.
///
/// The header row is written even when `rows` is empty.
pub fn write_csv<W: Write>(rows: &[OutputRow], writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(REPORT_HEADERS)?;
    for row in rows {
        csv_writer.write_record(row.cells())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write rows to a CSV file, returning the number of rows written
pub fn save_csv(rows: &[OutputRow], path: &Path) -> Result<usize, ReportError> {
    let file = File::create(path)?;
    write_csv(rows, file)?;
    tracing::debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}

/// Render rows as CSV text
pub fn to_csv_string(rows: &[OutputRow]) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Render rows as pretty-printed JSON
pub fn to_json(rows: &[OutputRow]) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Render rows as a terminal table
pub fn render_table(rows: &[OutputRow]) -> String {
    if rows.is_empty() {
        return EMPTY_REPORT.to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(REPORT_HEADERS.iter().map(|h| Cell::new(h)));

    for row in rows {
        table.add_row(row.cells().iter().map(|c| Cell::new(c)));
    }

    table.to_string()
}
