//! Serialization of summary tables.
//!
//! - [`write_csv`] — header row plus one line per table row, the layout
//!   spreadsheet users expect from the completeness report
//! - [`write_json`] — the same rows as a JSON array
//! - [`output_path`] — report file name derived from the input file
//!
//! Absent cells and an undefined standard deviation are written as empty
//! CSV cells (JSON `null`).

use crate::error::Result;
use crate::summary::{Column, SummaryRow, SummaryTable};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffix appended to the input file stem by default.
pub const DEFAULT_SUFFIX: &str = "_completeness";

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// JSON array of rows
    Json,
}

impl ReportFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

/// Write `table` as CSV.
///
/// The first header cell is empty; it heads the row label column.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn write_csv<W: Write>(table: &SummaryTable, out: W) -> Result<()> {
    let columns = table.columns();
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec![""];
    header.extend(columns.iter().map(|c| c.name()));
    writer.write_record(&header)?;

    for row in table.rows() {
        let mut line = Vec::with_capacity(columns.len() + 1);
        line.push(row.label.clone());
        line.extend(columns.iter().map(|&c| format_cell(row, c)));
        writer.write_record(&line)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write `table` rows as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_json<W: Write>(table: &SummaryTable, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, table.rows())?;
    writeln!(out)?;
    Ok(())
}

/// Write `table` in `format`.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn write_report<W: Write>(table: &SummaryTable, format: ReportFormat, out: W) -> Result<()> {
    match format {
        ReportFormat::Csv => write_csv(table, out),
        ReportFormat::Json => write_json(table, out),
    }
}

/// Report path for `input`: `<dir>/<stem><suffix>.<ext>`.
///
/// `dir` defaults to the input's own directory.
///
/// ```
/// use marc_completeness::report::{output_path, ReportFormat, DEFAULT_SUFFIX};
/// use std::path::Path;
///
/// let path = output_path(Path::new("data/books.mrc"), None, DEFAULT_SUFFIX, ReportFormat::Csv);
/// assert_eq!(path, Path::new("data/books_completeness.csv"));
/// ```
#[must_use]
pub fn output_path(input: &Path, dir: Option<&Path>, suffix: &str, format: ReportFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = format!("{stem}{suffix}.{}", format.extension());
    match dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

fn format_cell(row: &SummaryRow, column: Column) -> String {
    match column {
        Column::Count => row.count.map(|c| c.to_string()).unwrap_or_default(),
        Column::Mean | Column::Stdev => match row.value(column) {
            Some(v) if v.is_finite() => v.to_string(),
            _ => String::new(),
        },
        Column::TotalRecScore => row.score.map(|s| s.total().to_string()).unwrap_or_default(),
        Column::Rule(rule) => row.score.map(|s| s.get(rule).to_string()).unwrap_or_default(),
    }
}
