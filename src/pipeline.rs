//! Per-file evaluation: read, score, summarize, write.
//!
//! Each file is processed to completion before the next one starts. Records
//! of one file are held in memory; a record that fails to decode aborts the
//! file and no report is written for it.

use crate::error::{MarcError, Result};
use crate::reader::MarcReader;
use crate::record::Record;
use crate::report::{output_path, write_report, ReportFormat, DEFAULT_SUFFIX};
use crate::scoring::score_records;
use crate::summary::aggregate;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Extension of MARC binary files picked up by directory discovery.
pub const MARC_EXTENSION: &str = "mrc";

/// Options for evaluating files.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Appended to the input file stem to name the report
    pub suffix: String,
    /// Report format
    pub format: ReportFormat,
    /// Score records on the rayon pool
    pub parallel: bool,
    /// Directory for reports; the input's directory when `None`
    pub output_dir: Option<PathBuf>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            format: ReportFormat::Csv,
            parallel: true,
            output_dir: None,
        }
    }
}

/// Outcome of evaluating one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// Input file
    pub input: PathBuf,
    /// Report written
    pub output: PathBuf,
    /// Records read
    pub record_count: usize,
    /// Mean record total
    pub mean: f64,
    /// Standard deviation of record totals (NaN when undefined)
    pub stdev: f64,
}

/// Read every record of a MARC file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any record fails to
/// decode; the error names the failing record's position.
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)?;
    let reader = MarcReader::new(BufReader::new(file));

    reader
        .enumerate()
        .map(|(i, result)| {
            result.map_err(|source| MarcError::RecordAt {
                index: i + 1,
                file: path.display().to_string(),
                source: Box::new(source),
            })
        })
        .collect()
}

/// Evaluate one file and write its report.
///
/// # Errors
///
/// Returns an error if reading fails, or the report cannot be created or
/// written.
pub fn evaluate_file(path: &Path, config: &EvalConfig) -> Result<FileReport> {
    info!(file = %path.display(), "evaluating");
    let records = read_records(path)?;
    debug!(records = records.len(), "records decoded");

    let scores = score_records(&records, config.parallel);
    let table = aggregate(&scores, records.len());

    let output = output_path(
        path,
        config.output_dir.as_deref(),
        &config.suffix,
        config.format,
    );
    let mut out = BufWriter::new(File::create(&output)?);
    write_report(&table, config.format, &mut out)?;
    out.flush()?;

    info!(
        file = %path.display(),
        records = table.count(),
        mean = table.mean(),
        stdev = table.stdev(),
        output = %output.display(),
        "report written"
    );

    Ok(FileReport {
        input: path.to_path_buf(),
        output,
        record_count: table.count(),
        mean: table.mean(),
        stdev: table.stdev(),
    })
}

/// MARC files (`*.mrc`) directly inside `dir`, sorted by name.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub fn discover_marc_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| MarcError::IoError(e.into()))?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == MARC_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }
    debug!(dir = %dir.display(), found = files.len(), "discovered MARC files");
    Ok(files)
}
