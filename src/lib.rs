#![warn(missing_docs)]

//! # marc-completeness
//!
//! Scores the bibliographic completeness of MARC 21 records stored in ISO
//! 2709 binary files and summarizes each file.
//!
//! Every record gets a [`QualityScore`]: twenty rule values (ISBNs, authors,
//! subjects by vocabulary, dates, language and country codes, RDA, ...) whose
//! sum is the record's total. Each file gets a [`SummaryTable`] with one row
//! per record plus the mean, sample standard deviation and count of the
//! totals.
//!
//! ## Quick Start
//!
//! ```no_run
//! use marc_completeness::pipeline::{read_records, evaluate_file, EvalConfig};
//! use marc_completeness::scoring::score_records;
//! use marc_completeness::summary::aggregate;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Step by step
//! let records = read_records(Path::new("records.mrc"))?;
//! let scores = score_records(&records, true);
//! let table = aggregate(&scores, records.len());
//! println!("mean {:.2} over {} records", table.mean(), table.count());
//!
//! // Or in one go, writing records_completeness.csv
//! let report = evaluate_file(Path::new("records.mrc"), &EvalConfig::default())?;
//! println!("{}", report.output.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`record`] — Record structures (`Record`, `Field`, `Subfield`)
//! - [`reader`] — Reading records from ISO 2709 binary data
//! - [`leader`] — Record leader (24-byte header)
//! - [`fixed_data`] — Positional access to the 008 field
//! - [`scoring`] — Completeness rules and per-record scores
//! - [`summary`] — Per-file aggregation
//! - [`report`] — CSV and JSON output
//! - [`pipeline`] — File discovery and per-file evaluation
//! - [`error`] — Error types and result type

pub mod error;
pub mod fixed_data;
pub mod leader;
pub mod pipeline;
pub mod reader;
/// Core MARC record structures (`Record`, `Field`, `Subfield`)
pub mod record;
pub mod report;
pub mod scoring;
pub mod summary;

pub use error::{MarcError, Result};
pub use fixed_data::FixedData;
pub use leader::Leader;
pub use pipeline::{evaluate_file, EvalConfig, FileReport};
pub use reader::MarcReader;
pub use record::{Field, FieldBuilder, Record, RecordBuilder, Subfield};
pub use scoring::{score_record, score_records, QualityScore, Rule, ScoreMap};
pub use summary::{aggregate, SummaryRow, SummaryTable};
