//! Per-file aggregation of record scores.
//!
//! [`aggregate`] turns a [`ScoreMap`] into a [`SummaryTable`]: one row per
//! record plus three summary rows carrying the mean and sample standard
//! deviation of the record totals and the record count. The rows are then
//! stably sorted ascending by (mean, stdev, count), with absent keys last.
//! Data rows carry no value in those three columns, so the summary rows end
//! up first.
//!
//! ```
//! use marc_completeness::scoring::score_records;
//! use marc_completeness::summary::{aggregate, MEAN_LABEL};
//! use marc_completeness::{Leader, Record};
//!
//! let mut record = Record::new(Leader::default());
//! record.add_control_field_str("001", "rec1");
//!
//! let scores = score_records(&[record], false);
//! let table = aggregate(&scores, 1);
//! assert_eq!(table.rows().len(), 4);
//! assert_eq!(table.rows()[0].label, MEAN_LABEL);
//! ```

use crate::scoring::{QualityScore, Rule, ScoreMap};
use serde::Serialize;
use std::cmp::Ordering;

/// Label of the row holding the mean total.
pub const MEAN_LABEL: &str = "Mean Record Score";
/// Label of the row holding the standard deviation.
pub const STDEV_LABEL: &str = "Standard Deviation";
/// Label of the row holding the record count.
pub const COUNT_LABEL: &str = "Record Count";

/// A column of the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Mean of record totals (summary row only)
    Mean,
    /// Sample standard deviation of record totals (summary row only)
    Stdev,
    /// Number of records read (summary row only)
    Count,
    /// Record total
    TotalRecScore,
    /// One rule value
    Rule(Rule),
}

impl Column {
    /// Column header.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Column::Mean => "mean",
            Column::Stdev => "stdev",
            Column::Count => "count",
            Column::TotalRecScore => "total_rec_score",
            Column::Rule(rule) => rule.as_str(),
        }
    }

    /// Every column in output order.
    #[must_use]
    pub fn all() -> Vec<Column> {
        let mut columns = vec![
            Column::Mean,
            Column::Stdev,
            Column::Count,
            Column::TotalRecScore,
        ];
        columns.extend(Rule::DISPLAY_ORDER.into_iter().map(Column::Rule));
        columns
    }
}

/// A row of the summary table.
///
/// Data rows have `score` set; summary rows have exactly one of `mean`,
/// `stdev` or `count` set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Record identifier or summary label
    pub label: String,
    /// Mean of totals
    pub mean: Option<f64>,
    /// Standard deviation of totals (NaN when undefined)
    pub stdev: Option<f64>,
    /// Record count
    pub count: Option<usize>,
    /// Rule values of a data row
    #[serde(flatten)]
    pub score: Option<QualityScore>,
}

impl SummaryRow {
    fn data(label: &str, score: QualityScore) -> Self {
        SummaryRow {
            label: label.to_string(),
            mean: None,
            stdev: None,
            count: None,
            score: Some(score),
        }
    }

    fn summary(label: &str) -> Self {
        SummaryRow {
            label: label.to_string(),
            mean: None,
            stdev: None,
            count: None,
            score: None,
        }
    }

    /// Whether this is one of the three summary rows.
    #[must_use]
    pub fn is_summary(&self) -> bool {
        self.score.is_none()
    }

    /// Numeric value of a cell, `None` when the cell is absent.
    ///
    /// An undefined standard deviation is returned as NaN.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Mean => self.mean,
            Column::Stdev => self.stdev,
            Column::Count => self.count.map(|c| c as f64),
            Column::TotalRecScore => self.score.map(|s| f64::from(s.total())),
            Column::Rule(rule) => self.score.map(|s| f64::from(s.get(rule))),
        }
    }

    fn sort_key(&self) -> [Option<f64>; 3] {
        [Column::Mean, Column::Stdev, Column::Count]
            .map(|c| self.value(c).filter(|v| !v.is_nan()))
    }
}

/// Summary of one file's scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
    mean: f64,
    stdev: f64,
    count: usize,
}

impl SummaryTable {
    /// All rows in output order.
    #[must_use]
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Columns in output order.
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        Column::all()
    }

    /// Find a row by record identifier or summary label.
    #[must_use]
    pub fn row(&self, label: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Mean record total (0 for an empty file).
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation of record totals; NaN with fewer than two records.
    #[must_use]
    pub fn stdev(&self) -> f64 {
        self.stdev
    }

    /// Number of records read from the file.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Mean and sample standard deviation of `values`.
///
/// The mean of nothing is 0. The standard deviation uses an n - 1
/// denominator and is NaN for fewer than two values.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_and_stdev(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    if n == 0 {
        return (0.0, f64::NAN);
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    if n < 2 {
        return (mean, f64::NAN);
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (mean, (sum_sq / (n - 1) as f64).sqrt())
}

/// Build the summary table for one file.
///
/// `record_count` is the number of records read, which can exceed the
/// number of map entries when identifiers repeat.
#[must_use]
pub fn aggregate(scores: &ScoreMap, record_count: usize) -> SummaryTable {
    let totals: Vec<f64> = scores.values().map(|s| f64::from(s.total())).collect();
    let (mean, stdev) = mean_and_stdev(&totals);

    let mut rows: Vec<SummaryRow> = scores
        .iter()
        .map(|(id, score)| SummaryRow::data(id, *score))
        .collect();

    let mut mean_row = SummaryRow::summary(MEAN_LABEL);
    mean_row.mean = Some(mean);
    let mut stdev_row = SummaryRow::summary(STDEV_LABEL);
    stdev_row.stdev = Some(stdev);
    let mut count_row = SummaryRow::summary(COUNT_LABEL);
    count_row.count = Some(record_count);
    rows.extend([mean_row, stdev_row, count_row]);

    rows.sort_by(|a, b| compare_keys(&a.sort_key(), &b.sort_key()));

    SummaryTable {
        rows,
        mean,
        stdev,
        count: record_count,
    }
}

/// Lexicographic comparison; absent values sort after every number.
fn compare_keys(a: &[Option<f64>; 3], b: &[Option<f64>; 3]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|pair| match pair {
            (Some(x), Some(y)) => x.total_cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}
