//! Year extraction from the 008 and the imprint (260/264) fields.

use crate::fixed_data::FixedData;
use crate::record::Record;
use lazy_static::lazy_static;
use regex::Regex;

use super::tags::IMPRINT;

/// Year used when a date is missing or unparseable.
pub const SENTINEL_YEAR: u32 = 1111;

/// Year used when an imprint field exists but its `$c` holds no four-digit run.
pub const NO_IMPRINT_YEAR: u32 = 0;

lazy_static! {
    /// Two digits, then two digits or `u` (unknown decade/year).
    static ref DATE1: Regex = Regex::new(r"^[0-9]{2}[0-9u]{2}$").unwrap();
    /// Rightmost four-digit run.
    static ref LAST_YEAR: Regex = Regex::new(r"(?s)^.*([0-9]{4})").unwrap();
}

/// One extracted year and whether its source matched at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearEvidence {
    /// The source text matched the expected shape.
    pub found: bool,
    /// Year value used for comparison (may be a sentinel).
    pub year: u32,
}

/// Date 1 from the 008.
///
/// `19uu` counts as found but cannot be parsed, so its year is the sentinel.
#[must_use]
pub fn control_year(fixed: Option<FixedData<'_>>) -> YearEvidence {
    match fixed.and_then(|f| f.date1()).filter(|d| DATE1.is_match(d)) {
        Some(text) => YearEvidence {
            found: true,
            year: text.parse().unwrap_or(SENTINEL_YEAR),
        },
        None => YearEvidence {
            found: false,
            year: SENTINEL_YEAR,
        },
    }
}

/// Year from the `$c` of the first imprint field.
///
/// Only the first 260/264 is consulted. With no imprint field at all the year
/// is the sentinel, so a record without any dates still counts as matched.
#[must_use]
pub fn imprint_year(record: &Record) -> YearEvidence {
    let Some(first) = record.fields_by_tags(IMPRINT).next() else {
        // Sentinel, not NO_IMPRINT_YEAR: a record with neither an 008 date nor
        // an imprint must keep dates_matched = 1.
        return YearEvidence {
            found: false,
            year: SENTINEL_YEAR,
        };
    };

    let text = first.subfield_values('c').join(" ");
    let year = LAST_YEAR
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    match year {
        Some(year) => YearEvidence { found: true, year },
        None => YearEvidence {
            found: false,
            year: NO_IMPRINT_YEAR,
        },
    }
}
