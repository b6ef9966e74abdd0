//! Record completeness scoring.
//!
//! [`score_record`] inspects one parsed [`Record`] and derives a
//! [`QualityScore`]: twenty rule values whose sum is the record's total.
//! Scoring is a pure function of the record. Missing or malformed fields
//! never fail; every rule falls back to its default value.
//!
//! # Examples
//!
//! ```
//! use marc_completeness::scoring::{score_record, Rule};
//! use marc_completeness::{Field, Leader, Record};
//!
//! let record = Record::builder(Leader::default())
//!     .control_field_str("001", "ocm00012345")
//!     .field(
//!         Field::builder("020".to_string(), ' ', ' ')
//!             .subfield_str('a', "9780143039433")
//!             .build(),
//!     )
//!     .build();
//!
//! let (id, score) = score_record(&record);
//! assert_eq!(id, "ocm00012345");
//! assert_eq!(score.get(Rule::IsbnCount), 1);
//! ```

pub mod dates;
pub mod quality;
pub mod subjects;
pub mod tags;

pub use quality::{QualityScore, Rule};

use crate::fixed_data::FixedData;
use crate::record::{Field, Record};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use quality::ScoreBuilder;
use rayon::prelude::*;
use regex::Regex;
use subjects::SubjectCounts;

/// Scores keyed by record identifier, in first-seen order.
///
/// A repeated identifier replaces the earlier score but keeps its position.
pub type ScoreMap = IndexMap<String, QualityScore>;

/// Marker for explicit RDA description conventions in the 040 text.
const RDA_MARKER: &str = "erda";

/// Cataloging language code for English.
const ENGLISH: &str = "eng";

lazy_static! {
    static ref ONLINE_RESOURCE: Regex = Regex::new(r"online.resource").unwrap();
}

/// Identifier of a record: its 001 value, or the empty string without one.
#[must_use]
pub fn record_identifier(record: &Record) -> String {
    record.control_number().unwrap_or_default().to_string()
}

/// Score one record.
#[must_use]
pub fn score_record(record: &Record) -> (String, QualityScore) {
    let fixed = record.fixed_data();
    let mut score = ScoreBuilder::default();

    let count = |tags: &[&str]| count_u32(record.fields_by_tags(tags).count());
    score
        .set(Rule::IsbnCount, count(tags::ISBN))
        .set(Rule::Authors, count(tags::AUTHORS))
        .set(Rule::AltTitles, count(tags::ALT_TITLES))
        .set(Rule::Edition, count(tags::EDITION))
        .set(Rule::Contribs, count(tags::CONTRIBUTORS))
        .set(Rule::Series, count(tags::SERIES));

    score.set(
        Rule::TocAbstract,
        toc_abstract(record.has_any(tags::TOC), record.has_any(tags::ABSTRACT)),
    );

    let control = dates::control_year(fixed);
    let imprint = dates::imprint_year(record);
    score
        .set_flag(Rule::Date008, control.found)
        .set_flag(Rule::Date26X, imprint.found)
        .set_flag(Rule::DatesMatched, control.year == imprint.year);

    score.set_flag(Rule::Classification, record.has_any(tags::CLASSIFICATION));

    let subjects = SubjectCounts::tally(record.fields_by_tags(tags::SUBJECTS));
    score
        .set(Rule::SubjectsLcsh, subjects.lcsh)
        .set(Rule::SubjectsMesh, subjects.mesh)
        .set(Rule::SubjectsFast, subjects.fast)
        .set(Rule::SubjectsOther, subjects.other);

    // Last 300 decides.
    if let Some(value) = record
        .fields_by_tags(tags::PHYSICAL_DESCRIPTION)
        .map(|field| online_description(field, fixed))
        .last()
    {
        score.set(Rule::Descr, value);
    }

    score
        .set_flag(Rule::RsrcLang, fixed.is_some_and(|f| f.has_language_code()))
        .set_flag(Rule::CtryCode, fixed.is_some_and(|f| f.has_country_code()));

    // Last 040 decides both.
    if let Some(field) = record.fields_by_tags(tags::CATALOGING_SOURCE).last() {
        score
            .set_flag(Rule::CatLang, cataloged_in_english(field))
            .set_flag(Rule::Rda, field.text().contains(RDA_MARKER));
    }

    (record_identifier(record), score.build())
}

/// Score a batch of records.
///
/// With `parallel`, records are scored on the rayon pool; results are merged
/// in input order either way, so both paths return the same map.
#[must_use]
pub fn score_records(records: &[Record], parallel: bool) -> ScoreMap {
    let scored: Vec<(String, QualityScore)> = if parallel {
        records.par_iter().map(score_record).collect()
    } else {
        records.iter().map(score_record).collect()
    };
    scored.into_iter().collect()
}

/// 2 for both, 1 for either, 0 for neither.
#[must_use]
pub fn toc_abstract(has_toc: bool, has_abstract: bool) -> u32 {
    u32::from(has_toc) + u32::from(has_abstract)
}

/// Online-resource evidence of one 300 field: the `$a` extent text and the
/// 008 form of item each contribute one point.
#[must_use]
pub fn online_description(field: &Field, fixed: Option<FixedData<'_>>) -> u32 {
    let in_extent = field
        .subfield_values('a')
        .iter()
        .any(|a| ONLINE_RESOURCE.is_match(a));
    let in_fixed = fixed.is_some_and(|f| f.is_online());
    u32::from(in_extent) + u32::from(in_fixed)
}

/// An 040 with no `$b` is assumed English; otherwise some `$b` must name it.
#[must_use]
pub fn cataloged_in_english(field: &Field) -> bool {
    let languages = field.subfield_values('b');
    languages.is_empty() || languages.iter().any(|b| b.contains(ENGLISH))
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leader::Leader;

    const FIXED: &str = "850101s1985    nyu           000 0 eng d";
    const FIXED_ONLINE: &str = "120315s2012    enk     o     000 0 fre d";

    fn field(tag: &str, ind2: char, subfields: &[(char, &str)]) -> Field {
        let mut f = Field::new(tag.to_string(), ' ', ind2);
        for (code, value) in subfields {
            f.add_subfield_str(*code, value);
        }
        f
    }

    fn record(fixed: Option<&str>, fields: Vec<Field>) -> Record {
        let mut r = Record::new(Leader::default());
        r.add_control_field_str("001", "rec1");
        if let Some(f) = fixed {
            r.add_control_field_str("008", f);
        }
        for f in fields {
            r.add_field(f);
        }
        r
    }

    #[test]
    fn test_empty_record_defaults() {
        let (id, score) = score_record(&Record::new(Leader::default()));
        assert_eq!(id, "");
        // Only the two absent dates agree.
        assert_eq!(score.get(Rule::DatesMatched), 1);
        assert_eq!(score.total(), 1);
    }

    #[test]
    fn test_count_rules_uncapped() {
        let mut fields: Vec<Field> = (0..12).map(|_| field("700", ' ', &[('a', "X")])).collect();
        fields.push(field("710", ' ', &[('a', "Y")]));
        fields.push(field("020", ' ', &[('a', "123")]));
        fields.push(field("020", ' ', &[('a', "456")]));
        fields.push(field("100", ' ', &[('a', "Author")]));
        fields.push(field("490", ' ', &[('a', "Series")]));
        fields.push(field("830", '0', &[('a', "Series")]));
        fields.push(field("246", '0', &[('a', "Alt")]));
        fields.push(field("250", ' ', &[('a', "2nd ed.")]));

        let (_, score) = score_record(&record(None, fields));
        assert_eq!(score.get(Rule::Contribs), 13);
        assert_eq!(score.get(Rule::IsbnCount), 2);
        assert_eq!(score.get(Rule::Authors), 1);
        assert_eq!(score.get(Rule::Series), 2);
        assert_eq!(score.get(Rule::AltTitles), 1);
        assert_eq!(score.get(Rule::Edition), 1);
    }

    #[test]
    fn test_toc_abstract_values() {
        assert_eq!(toc_abstract(true, true), 2);
        assert_eq!(toc_abstract(true, false), 1);
        assert_eq!(toc_abstract(false, true), 1);
        assert_eq!(toc_abstract(false, false), 0);
    }

    #[test]
    fn test_dates_match() {
        let fields = vec![field("264", '1', &[('c', "[1985]")])];
        let (_, score) = score_record(&record(Some(FIXED), fields));
        assert_eq!(score.get(Rule::Date008), 1);
        assert_eq!(score.get(Rule::Date26X), 1);
        assert_eq!(score.get(Rule::DatesMatched), 1);
    }

    #[test]
    fn test_dates_differ() {
        let fields = vec![field("260", ' ', &[('c', "2000.")])];
        let (_, score) = score_record(&record(Some(FIXED), fields));
        assert_eq!(score.get(Rule::DatesMatched), 0);
    }

    #[test]
    fn test_imprint_without_year_never_matches() {
        let fields = vec![field("260", ' ', &[('c', "[n.d.]")])];
        let (_, score) = score_record(&record(None, fields));
        assert_eq!(score.get(Rule::Date26X), 0);
        assert_eq!(score.get(Rule::DatesMatched), 0);
    }

    #[test]
    fn test_classification_flag() {
        let (_, score) = score_record(&record(None, vec![field("060", '0', &[('a', "WB 100")])]));
        assert_eq!(score.get(Rule::Classification), 1);
        let (_, score) = score_record(&record(None, vec![field("082", '0', &[('a', "025")])]));
        assert_eq!(score.get(Rule::Classification), 0);
    }

    #[test]
    fn test_descr_last_field_wins() {
        let online = field("300", ' ', &[('a', "1 online resource (xii, 200 pages)")]);
        let print = field("300", ' ', &[('a', "200 pages")]);

        let (_, score) = score_record(&record(Some(FIXED_ONLINE), vec![print.clone(), online.clone()]));
        assert_eq!(score.get(Rule::Descr), 2);

        let (_, score) = score_record(&record(Some(FIXED_ONLINE), vec![online.clone(), print.clone()]));
        assert_eq!(score.get(Rule::Descr), 1);

        let (_, score) = score_record(&record(Some(FIXED), vec![online, print]));
        assert_eq!(score.get(Rule::Descr), 0);
    }

    #[test]
    fn test_descr_without_300_is_zero() {
        let (_, score) = score_record(&record(Some(FIXED_ONLINE), vec![]));
        assert_eq!(score.get(Rule::Descr), 0);
    }

    #[test]
    fn test_fixed_codes() {
        let (_, score) = score_record(&record(Some(FIXED), vec![]));
        assert_eq!(score.get(Rule::RsrcLang), 1);
        assert_eq!(score.get(Rule::CtryCode), 1);

        let (_, score) = score_record(&record(None, vec![]));
        assert_eq!(score.get(Rule::RsrcLang), 0);
        assert_eq!(score.get(Rule::CtryCode), 0);
    }

    #[test]
    fn test_cataloging_source() {
        let english_rda = field("040", ' ', &[('a', "DLC"), ('b', "eng"), ('e', "rda"), ('c', "DLC")]);
        let (_, score) = score_record(&record(None, vec![english_rda.clone()]));
        assert_eq!(score.get(Rule::CatLang), 1);
        assert_eq!(score.get(Rule::Rda), 1);

        let unstated = field("040", ' ', &[('a', "DLC"), ('c', "DLC")]);
        let (_, score) = score_record(&record(None, vec![unstated.clone()]));
        assert_eq!(score.get(Rule::CatLang), 1);
        assert_eq!(score.get(Rule::Rda), 0);

        let french = field("040", ' ', &[('a', "CaQQLA"), ('b', "fre"), ('e', "rda")]);
        let (_, score) = score_record(&record(None, vec![english_rda, french]));
        assert_eq!(score.get(Rule::CatLang), 0);
        assert_eq!(score.get(Rule::Rda), 1);
    }

    #[test]
    fn test_rda_last_cataloging_source_wins() {
        let aacr2 = field("040", ' ', &[('a', "DLC"), ('b', "eng"), ('c', "DLC")]);
        let rda = field("040", ' ', &[('a', "DLC"), ('b', "eng"), ('e', "rda")]);

        let (_, score) = score_record(&record(None, vec![rda.clone(), aacr2.clone()]));
        assert_eq!(score.get(Rule::Rda), 0);

        let (_, score) = score_record(&record(None, vec![aacr2, rda]));
        assert_eq!(score.get(Rule::Rda), 1);
    }

    #[test]
    fn test_fixed_codes_after_replacement_character() {
        let fixed = "\u{FFFD}50101s1985    nyu     o     000 0 eng d";
        let extent = field("300", ' ', &[('a', "1 online resource")]);
        let (_, score) = score_record(&record(Some(fixed), vec![extent]));
        assert_eq!(score.get(Rule::Date008), 1);
        assert_eq!(score.get(Rule::CtryCode), 1);
        assert_eq!(score.get(Rule::RsrcLang), 1);
        assert_eq!(score.get(Rule::Descr), 2);
    }

    #[test]
    fn test_no_cataloging_source() {
        let (_, score) = score_record(&record(Some(FIXED), vec![]));
        assert_eq!(score.get(Rule::CatLang), 0);
        assert_eq!(score.get(Rule::Rda), 0);
    }

    #[test]
    fn test_identifier_kept_verbatim() {
        let mut r = Record::new(Leader::default());
        r.add_control_field_str("001", "0010123");
        assert_eq!(record_identifier(&r), "0010123");
    }

    #[test]
    fn test_score_records_duplicate_identifier() {
        let first = record(None, vec![]);
        let second = record(None, vec![field("020", ' ', &[('a', "1")])]);
        let mut other = record(None, vec![]);
        other.add_control_field_str("001", "rec2");

        let map = score_records(&[first, other, second], false);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0).unwrap().0, "rec1");
        assert_eq!(map["rec1"].get(Rule::IsbnCount), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records: Vec<Record> = (0..50)
            .map(|i| {
                let mut r = record(Some(FIXED), (0..i % 7).map(|_| field("650", '0', &[('a', "S")])).collect());
                r.add_control_field_str("001", &format!("r{i}"));
                r
            })
            .collect();
        assert_eq!(score_records(&records, true), score_records(&records, false));
    }
}
