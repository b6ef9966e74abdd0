//! The fixed rule set and the per-record [`QualityScore`].

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One completeness rule.
///
/// The set is closed: every [`QualityScore`] carries a value for each
/// variant, defaulting to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Count of ISBN (020) fields
    IsbnCount,
    /// Count of main author fields (100/110/111)
    Authors,
    /// Count of varying-form title fields (246)
    AltTitles,
    /// Count of edition statements (250)
    Edition,
    /// Count of added-entry contributor fields (700/710/711/720)
    Contribs,
    /// Count of series statements (440/490/800/810/830)
    Series,
    /// Contents note and summary: 2 both, 1 one, 0 neither
    TocAbstract,
    /// Date 1 extractable from the 008
    #[serde(rename = "date_008")]
    Date008,
    /// Four-digit year in the imprint date subfield
    #[serde(rename = "date_26X")]
    Date26X,
    /// 008 year equals imprint year
    DatesMatched,
    /// Any LC or NLM classification field
    Classification,
    /// LCSH subject headings, capped at 10
    SubjectsLcsh,
    /// MeSH subject headings, capped at 10
    SubjectsMesh,
    /// FAST subject headings, capped at 10
    SubjectsFast,
    /// Other subject headings, capped at 5
    SubjectsOther,
    /// Online resource signals in the 300 and the 008
    Descr,
    /// Language code in the 008
    RsrcLang,
    /// Country code in the 008
    CtryCode,
    /// Cataloging language is English or unstated
    CatLang,
    /// Record explicitly follows RDA
    Rda,
}

impl Rule {
    /// Number of rules.
    pub const COUNT: usize = 20;

    /// All rules in evaluation order.
    pub const ALL: [Rule; Rule::COUNT] = [
        Rule::IsbnCount,
        Rule::Authors,
        Rule::AltTitles,
        Rule::Edition,
        Rule::Contribs,
        Rule::Series,
        Rule::TocAbstract,
        Rule::Date008,
        Rule::Date26X,
        Rule::DatesMatched,
        Rule::Classification,
        Rule::SubjectsLcsh,
        Rule::SubjectsMesh,
        Rule::SubjectsFast,
        Rule::SubjectsOther,
        Rule::Descr,
        Rule::RsrcLang,
        Rule::CtryCode,
        Rule::CatLang,
        Rule::Rda,
    ];

    /// All rules in report column order.
    pub const DISPLAY_ORDER: [Rule; Rule::COUNT] = [
        Rule::IsbnCount,
        Rule::CatLang,
        Rule::RsrcLang,
        Rule::Rda,
        Rule::Classification,
        Rule::Authors,
        Rule::AltTitles,
        Rule::Edition,
        Rule::TocAbstract,
        Rule::Contribs,
        Rule::Series,
        Rule::CtryCode,
        Rule::Date008,
        Rule::Date26X,
        Rule::DatesMatched,
        Rule::Descr,
        Rule::SubjectsLcsh,
        Rule::SubjectsMesh,
        Rule::SubjectsFast,
        Rule::SubjectsOther,
    ];

    /// Column name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::IsbnCount => "isbn_count",
            Rule::Authors => "authors",
            Rule::AltTitles => "alt_titles",
            Rule::Edition => "edition",
            Rule::Contribs => "contribs",
            Rule::Series => "series",
            Rule::TocAbstract => "toc_abstract",
            Rule::Date008 => "date_008",
            Rule::Date26X => "date_26X",
            Rule::DatesMatched => "dates_matched",
            Rule::Classification => "classification",
            Rule::SubjectsLcsh => "subjects_lcsh",
            Rule::SubjectsMesh => "subjects_mesh",
            Rule::SubjectsFast => "subjects_fast",
            Rule::SubjectsOther => "subjects_other",
            Rule::Descr => "descr",
            Rule::RsrcLang => "rsrc_lang",
            Rule::CtryCode => "ctry_code",
            Rule::CatLang => "cat_lang",
            Rule::Rda => "rda",
        }
    }

    /// Largest value the rule can take, `None` for uncapped counts.
    #[must_use]
    pub fn ceiling(self) -> Option<u32> {
        match self {
            Rule::IsbnCount
            | Rule::Authors
            | Rule::AltTitles
            | Rule::Edition
            | Rule::Contribs
            | Rule::Series => None,
            Rule::TocAbstract | Rule::Descr => Some(2),
            Rule::SubjectsLcsh | Rule::SubjectsMesh | Rule::SubjectsFast => Some(10),
            Rule::SubjectsOther => Some(5),
            Rule::Date008
            | Rule::Date26X
            | Rule::DatesMatched
            | Rule::Classification
            | Rule::RsrcLang
            | Rule::CtryCode
            | Rule::CatLang
            | Rule::Rda => Some(1),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completeness score of one record: a value for every [`Rule`].
///
/// Built by the scorer and not changed afterwards; [`QualityScore::total`]
/// is always the sum of the rule values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QualityScore {
    values: [u32; Rule::COUNT],
}

impl QualityScore {
    /// Value of one rule.
    #[must_use]
    pub fn get(&self, rule: Rule) -> u32 {
        self.values[rule.index()]
    }

    /// Sum of all rule values.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }

    /// `(rule, value)` pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (Rule, u32)> + '_ {
        Rule::ALL.iter().map(move |&rule| (rule, self.get(rule)))
    }
}

/// Accumulates rule values while a record is scored.
#[derive(Debug, Default)]
pub(crate) struct ScoreBuilder {
    values: [u32; Rule::COUNT],
}

impl ScoreBuilder {
    pub(crate) fn set(&mut self, rule: Rule, value: u32) -> &mut Self {
        self.values[rule.index()] = value;
        self
    }

    pub(crate) fn set_flag(&mut self, rule: Rule, flag: bool) -> &mut Self {
        self.set(rule, u32::from(flag))
    }

    pub(crate) fn build(&self) -> QualityScore {
        QualityScore {
            values: self.values,
        }
    }
}

impl Serialize for QualityScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Rule::COUNT + 1))?;
        map.serialize_entry("total_rec_score", &self.total())?;
        for rule in Rule::DISPLAY_ORDER {
            map.serialize_entry(rule.as_str(), &self.get(rule))?;
        }
        map.end()
    }
}
