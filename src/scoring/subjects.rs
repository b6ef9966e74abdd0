//! Subject heading vocabulary classification.
//!
//! The thesaurus of a 6XX heading is read from its second indicator:
//! `0` is LCSH, `2` is MeSH, and `7` means "source in `$2`", which counts as
//! FAST only when the field text carries `$2fast`. Everything else, including
//! `7` with another source, is "other".

use crate::record::Field;

/// Position of the second indicator in [`Field::text`].
const IND2_OFFSET: usize = 7;

/// Marker for FAST in the printable field text.
const FAST_MARKER: &str = "2fast";

/// Cap for LCSH, MeSH and FAST counts.
pub const VOCABULARY_CAP: u32 = 10;
/// Cap for headings from any other source.
pub const OTHER_CAP: u32 = 5;

/// Vocabulary a subject heading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// Library of Congress Subject Headings
    Lcsh,
    /// Medical Subject Headings
    Mesh,
    /// Faceted Application of Subject Terminology
    Fast,
    /// Anything else
    Other,
}

/// Classify one subject field, first match wins in the order LCSH, MeSH, FAST.
#[must_use]
pub fn classify(field: &Field) -> Vocabulary {
    let text = field.text();
    let mut chars = text.char_indices().skip(IND2_OFFSET);
    match chars.next() {
        Some((_, '0')) => Vocabulary::Lcsh,
        Some((_, '2')) => Vocabulary::Mesh,
        Some((i, '7')) if text[i + 1..].contains(FAST_MARKER) => Vocabulary::Fast,
        _ => Vocabulary::Other,
    }
}

/// Capped per-vocabulary counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectCounts {
    /// LCSH headings (at most 10)
    pub lcsh: u32,
    /// MeSH headings (at most 10)
    pub mesh: u32,
    /// FAST headings (at most 10)
    pub fast: u32,
    /// Other headings (at most 5)
    pub other: u32,
}

impl SubjectCounts {
    /// Count `fields` by vocabulary, then apply the caps.
    pub fn tally<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Self {
        let mut counts = SubjectCounts::default();
        for field in fields {
            match classify(field) {
                Vocabulary::Lcsh => counts.lcsh += 1,
                Vocabulary::Mesh => counts.mesh += 1,
                Vocabulary::Fast => counts.fast += 1,
                Vocabulary::Other => counts.other += 1,
            }
        }
        SubjectCounts {
            lcsh: counts.lcsh.min(VOCABULARY_CAP),
            mesh: counts.mesh.min(VOCABULARY_CAP),
            fast: counts.fast.min(VOCABULARY_CAP),
            other: counts.other.min(OTHER_CAP),
        }
    }
}
