//! MARC bibliographic record structures.
//!
//! This module provides the read-only record model the completeness rules
//! consume:
//! - [`Record`] — leader, control fields and data fields in directory order
//! - [`Field`] — a tagged data field (010+) with two indicators
//! - [`Subfield`] — a coded value within a field
//!
//! # Examples
//!
//! ```
//! use marc_completeness::{Field, Leader, Record};
//!
//! let record = Record::builder(Leader::default())
//!     .control_field_str("001", "ocm12345")
//!     .field(
//!         Field::builder("650".to_string(), ' ', '0')
//!             .subfield_str('a', "Cataloging")
//!             .build(),
//!     )
//!     .build();
//!
//! assert_eq!(record.control_number(), Some("ocm12345"));
//! assert_eq!(record.fields_by_tag("650").count(), 1);
//! ```

use crate::fixed_data::FixedData;
use crate::leader::Leader;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::fmt;

/// A MARC bibliographic record
///
/// Data fields are stored in the order they appear in the record directory,
/// so lookups across several tags return fields in record order.
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// Record leader (24 bytes)
    pub leader: Leader,
    /// Control fields (001-009) - tag -> value, preserves insertion order
    pub control_fields: IndexMap<String, String>,
    /// Data fields (010+) in directory order
    pub fields: Vec<Field>,
}

/// A data field in a MARC record (fields 010 and higher)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field tag (3 digits)
    pub tag: String,
    /// First indicator
    pub indicator1: char,
    /// Second indicator
    pub indicator2: char,
    /// Subfields (stored in `SmallVec` to avoid allocation for typical fields with 4 or fewer subfields)
    pub subfields: SmallVec<[Subfield; 4]>,
}

/// A subfield within a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subfield {
    /// Subfield code (single character)
    pub code: char,
    /// Subfield value
    pub value: String,
}

impl Record {
    /// Create a new MARC record with the given leader
    #[must_use]
    pub fn new(leader: Leader) -> Self {
        Record {
            leader,
            control_fields: IndexMap::new(),
            fields: Vec::new(),
        }
    }

    /// Create a builder for fluently constructing MARC records
    #[must_use]
    pub fn builder(leader: Leader) -> RecordBuilder {
        RecordBuilder {
            record: Record::new(leader),
        }
    }

    /// Add or replace a control field (001-009)
    pub fn add_control_field(&mut self, tag: String, value: String) {
        self.control_fields.insert(tag, value);
    }

    /// Add a control field using string slices
    pub fn add_control_field_str(&mut self, tag: &str, value: &str) {
        self.add_control_field(tag.to_string(), value.to_string());
    }

    /// Get a control field value
    #[must_use]
    pub fn control_field(&self, tag: &str) -> Option<&str> {
        self.control_fields.get(tag).map(String::as_str)
    }

    /// Control number (001)
    #[must_use]
    pub fn control_number(&self) -> Option<&str> {
        self.control_field("001")
    }

    /// Fixed-length data elements (008), if present
    #[must_use]
    pub fn fixed_data(&self) -> Option<FixedData<'_>> {
        self.control_field("008").map(FixedData::new)
    }

    /// Append a data field
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Iterate over fields matching a specific tag
    ///
    /// An absent tag yields an empty iterator.
    pub fn fields_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |f| f.tag == tag)
    }

    /// Iterate over fields whose tag is any of `tags`, in record order
    ///
    /// # Examples
    ///
    /// ```
    /// use marc_completeness::{Field, Leader, Record};
    ///
    /// let mut record = Record::new(Leader::default());
    /// record.add_field(Field::new("264".to_string(), ' ', '1'));
    /// record.add_field(Field::new("260".to_string(), ' ', ' '));
    ///
    /// let tags: Vec<&str> = record
    ///     .fields_by_tags(&["260", "264"])
    ///     .map(|f| f.tag.as_str())
    ///     .collect();
    /// assert_eq!(tags, ["264", "260"]);
    /// ```
    pub fn fields_by_tags<'a>(
        &'a self,
        tags: &'a [&'a str],
    ) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields
            .iter()
            .filter(move |f| tags.contains(&f.tag.as_str()))
    }

    /// Whether any field carries one of `tags`
    #[must_use]
    pub fn has_any(&self, tags: &[&str]) -> bool {
        self.fields_by_tags(tags).next().is_some()
    }
}

/// Builder for creating MARC records fluently
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Add a control field
    #[must_use]
    pub fn control_field(mut self, tag: String, value: String) -> Self {
        self.record.add_control_field(tag, value);
        self
    }

    /// Add a control field using string slices
    #[must_use]
    pub fn control_field_str(mut self, tag: &str, value: &str) -> Self {
        self.record.add_control_field_str(tag, value);
        self
    }

    /// Add a data field
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.record.add_field(field);
        self
    }

    /// Build the record
    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

impl Field {
    /// Create a new data field
    #[must_use]
    pub fn new(tag: String, indicator1: char, indicator2: char) -> Self {
        Field {
            tag,
            indicator1,
            indicator2,
            subfields: SmallVec::new(),
        }
    }

    /// Create a builder for constructing fields fluently
    #[must_use]
    pub fn builder(tag: String, indicator1: char, indicator2: char) -> FieldBuilder {
        FieldBuilder {
            field: Field::new(tag, indicator1, indicator2),
        }
    }

    /// Add a subfield
    pub fn add_subfield(&mut self, code: char, value: String) {
        self.subfields.push(Subfield { code, value });
    }

    /// Add a subfield using a string slice
    pub fn add_subfield_str(&mut self, code: char, value: &str) {
        self.add_subfield(code, value.to_string());
    }

    /// Get all values for a subfield code, empty if the code is absent
    #[must_use]
    pub fn subfield_values(&self, code: char) -> Vec<&str> {
        self.subfields
            .iter()
            .filter(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
            .collect()
    }

    /// Get first value for a subfield code
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Printable line form of the field.
    ///
    /// Renders `=TAG  I1I2$aValue$bValue`, with blank indicators shown as
    /// `\`. The second indicator is always at character offset 7.
    ///
    /// ```
    /// use marc_completeness::Field;
    ///
    /// let field = Field::builder("650".to_string(), ' ', '7')
    ///     .subfield_str('a', "Cats")
    ///     .subfield_str('2', "fast")
    ///     .build();
    /// assert_eq!(field.text(), "=650  \\7$aCats$2fast");
    /// ```
    #[must_use]
    pub fn text(&self) -> String {
        self.to_string()
    }
}

fn display_indicator(ind: char) -> char {
    if ind == ' ' {
        '\\'
    } else {
        ind
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "={}  {}{}",
            self.tag,
            display_indicator(self.indicator1),
            display_indicator(self.indicator2)
        )?;
        for sf in &self.subfields {
            write!(f, "${}{}", sf.code, sf.value)?;
        }
        Ok(())
    }
}

/// Builder for creating fields fluently
#[derive(Debug)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Add a subfield
    #[must_use]
    pub fn subfield(mut self, code: char, value: String) -> Self {
        self.field.add_subfield(code, value);
        self
    }

    /// Add a subfield using a string slice
    #[must_use]
    pub fn subfield_str(mut self, code: char, value: &str) -> Self {
        self.field.add_subfield_str(code, value);
        self
    }

    /// Build the field
    #[must_use]
    pub fn build(self) -> Field {
        self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(ind2: char, source: Option<&str>) -> Field {
        let mut field = Field::new("650".to_string(), ' ', ind2);
        field.add_subfield_str('a', "Libraries");
        if let Some(code) = source {
            field.add_subfield_str('2', code);
        }
        field
    }

    #[test]
    fn test_control_fields() {
        let mut record = Record::new(Leader::default());
        record.add_control_field_str("001", "12345");
        record.add_control_field_str("008", "850101s1985    nyu           000 0 eng d");

        assert_eq!(record.control_number(), Some("12345"));
        assert!(record.fixed_data().is_some());
        assert_eq!(record.control_field("005"), None);
    }

    #[test]
    fn test_fields_by_tag_absent_is_empty() {
        let record = Record::new(Leader::default());
        assert_eq!(record.fields_by_tag("245").count(), 0);
        assert_eq!(record.fields_by_tags(&["100", "110"]).count(), 0);
        assert!(!record.has_any(&["050", "060", "090"]));
    }

    #[test]
    fn test_fields_by_tags_keeps_record_order() {
        let record = Record::builder(Leader::default())
            .field(subject('0', None))
            .field(Field::new("600".to_string(), '1', '0'))
            .field(subject('2', None))
            .build();

        let tags: Vec<&str> = record
            .fields_by_tags(&["600", "650"])
            .map(|f| f.tag.as_str())
            .collect();
        assert_eq!(tags, ["650", "600", "650"]);
        assert!(record.has_any(&["600"]));
    }

    #[test]
    fn test_subfield_values() {
        let field = Field::builder("040".to_string(), ' ', ' ')
            .subfield_str('a', "DLC")
            .subfield_str('b', "eng")
            .subfield_str('d', "OCLCQ")
            .subfield_str('d', "UtOrBLW")
            .build();

        assert_eq!(field.subfield_values('d'), vec!["OCLCQ", "UtOrBLW"]);
        assert!(field.subfield_values('e').is_empty());
        assert_eq!(field.get_subfield('b'), Some("eng"));
    }

    #[test]
    fn test_text_form() {
        assert_eq!(subject('0', None).text(), "=650  \\0$aLibraries");
        assert_eq!(
            subject('7', Some("fast")).text(),
            "=650  \\7$aLibraries$2fast"
        );

        let field = Field::builder("040".to_string(), ' ', ' ')
            .subfield_str('a', "DLC")
            .subfield_str('e', "rda")
            .build();
        assert_eq!(field.text(), "=040  \\\\$aDLC$erda");
    }

    #[test]
    fn test_second_indicator_at_offset_seven() {
        let text = subject('2', None).text();
        assert_eq!(text.chars().nth(7), Some('2'));
    }
}
