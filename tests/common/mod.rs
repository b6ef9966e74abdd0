//! Common test helpers shared across the integration tests.

#![allow(dead_code)]

use marc_completeness::reader::{FIELD_TERMINATOR, RECORD_TERMINATOR, SUBFIELD_DELIMITER};
use marc_completeness::{Field, Leader, Record};

/// 008 for a 1985 New York print book in English.
pub const FIXED_PRINT: &str = "850101s1985    nyu           000 0 eng d";

/// 008 for a 2012 English-country online resource in French.
pub const FIXED_ONLINE: &str = "120315s2012    enk     o     000 0 fre d";

/// Build a data field from (code, value) pairs.
pub fn field(tag: &str, ind1: char, ind2: char, subfields: &[(char, &str)]) -> Field {
    let mut field = Field::new(tag.to_string(), ind1, ind2);
    for (code, value) in subfields {
        field.add_subfield_str(*code, value);
    }
    field
}

/// A well-described print monograph.
pub fn catalogued_book(id: &str) -> Record {
    Record::builder(Leader::default())
        .control_field_str("001", id)
        .control_field_str("008", FIXED_PRINT)
        .field(field("020", ' ', ' ', &[('a', "9780394535920")]))
        .field(field(
            "040",
            ' ',
            ' ',
            &[('a', "DLC"), ('b', "eng"), ('e', "rda"), ('c', "DLC")],
        ))
        .field(field("050", '0', '0', &[('a', "PS3552.E53"), ('b', "S6 1985")]))
        .field(field("100", '1', ' ', &[('a', "Doe, Jane.")]))
        .field(field("245", '1', '0', &[('a', "A history of shelving")]))
        .field(field("250", ' ', ' ', &[('a', "First edition.")]))
        .field(field(
            "264",
            ' ',
            '1',
            &[('a', "New York :"), ('b', "Knopf,"), ('c', "1985.")],
        ))
        .field(field("300", ' ', ' ', &[('a', "xii, 301 pages ;"), ('c', "24 cm")]))
        .field(field("505", '0', ' ', &[('a', "Origins -- Practice.")]))
        .field(field("520", ' ', ' ', &[('a', "A survey.")]))
        .field(field("650", ' ', '0', &[('a', "Shelving (Furniture)"), ('x', "History.")]))
        .field(field("650", ' ', '7', &[('a', "Shelving"), ('2', "fast")]))
        .field(field("700", '1', ' ', &[('a', "Roe, Richard.")]))
        .build()
}

/// Encode a record as ISO 2709 bytes.
pub fn encode(record: &Record) -> Vec<u8> {
    let mut directory = Vec::new();
    let mut data = Vec::new();

    let mut entry = |tag: &str, bytes: &[u8]| {
        directory.extend_from_slice(tag.as_bytes());
        directory.extend_from_slice(format!("{:04}{:05}", bytes.len(), data.len()).as_bytes());
        data.extend_from_slice(bytes);
    };

    for (tag, value) in &record.control_fields {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(FIELD_TERMINATOR);
        entry(tag, &bytes);
    }
    for f in &record.fields {
        let mut bytes = vec![f.indicator1 as u8, f.indicator2 as u8];
        for sf in &f.subfields {
            bytes.push(SUBFIELD_DELIMITER);
            bytes.push(sf.code as u8);
            bytes.extend_from_slice(sf.value.as_bytes());
        }
        bytes.push(FIELD_TERMINATOR);
        entry(&f.tag, &bytes);
    }
    directory.push(FIELD_TERMINATOR);
    data.push(RECORD_TERMINATOR);

    let base = 24 + directory.len();
    let length = base + data.len();
    let mut out = format!("{length:05}nam a22{base:05} i 4500").into_bytes();
    out.extend_from_slice(&directory);
    out.extend_from_slice(&data);
    out
}

/// Encode several records back to back.
pub fn encode_all(records: &[Record]) -> Vec<u8> {
    records.iter().flat_map(encode).collect()
}
