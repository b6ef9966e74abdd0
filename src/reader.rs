//! Reading MARC records from ISO 2709 binary streams.
//!
//! [`MarcReader`] decodes one record at a time from any [`std::io::Read`]
//! source. Decoding is strict: a malformed leader, directory or field stops
//! the reader with an error instead of skipping the record, so record counts
//! and identifiers in a completeness report always describe the whole file.
//!
//! # Examples
//!
//! ```no_run
//! use marc_completeness::MarcReader;
//! use std::fs::File;
//!
//! let file = File::open("records.mrc")?;
//! let mut reader = MarcReader::new(file);
//!
//! while let Some(record) = reader.read_record()? {
//!     println!("{:?}", record.control_number());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{MarcError, Result};
use crate::leader::{Leader, LEADER_LEN};
use crate::record::{Field, Record};
use std::io::Read;

/// End of a field (and of the directory).
pub const FIELD_TERMINATOR: u8 = 0x1E;
/// Start of a subfield.
pub const SUBFIELD_DELIMITER: u8 = 0x1F;
/// End of a record.
pub const RECORD_TERMINATOR: u8 = 0x1D;

const DIRECTORY_ENTRY_LEN: usize = 12;

/// Reader for ISO 2709 binary MARC format.
///
/// Also usable as an iterator of `Result<Record>`; iteration stops after the
/// first error.
#[derive(Debug)]
pub struct MarcReader<R: Read> {
    reader: R,
    records_read: usize,
    failed: bool,
}

impl<R: Read> MarcReader<R> {
    /// Create a new MARC reader over `reader`.
    pub fn new(reader: R) -> Self {
        MarcReader {
            reader,
            records_read: 0,
            failed: false,
        }
    }

    /// Number of records decoded so far.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Read a single MARC record.
    ///
    /// Returns `Ok(Some(record))` for a decoded record and `Ok(None)` at a
    /// clean end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the leader or directory is malformed, a field lies
    /// outside the data area, the stream ends inside a record, or an I/O
    /// error occurs.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        let mut leader_bytes = [0u8; LEADER_LEN];
        match read_full(&mut self.reader, &mut leader_bytes)? {
            0 => return Ok(None),
            n if n < LEADER_LEN => {
                return Err(MarcError::TruncatedRecord(format!(
                    "Stream ended after {n} bytes of leader"
                )))
            },
            _ => {},
        }

        let leader = Leader::from_bytes(&leader_bytes)?;
        leader.validate_for_reading()?;

        let mut body = vec![0u8; leader.record_length as usize - LEADER_LEN];
        let got = read_full(&mut self.reader, &mut body)?;
        if got < body.len() {
            return Err(MarcError::TruncatedRecord(format!(
                "Expected {} bytes after leader, got {got}",
                body.len()
            )));
        }

        let record = decode_body(leader, &body)?;
        self.records_read += 1;
        Ok(Some(record))
    }
}

impl<R: Read> Iterator for MarcReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            },
        }
    }
}

/// Fill `buf` as far as the source allows; returns bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {},
            Err(e) => return Err(MarcError::IoError(e)),
        }
    }
    Ok(filled)
}

/// Decode directory and data area (everything after the leader).
fn decode_body(leader: Leader, body: &[u8]) -> Result<Record> {
    let base = leader.data_base_address as usize - LEADER_LEN;
    let (directory, data) = body.split_at(base);
    let directory = match memchr::memchr(FIELD_TERMINATOR, directory) {
        Some(end) => &directory[..end],
        None => directory,
    };

    if directory.len() % DIRECTORY_ENTRY_LEN != 0 {
        return Err(MarcError::InvalidRecord(format!(
            "Directory length {} is not a multiple of {DIRECTORY_ENTRY_LEN}",
            directory.len()
        )));
    }

    let mut record = Record::new(leader);
    for entry in directory.chunks_exact(DIRECTORY_ENTRY_LEN) {
        let tag = String::from_utf8_lossy(&entry[0..3]).into_owned();
        let length = parse_digits(&entry[3..7])?;
        let start = parse_digits(&entry[7..12])?;

        let field_bytes = data.get(start..start + length).ok_or_else(|| {
            MarcError::InvalidRecord(format!(
                "Field {tag} ({start}+{length}) exceeds data area of {} bytes",
                data.len()
            ))
        })?;
        let field_bytes = field_bytes
            .strip_suffix(&[FIELD_TERMINATOR])
            .unwrap_or(field_bytes);

        if is_control_tag(&tag) {
            let value = String::from_utf8_lossy(field_bytes).into_owned();
            record.add_control_field(tag, value);
        } else {
            let field = decode_data_field(tag, field_bytes)?;
            record.add_field(field);
        }
    }

    Ok(record)
}

fn is_control_tag(tag: &str) -> bool {
    tag.len() == 3 && tag.starts_with("00") && tag.bytes().all(|b| b.is_ascii_digit())
}

/// Decode indicators and subfields of a data field (terminator already removed).
fn decode_data_field(tag: String, bytes: &[u8]) -> Result<Field> {
    if bytes.len() < 2 {
        return Err(MarcError::InvalidField(format!(
            "Tag {tag}: data field too short (needs indicators)"
        )));
    }

    let mut field = Field::new(tag, bytes[0] as char, bytes[1] as char);
    let content = &bytes[2..];
    if content.is_empty() {
        return Ok(field);
    }
    if content[0] != SUBFIELD_DELIMITER {
        return Err(MarcError::InvalidField(format!(
            "Tag {}: expected subfield delimiter after indicators",
            field.tag
        )));
    }

    // First split piece is the empty slice before the leading delimiter.
    for chunk in content.split(|&b| b == SUBFIELD_DELIMITER).skip(1) {
        let Some((&code, value)) = chunk.split_first() else {
            continue;
        };
        field.add_subfield(code as char, String::from_utf8_lossy(value).into_owned());
    }

    Ok(field)
}

fn parse_digits(bytes: &[u8]) -> Result<usize> {
    bytes.iter().try_fold(0usize, |acc, &b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + usize::from(b - b'0'))
        } else {
            Err(MarcError::InvalidRecord(format!(
                "Invalid directory number '{}'",
                String::from_utf8_lossy(bytes)
            )))
        }
    })
}
