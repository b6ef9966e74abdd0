//! MARC record leader.
//!
//! The leader is the 24-byte fixed header of every ISO 2709 record. The
//! completeness rules never look at it; the reader needs the record length
//! (positions 0-4) and the base address of data (positions 12-16) to walk
//! the directory. The remaining positions are kept as raw characters.

use crate::error::{MarcError, Result};

/// Length of the leader in bytes.
pub const LEADER_LEN: usize = 24;

/// MARC leader, decoded from the first 24 bytes of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leader {
    /// Record length (5 digits) - positions 0-4
    pub record_length: u32,
    /// Record status (1 char) - position 5
    pub record_status: char,
    /// Type of record (1 char) - position 6
    pub record_type: char,
    /// Bibliographic level (1 char) - position 7
    pub bibliographic_level: char,
    /// Character coding scheme (1 char) - position 9
    pub character_coding: char,
    /// Base address of data (5 digits) - positions 12-16
    pub data_base_address: u32,
    /// Encoding level (1 char) - position 17
    pub encoding_level: char,
}

impl Default for Leader {
    fn default() -> Self {
        Leader {
            record_length: 0,
            record_status: 'n',
            record_type: 'a',
            bibliographic_level: 'm',
            character_coding: 'a',
            data_base_address: 0,
            encoding_level: ' ',
        }
    }
}

impl Leader {
    /// Parse a leader from the first 24 bytes of a record.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 24 bytes are given or the length and
    /// base-address positions are not decimal digits.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < LEADER_LEN {
            return Err(MarcError::InvalidLeader(format!(
                "Leader must be at least {LEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Leader {
            record_length: parse_number(&bytes[0..5], "record length")?,
            record_status: bytes[5] as char,
            record_type: bytes[6] as char,
            bibliographic_level: bytes[7] as char,
            character_coding: bytes[9] as char,
            data_base_address: parse_number(&bytes[12..17], "base address of data")?,
            encoding_level: bytes[17] as char,
        })
    }

    /// Check that the length and base address leave room for the leader
    /// itself, and that the base address falls inside the record.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found.
    pub fn validate_for_reading(&self) -> Result<()> {
        if (self.record_length as usize) < LEADER_LEN {
            return Err(MarcError::InvalidLeader(format!(
                "Record length must be at least {LEADER_LEN}, got {}",
                self.record_length
            )));
        }
        if (self.data_base_address as usize) < LEADER_LEN {
            return Err(MarcError::InvalidLeader(format!(
                "Base address of data must be at least {LEADER_LEN}, got {}",
                self.data_base_address
            )));
        }
        if self.data_base_address > self.record_length {
            return Err(MarcError::InvalidLeader(format!(
                "Base address of data {} lies beyond record length {}",
                self.data_base_address, self.record_length
            )));
        }
        Ok(())
    }
}

fn parse_number(bytes: &[u8], what: &str) -> Result<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + u32::from(b - b'0'))
        } else {
            Err(MarcError::InvalidLeader(format!(
                "Invalid {what}: '{}'",
                String::from_utf8_lossy(bytes)
            )))
        }
    })
}
