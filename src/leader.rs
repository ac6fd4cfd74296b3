//! MARC record leader.
//!
//! The leader is a 24-byte fixed-length field at the start of every MARC record.
//! The codec only interprets the slots it needs to lay out a record; every
//! other byte is carried through untouched.
//!
//! # Structure
//!
//! - Positions 0-4: Record length (5 digits)
//! - Position 5: Record status
//! - Position 6: Record type (a = language material, c = music, etc.)
//! - Position 7: Bibliographic level (m = monograph, s = serial, etc.)
//! - Position 8: Control record type
//! - Position 9: Character coding (space = MARC-8, a = UTF-8)
//! - Positions 10-11: Indicator count and subfield code count, always "22"
//! - Positions 12-16: Base address of data (5 digits)
//! - Positions 17-19: Encoding level, cataloging form, multipart level
//! - Positions 20-23: Entry map, always "4500"

use crate::constants::{LEADER_LEN, MAX_RECORD_LEN};
use crate::error::{MarcError, Result};
use crate::validation::parse_ascii_digits;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MARC Leader - 24 bytes at the start of every MARC record.
///
/// Stored as the raw byte buffer so that decode and encode are byte-exact.
/// A fresh leader is all blanks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leader([u8; LEADER_LEN]);

impl Default for Leader {
    fn default() -> Self {
        Leader([b' '; LEADER_LEN])
    }
}

impl Leader {
    /// Build a leader from exactly 24 bytes.
    ///
    /// No other validation is done; the digit slots are only read on demand.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::InvalidLeader`] if `bytes` is not 24 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; LEADER_LEN] = bytes.try_into().map_err(|_| {
            MarcError::InvalidLeader(format!(
                "Leader must be exactly {LEADER_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Leader(raw))
    }

    /// Replace the whole leader.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::InvalidLeader`] if `bytes` is not 24 bytes long;
    /// the leader is left unchanged in that case.
    pub fn set_raw(&mut self, bytes: &[u8]) -> Result<()> {
        *self = Leader::from_bytes(bytes)?;
        Ok(())
    }

    /// The raw 24 bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; LEADER_LEN] {
        &self.0
    }

    /// Record length from positions 0-4, if they are digits.
    #[must_use]
    pub fn record_length(&self) -> Option<usize> {
        parse_ascii_digits(&self.0[0..5])
    }

    /// Base address of data from positions 12-16, if they are digits.
    #[must_use]
    pub fn base_address(&self) -> Option<usize> {
        parse_ascii_digits(&self.0[12..17])
    }

    /// Write the layout slots: record length at 0-4, `"22"` at 10-11, base
    /// address at 12-16 and `"4500"` at 20-23. Every other byte is left as is.
    ///
    /// Calling it twice with the same values leaves the leader unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::RecordTooLong`] if either value needs more than
    /// five digits; the leader is left unchanged in that case.
    pub fn set_lengths(&mut self, record_length: usize, base_address: usize) -> Result<()> {
        if record_length > MAX_RECORD_LEN {
            return Err(MarcError::RecordTooLong(record_length));
        }
        if base_address > MAX_RECORD_LEN {
            return Err(MarcError::RecordTooLong(base_address));
        }
        self.0[0..5].copy_from_slice(format!("{record_length:05}").as_bytes());
        self.0[10..12].copy_from_slice(b"22");
        self.0[12..17].copy_from_slice(format!("{base_address:05}").as_bytes());
        self.0[20..24].copy_from_slice(b"4500");
        Ok(())
    }

    /// Record status (position 5).
    #[must_use]
    pub fn record_status(&self) -> char {
        char::from(self.0[5])
    }

    /// Type of record (position 6).
    #[must_use]
    pub fn record_type(&self) -> char {
        char::from(self.0[6])
    }

    /// Bibliographic level (position 7).
    #[must_use]
    pub fn bibliographic_level(&self) -> char {
        char::from(self.0[7])
    }

    /// Type of control (position 8).
    #[must_use]
    pub fn control_record_type(&self) -> char {
        char::from(self.0[8])
    }

    /// Character coding scheme (position 9).
    #[must_use]
    pub fn character_coding(&self) -> char {
        char::from(self.0[9])
    }

    /// Encoding level (position 17).
    #[must_use]
    pub fn encoding_level(&self) -> char {
        char::from(self.0[17])
    }

    /// Descriptive cataloging form (position 18).
    #[must_use]
    pub fn cataloging_form(&self) -> char {
        char::from(self.0[18])
    }

    /// Multipart resource record level (position 19).
    #[must_use]
    pub fn multipart_level(&self) -> char {
        char::from(self.0[19])
    }
}

impl fmt::Display for Leader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}
