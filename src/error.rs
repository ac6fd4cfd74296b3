//! Error types for MARC operations.
//!
//! This module provides the [`MarcError`] type for every fatal condition the
//! codec can hit and the [`Result`] convenience type. Recoverable problems are
//! not errors; they are recorded as [`ValidationWarning`](crate::ValidationWarning)s
//! on the field they concern.

use thiserror::Error;

/// Error type for all MARC library operations.
///
/// A decode error aborts the current record only: no partial [`Record`](crate::Record)
/// is ever returned alongside it.
#[derive(Error, Debug)]
pub enum MarcError {
    /// The first five bytes are not digits equal to the record's byte length.
    #[error("Invalid record length: leader says \"{declared}\", but the record is {actual} bytes")]
    InvalidRecordLength {
        /// The five leading bytes, rendered lossily.
        declared: String,
        /// The actual number of bytes supplied.
        actual: usize,
    },

    /// The record is too short to hold a leader, a directory terminator and a
    /// record terminator.
    #[error("Record too short: {0} bytes")]
    RecordTooShort(usize),

    /// The last byte of the record is not the record terminator.
    #[error("Invalid record terminator")]
    MissingTerminator,

    /// Leader positions 12-16 are not digits, or point outside the record.
    #[error("Invalid base address of data: {0}")]
    InvalidBaseAddress(String),

    /// The byte just before the base address is not a field terminator.
    #[error("No directory found: byte {0} is not a field terminator")]
    MissingDirectoryTerminator(usize),

    /// The directory is not a whole number of 12-byte entries.
    #[error("Invalid directory length: {0} bytes")]
    InvalidDirectoryLength(usize),

    /// A directory entry carries a tag that is not three ASCII letters or digits.
    #[error("Invalid tag in directory: \"{0}\"")]
    InvalidTag(String),

    /// A directory entry's length or offset is not made of ASCII digits.
    #[error("Invalid {part} in directory, tag {tag}: \"{value}\"")]
    InvalidDirectoryEntry {
        /// Tag of the entry.
        tag: String,
        /// Which slot was malformed (`"length"` or `"offset"`).
        part: &'static str,
        /// The slot's bytes, rendered lossily.
        value: String,
    },

    /// A directory entry points past the end of the record.
    #[error("Directory entry runs off the end of the record, tag {tag}: {offset} + {length} > {limit}")]
    EntryOutOfBounds {
        /// Tag of the entry.
        tag: String,
        /// Declared offset from the base address.
        offset: usize,
        /// Declared field length.
        length: usize,
        /// The bound that was exceeded.
        limit: usize,
    },

    /// A field's bytes do not end with the field terminator.
    #[error("Field does not end in a field terminator, tag {0}")]
    MissingFieldTerminator(String),

    /// A field cannot be serialized (bad tag, tag of the wrong kind, or
    /// characters that do not fit in a byte).
    #[error("Field {tag} cannot be encoded: {reason}")]
    UnencodableField {
        /// Tag of the field.
        tag: String,
        /// Why the field was rejected.
        reason: String,
    },

    /// An encoded field does not fit in the 4-digit directory length slot.
    #[error("Field {tag} is {length} bytes, more than a directory entry can hold")]
    FieldTooLong {
        /// Tag of the field.
        tag: String,
        /// Encoded length including the terminator.
        length: usize,
    },

    /// An encoded record does not fit in the 5-digit leader length slot.
    #[error("Record is {0} bytes, more than the leader can hold")]
    RecordTooLong(usize),

    /// Error indicating an invalid leader (24-byte header).
    #[error("Invalid leader: {0}")]
    InvalidLeader(String),

    /// A record was written after [`MarcWriter::finish`](crate::MarcWriter::finish).
    #[error("Cannot write to a finished writer")]
    WriterFinished,

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MarcError {
    /// Whether this error came from the underlying reader or writer rather
    /// than from the bytes of a record.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, MarcError::IoError(_))
    }
}

/// Convenience type alias for [`std::result::Result`] with [`MarcError`].
pub type Result<T> = std::result::Result<T, MarcError>;
