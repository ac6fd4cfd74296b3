//! Encoding MARC records to ISO 2709 binary format.
//!
//! [`encode_with_leader`] is the encoder proper: it serializes the fields in
//! record order, rebuilds the directory and returns the bytes together with
//! the updated leader, leaving the record untouched. [`MarcWriter`] writes
//! encoded records to any [`std::io::Write`] destination.
//!
//! # Examples
//!
//! ```
//! use marc_codec::{Field, MarcWriter, Record};
//!
//! let mut record = Record::new();
//! record.append(Field::data("245", '1', '0', [('a', "Title")]));
//!
//! let mut buffer = Vec::new();
//! let mut writer = MarcWriter::new(&mut buffer);
//! writer.write_record(&record)?;
//! writer.finish()?;
//! assert_eq!(&buffer[..5], b"00048");
//! # Ok::<(), marc_codec::MarcError>(())
//! ```

use crate::constants::{FIELD_TERMINATOR, LEADER_LEN, RECORD_TERMINATOR};
use crate::directory;
use crate::error::{MarcError, Result};
use crate::leader::Leader;
use crate::record::Record;
use std::io::Write;

/// Encode a record without modifying it.
///
/// Returns the record bytes and the leader they start with: the record's
/// leader with the record length, base address and the `"22"`/`"4500"`
/// constants rewritten. All other leader bytes are copied unchanged.
///
/// # Errors
///
/// - [`MarcError::UnencodableField`] if a field fails
///   [`Field::check_encodable`](crate::Field::check_encodable)
/// - [`MarcError::FieldTooLong`] if a field needs more than 9999 bytes
/// - [`MarcError::RecordTooLong`] if the record needs more than 99999 bytes
pub fn encode_with_leader(record: &Record) -> Result<(Vec<u8>, Leader)> {
    let layout = directory::build(record.fields())?;

    let base_address = LEADER_LEN + layout.directory.len() + 1;
    let record_length = base_address + layout.data_len() + 1;

    let mut leader = record.leader;
    leader.set_lengths(record_length, base_address)?;

    let mut bytes = Vec::with_capacity(record_length);
    bytes.extend_from_slice(leader.as_bytes());
    bytes.extend_from_slice(&layout.directory);
    bytes.push(FIELD_TERMINATOR);
    bytes.extend_from_slice(&layout.data);
    bytes.push(RECORD_TERMINATOR);

    Ok((bytes, leader))
}

/// Encode a record to bytes.
///
/// The same as [`encode_with_leader`] without the leader.
///
/// ```
/// use marc_codec::{encode_record, Field, Record};
///
/// let mut record = Record::new();
/// record.append(Field::control("001", "abc123"));
/// let bytes = encode_record(&record)?;
/// assert_eq!(bytes.len(), 24 + 12 + 1 + 7 + 1);
/// assert_eq!(&bytes[12..17], b"00037");
/// # Ok::<(), marc_codec::MarcError>(())
/// ```
///
/// # Errors
///
/// See [`encode_with_leader`].
pub fn encode_record(record: &Record) -> Result<Vec<u8>> {
    encode_with_leader(record).map(|(bytes, _)| bytes)
}

/// Writer for ISO 2709 binary MARC format.
///
/// Records are encoded one at a time and written back to back; the output is
/// a valid multi-record stream.
#[derive(Debug)]
pub struct MarcWriter<W: Write> {
    writer: W,
    records_written: usize,
    finished: bool,
}

impl<W: Write> MarcWriter<W> {
    /// Create a new MARC writer.
    pub fn new(writer: W) -> Self {
        MarcWriter {
            writer,
            records_written: 0,
            finished: false,
        }
    }

    /// Encode a record and write it.
    ///
    /// Nothing is written if the record cannot be encoded.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::WriterFinished`] after [`MarcWriter::finish`], any
    /// error from [`encode_record`], or an I/O error from the destination.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        if self.finished {
            return Err(MarcError::WriterFinished);
        }

        let bytes = encode_record(record)?;
        self.writer.write_all(&bytes)?;

        self.records_written += 1;
        Ok(())
    }

    /// Flush the writer and mark it as finished.
    ///
    /// After calling `finish`, no more records can be written.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing the underlying writer fails.
    pub fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }

    /// Returns the number of records written so far.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
