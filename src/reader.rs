//! Decoding MARC records from bytes and binary streams.
//!
//! [`decode_record`] turns the bytes of exactly one record into a [`Record`].
//! [`MarcReader`] pulls records one at a time from any [`BufRead`] source,
//! isolating failures so that a malformed record never stops the ones after
//! it.
//!
//! # Examples
//!
//! Reading records from a file:
//!
//! ```no_run
//! use marc_codec::MarcReader;
//!
//! let mut reader = MarcReader::from_path("records.mrc")?;
//! for result in &mut reader {
//!     match result {
//!         Ok(record) => println!("{record}"),
//!         Err(e) => eprintln!("skipped: {e}"),
//!     }
//! }
//! println!("{} read, {} skipped", reader.records_read(), reader.errors());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Reading from a buffer:
//!
//! ```
//! use marc_codec::MarcReader;
//!
//! let data: &[u8] = b"";
//! let mut reader = MarcReader::from_bytes(data);
//! assert!(reader.read_record()?.is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::constants::{
    DIRECTORY_ENTRY_LEN, FIELD_TERMINATOR, LEADER_LEN, MAX_RECORD_LEN, RECORD_TERMINATOR,
};
use crate::directory;
use crate::error::{MarcError, Result};
use crate::field::Field;
use crate::leader::Leader;
use crate::record::Record;
use crate::validation::parse_ascii_digits;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Leader, directory terminator and record terminator.
const MIN_RECORD_LEN: usize = LEADER_LEN + 2;

/// Decode the bytes of exactly one record.
///
/// The input must be the whole record, from the first leader byte through
/// the record terminator. Decoding is all or nothing: on error no partial
/// record is produced. Recoverable problems inside fields (bad indicators,
/// empty subfields, bad tags) do not fail the decode; they are recorded as
/// warnings on the affected fields.
///
/// # Examples
///
/// ```
/// use marc_codec::{decode_record, encode_record, Field, Record};
///
/// let mut record = Record::new();
/// record.append(Field::control("001", "abc123"));
/// record.append(Field::data("245", '1', '0', [('a', "Title")]));
///
/// let bytes = encode_record(&record)?;
/// let decoded = decode_record(&bytes)?;
/// assert_eq!(decoded.subfield("245", 'a'), Some(&b"Title"[..]));
/// assert_eq!(encode_record(&decoded)?, bytes);
/// # Ok::<(), marc_codec::MarcError>(())
/// ```
///
/// # Errors
///
/// - [`MarcError::InvalidRecordLength`] if the first five bytes are not
///   digits equal to `bytes.len()`
/// - [`MarcError::RecordTooShort`] if there is no room for a leader and both
///   terminators
/// - [`MarcError::MissingTerminator`] if the last byte is not `0x1D`
/// - [`MarcError::InvalidBaseAddress`] if leader positions 12-16 are not
///   digits or point outside the record
/// - [`MarcError::MissingDirectoryTerminator`] if the directory does not end
///   in `0x1E`
/// - any directory error from [`directory::parse`]
/// - [`MarcError::EntryOutOfBounds`] if a field runs past the input
/// - [`MarcError::MissingFieldTerminator`] from [`Field::decode`]
pub fn decode_record(bytes: &[u8]) -> Result<Record> {
    let record_length = check_record_length(bytes)?;
    tracing::trace!(record_length, "record length checked");

    if record_length < MIN_RECORD_LEN {
        return Err(MarcError::RecordTooShort(record_length));
    }
    if bytes.last() != Some(&RECORD_TERMINATOR) {
        return Err(MarcError::MissingTerminator);
    }

    let leader = Leader::from_bytes(&bytes[..LEADER_LEN])?;

    let base_slot = &bytes[12..17];
    let base_address = parse_ascii_digits(base_slot)
        .filter(|&base| base > LEADER_LEN && base < record_length)
        .ok_or_else(|| {
            MarcError::InvalidBaseAddress(String::from_utf8_lossy(base_slot).into_owned())
        })?;
    tracing::trace!(base_address, "base address checked");

    let directory_end = base_address - 1;
    if bytes[directory_end] != FIELD_TERMINATOR {
        return Err(MarcError::MissingDirectoryTerminator(directory_end));
    }

    let entries = directory::parse(&bytes[LEADER_LEN..directory_end], record_length)?;
    tracing::trace!(
        entries = entries.len(),
        directory_len = entries.len() * DIRECTORY_ENTRY_LEN,
        "directory parsed"
    );

    let mut record = Record::with_leader(leader);
    for entry in entries {
        let start = base_address + entry.offset;
        let end = start + entry.length;
        let Some(raw) = bytes.get(start..end) else {
            return Err(MarcError::EntryOutOfBounds {
                tag: entry.tag,
                offset: entry.offset,
                length: entry.length,
                limit: record_length - base_address,
            });
        };
        record.append(Field::decode(&entry.tag, raw)?);
    }

    Ok(record)
}

/// The leading five bytes must be digits equal to the actual length.
fn check_record_length(bytes: &[u8]) -> Result<usize> {
    let slot = &bytes[..bytes.len().min(5)];
    match parse_ascii_digits(slot) {
        Some(declared) if slot.len() == 5 && declared == bytes.len() => Ok(declared),
        _ => Err(MarcError::InvalidRecordLength {
            declared: String::from_utf8_lossy(slot).into_owned(),
            actual: bytes.len(),
        }),
    }
}

/// Options for [`MarcReader`] and the batch decoders.
///
/// # Examples
///
/// ```
/// use marc_codec::ReaderConfig;
///
/// let config = ReaderConfig {
///     trim_line_breaks: false,
///     ..ReaderConfig::default()
/// };
/// assert_eq!(config.max_record_length, 99_999);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Strip `\r` and `\n` bytes found in front of a record.
    pub trim_line_breaks: bool,
    /// Pieces longer than this are rejected without being decoded. A
    /// [`MarcReader`] never buffers more than this plus one byte of a piece.
    pub max_record_length: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            trim_line_breaks: true,
            max_record_length: MAX_RECORD_LEN,
        }
    }
}

/// Decode one piece cut from a multi-record source.
///
/// Returns `None` for a piece with nothing left after trimming, which is
/// how trailing line breaks at the end of a file show up.
pub(crate) fn decode_piece(piece: &[u8], config: &ReaderConfig) -> Option<Result<Record>> {
    let piece = if config.trim_line_breaks {
        trim_leading_line_breaks(piece)
    } else {
        piece
    };
    if piece.is_empty() {
        return None;
    }
    if piece.len() > config.max_record_length {
        return Some(Err(MarcError::InvalidRecordLength {
            declared: String::from_utf8_lossy(&piece[..5.min(piece.len())]).into_owned(),
            actual: piece.len(),
        }));
    }
    Some(decode_record(piece))
}

fn trim_leading_line_breaks(piece: &[u8]) -> &[u8] {
    let start = piece
        .iter()
        .position(|&b| b != b'\r' && b != b'\n')
        .unwrap_or(piece.len());
    &piece[start..]
}

/// Outcome of reading one piece of a stream.
enum Piece {
    End,
    Complete,
    /// Longer than the configured maximum; holds the full length dropped.
    Oversized(usize),
}

/// Reader for ISO 2709 binary MARC streams.
///
/// `MarcReader` reads one record at a time, up to and including each record
/// terminator, and decodes it with [`decode_record`]. A record that fails to
/// decode is reported as an `Err` for that record only; the next call carries
/// on with the following record. An I/O error ends the stream.
///
/// The reader is also an [`Iterator`] over `Result<Record>`.
#[derive(Debug)]
pub struct MarcReader<R: BufRead> {
    reader: R,
    config: ReaderConfig,
    records_read: usize,
    errors: usize,
    done: bool,
}

impl<R: BufRead> MarcReader<R> {
    /// Create a new MARC reader with the default [`ReaderConfig`].
    pub fn new(reader: R) -> Self {
        MarcReader {
            reader,
            config: ReaderConfig::default(),
            records_read: 0,
            errors: 0,
            done: false,
        }
    }

    /// Replace the reader's configuration.
    ///
    /// ```
    /// use marc_codec::{MarcReader, ReaderConfig};
    ///
    /// let reader = MarcReader::from_bytes(b"")
    ///     .with_config(ReaderConfig { trim_line_breaks: false, ..ReaderConfig::default() });
    /// assert!(!reader.config().trim_line_breaks);
    /// ```
    #[must_use]
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read a single MARC record.
    ///
    /// Returns `Ok(Some(record))` for a decoded record, `Ok(None)` at the end
    /// of the stream, or `Err` if this record could not be decoded.
    ///
    /// # Errors
    ///
    /// Any error from [`decode_record`] for the current record, or
    /// [`MarcError::IoError`] if the underlying reader fails. Decode errors
    /// leave the reader usable; an I/O error ends the stream.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        while !self.done {
            let mut buffer = Vec::new();
            let piece = match self.read_piece(&mut buffer) {
                Ok(piece) => piece,
                Err(e) => {
                    self.done = true;
                    self.errors += 1;
                    return Err(MarcError::IoError(e));
                },
            };
            let result = match piece {
                Piece::End => {
                    self.done = true;
                    continue;
                },
                Piece::Oversized(actual) => Err(MarcError::InvalidRecordLength {
                    declared: String::from_utf8_lossy(&buffer[..5.min(buffer.len())])
                        .into_owned(),
                    actual,
                }),
                Piece::Complete => match decode_piece(&buffer, &self.config) {
                    Some(result) => result,
                    None => continue,
                },
            };
            return match result {
                Ok(record) => {
                    self.records_read += 1;
                    Ok(Some(record))
                },
                Err(e) => {
                    self.errors += 1;
                    tracing::warn!(
                        record = self.records_read + self.errors,
                        error = %e,
                        "skipping record that failed to decode"
                    );
                    Err(e)
                },
            };
        }
        Ok(None)
    }

    /// Read the next piece into `buffer`, never holding more than
    /// `max_record_length + 1` bytes of it.
    fn read_piece(&mut self, buffer: &mut Vec<u8>) -> io::Result<Piece> {
        if self.config.trim_line_breaks {
            self.skip_line_breaks()?;
        }
        let limit = u64::try_from(self.config.max_record_length)
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        let read = Read::take(&mut self.reader, limit).read_until(RECORD_TERMINATOR, buffer)?;
        if read == 0 {
            return Ok(Piece::End);
        }
        if buffer.len() > self.config.max_record_length && buffer.last() != Some(&RECORD_TERMINATOR)
        {
            let skipped = self.skip_past_terminator()?;
            return Ok(Piece::Oversized(buffer.len() + skipped));
        }
        Ok(Piece::Complete)
    }

    fn skip_line_breaks(&mut self) -> io::Result<()> {
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(());
            }
            let breaks = available
                .iter()
                .take_while(|&&b| b == b'\r' || b == b'\n')
                .count();
            let whole_buffer = breaks == available.len();
            self.reader.consume(breaks);
            if !whole_buffer {
                return Ok(());
            }
        }
    }

    /// Discard input through the next record terminator, returning how many
    /// bytes were dropped.
    fn skip_past_terminator(&mut self) -> io::Result<usize> {
        let mut skipped = 0;
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(skipped);
            }
            if let Some(i) = memchr::memchr(RECORD_TERMINATOR, available) {
                self.reader.consume(i + 1);
                return Ok(skipped + i + 1);
            }
            let n = available.len();
            self.reader.consume(n);
            skipped += n;
        }
    }

    /// Number of records decoded successfully so far.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Number of records (or reads) that failed so far.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl MarcReader<BufReader<File>> {
    /// Open a file of concatenated records.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::IoError`] if the file cannot be opened.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(MarcReader::new(BufReader::new(File::open(path)?)))
    }
}

impl<'a> MarcReader<&'a [u8]> {
    /// Read records from an in-memory buffer.
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        MarcReader::new(bytes)
    }
}

impl<R: BufRead> Iterator for MarcReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
