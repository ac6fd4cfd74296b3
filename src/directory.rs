//! The record directory.
//!
//! The directory maps every field occurrence to its place in the data area
//! with one 12-byte entry: `tag(3) + length(4) + offset(5)`, lengths and
//! offsets as zero-padded ASCII digits. Offsets are relative to the base
//! address, the first byte after the directory's own terminator.

use crate::constants::{DIRECTORY_ENTRY_LEN, MAX_FIELD_LEN, MAX_RECORD_LEN};
use crate::error::{MarcError, Result};
use crate::field::Field;
use crate::validation::{is_valid_tag_bytes, parse_ascii_digits};

/// One parsed directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Field tag
    pub tag: String,
    /// Field length in bytes, terminator included
    pub length: usize,
    /// Offset of the field from the base address
    pub offset: usize,
}

/// Output of [`build`]: the directory (without its terminator) and the data
/// area it describes.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Concatenated 12-byte entries
    pub directory: Vec<u8>,
    /// Concatenated encoded fields
    pub data: Vec<u8>,
}

impl Layout {
    /// Number of directory entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.directory.len() / DIRECTORY_ENTRY_LEN
    }

    /// Total length of the data area.
    #[must_use]
    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}

/// Encode `fields` in the given order and build the matching directory.
///
/// # Errors
///
/// Returns [`MarcError::UnencodableField`] for a field that fails
/// [`Field::check_encodable`], [`MarcError::FieldTooLong`] for a field over
/// 9999 bytes, and [`MarcError::RecordTooLong`] once the data area outgrows
/// the 5-digit offset slot.
pub fn build<'a, I>(fields: I) -> Result<Layout>
where
    I: IntoIterator<Item = &'a Field>,
{
    let mut layout = Layout::default();
    let mut data_end = 0usize;

    for field in fields {
        field.check_encodable()?;
        let encoded = field.encode();
        let length = encoded.len();
        if length > MAX_FIELD_LEN {
            return Err(MarcError::FieldTooLong {
                tag: field.tag().to_string(),
                length,
            });
        }
        if data_end > MAX_RECORD_LEN {
            return Err(MarcError::RecordTooLong(data_end));
        }

        layout.directory.extend_from_slice(field.tag().as_bytes());
        layout
            .directory
            .extend_from_slice(format!("{length:04}{data_end:05}").as_bytes());
        layout.data.extend_from_slice(&encoded);
        data_end += length;
    }

    Ok(layout)
}

/// Parse a directory (without its terminator) into entries, in order.
///
/// `record_length` is the record's declared total length; no entry may
/// reach past it.
///
/// # Errors
///
/// - [`MarcError::InvalidDirectoryLength`] if the length is not a multiple of 12
/// - [`MarcError::InvalidTag`] for a tag that is not three letters or digits
/// - [`MarcError::InvalidDirectoryEntry`] for non-digit length or offset bytes
/// - [`MarcError::EntryOutOfBounds`] if `offset + length > record_length`
pub fn parse(directory: &[u8], record_length: usize) -> Result<Vec<DirectoryEntry>> {
    if directory.len() % DIRECTORY_ENTRY_LEN != 0 {
        return Err(MarcError::InvalidDirectoryLength(directory.len()));
    }

    directory
        .chunks_exact(DIRECTORY_ENTRY_LEN)
        .map(|chunk| parse_entry(chunk, record_length))
        .collect()
}

fn parse_entry(chunk: &[u8], record_length: usize) -> Result<DirectoryEntry> {
    let (tag, rest) = chunk.split_at(3);
    let (length, offset) = rest.split_at(4);

    if !is_valid_tag_bytes(tag) {
        return Err(MarcError::InvalidTag(
            String::from_utf8_lossy(tag).into_owned(),
        ));
    }
    // Alphanumeric ASCII, so this is lossless.
    let tag = String::from_utf8_lossy(tag).into_owned();

    let length = parse_slot(length, &tag, "length")?;
    let offset = parse_slot(offset, &tag, "offset")?;

    if offset + length > record_length {
        return Err(MarcError::EntryOutOfBounds {
            tag,
            offset,
            length,
            limit: record_length,
        });
    }

    Ok(DirectoryEntry {
        tag,
        length,
        offset,
    })
}

fn parse_slot(bytes: &[u8], tag: &str, part: &'static str) -> Result<usize> {
    parse_ascii_digits(bytes).ok_or_else(|| MarcError::InvalidDirectoryEntry {
        tag: tag.to_string(),
        part,
        value: String::from_utf8_lossy(bytes).into_owned(),
    })
}
