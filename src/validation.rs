//! Tag, indicator and subfield-code validation.
//!
//! Problems found here never abort processing. They are collected as
//! [`ValidationWarning`]s in arrival order on the field they concern, and the
//! offending value is corrected (indicators) or the field is marked as not
//! encodable (tags).

use std::fmt;

/// Category of a recoverable validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// Tag is not three ASCII letters or digits.
    InvalidTag,
    /// Indicator outside `[0-9A-Za-z ]`; it was forced to blank.
    InvalidIndicator,
    /// Decoded indicator chunk was not exactly two bytes; both were forced to blank.
    InvalidIndicatorLength,
    /// A zero-length subfield chunk was found and skipped.
    EmptySubfield,
    /// A data field was built without any subfield.
    NoSubfields,
    /// A control field was built with a data field tag, or the other way round.
    TagKindMismatch,
    /// A subfield code that cannot be written as a single byte.
    InvalidSubfieldCode,
}

/// A recoverable problem found while building or decoding a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// What went wrong.
    pub kind: WarningKind,
    /// Tag of the field the warning belongs to.
    pub tag: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Record a warning and emit it as a debug event.
pub(crate) fn push_warning(
    warnings: &mut Vec<ValidationWarning>,
    kind: WarningKind,
    tag: &str,
    message: String,
) {
    tracing::debug!(tag, ?kind, "{message}");
    warnings.push(ValidationWarning {
        kind,
        tag: tag.to_string(),
        message,
    });
}

/// Check that a tag is exactly three ASCII letters or digits.
///
/// ```
/// use marc_codec::validation::is_valid_tag;
///
/// assert!(is_valid_tag("245"));
/// assert!(is_valid_tag("CAT"));
/// assert!(!is_valid_tag("24"));
/// assert!(!is_valid_tag("24-"));
/// ```
#[must_use]
pub fn is_valid_tag(tag: &str) -> bool {
    is_valid_tag_bytes(tag.as_bytes())
}

/// Byte-level form of [`is_valid_tag`], used on directory entries.
#[must_use]
pub fn is_valid_tag_bytes(tag: &[u8]) -> bool {
    tag.len() == 3 && tag.iter().all(u8::is_ascii_alphanumeric)
}

/// Check whether a tag belongs to a control field: all digits with a
/// numeric value below 10 (`"001"` through `"009"`, and `"000"`).
///
/// The decision is always re-derived from the tag itself, never from where
/// the field sits in a record.
///
/// ```
/// use marc_codec::validation::is_control_tag;
///
/// assert!(is_control_tag("001"));
/// assert!(is_control_tag("009"));
/// assert!(!is_control_tag("010"));
/// assert!(!is_control_tag("00A"));
/// ```
#[must_use]
pub fn is_control_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag.bytes().all(|b| b.is_ascii_digit())
        && tag.trim_start_matches('0').len() <= 1
}

/// Check that an indicator is an ASCII letter, digit or blank.
#[must_use]
pub fn is_valid_indicator(indicator: char) -> bool {
    indicator == ' ' || indicator.is_ascii_alphanumeric()
}

/// The byte a subfield code or indicator is written as, if it fits in one.
///
/// Decoding maps every byte to the `char` with the same value, so this is
/// the exact inverse for decoded data.
#[must_use]
pub fn char_to_byte(c: char) -> Option<u8> {
    u8::try_from(u32::from(c)).ok()
}

/// Parse a fixed-width run of ASCII digits.
///
/// Returns `None` for an empty slice or any non-digit byte.
pub(crate) fn parse_ascii_digits(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() {
        return None;
    }
    let mut result = 0usize;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return None;
        }
        result = result * 10 + usize::from(byte - b'0');
    }
    Some(result)
}
