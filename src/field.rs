//! MARC fields and the field codec.
//!
//! A [`Field`] is either a [`ControlField`] (tags `000`-`009`: raw data, no
//! indicators or subfields) or a [`DataField`] (two indicators and an ordered
//! list of [`Subfield`]s). Which one a tag gets is always decided from the tag.
//!
//! Values are kept as raw bytes: the codec does no character conversion.
//!
//! # Examples
//!
//! ```
//! use marc_codec::Field;
//!
//! let title = Field::data("245", '1', '0', [('a', "Title"), ('b', "Subtitle")]);
//! assert_eq!(title.subfield('a'), Some(&b"Title"[..]));
//! assert_eq!(title.encode(), b"10\x1faTitle\x1fbSubtitle\x1e");
//!
//! let id = Field::control("001", "abc123");
//! assert_eq!(id.encode(), b"abc123\x1e");
//! ```

use crate::constants::{FIELD_TERMINATOR, RECORD_TERMINATOR, SUBFIELD_DELIMITER};
use crate::error::{MarcError, Result};
use crate::validation::{
    char_to_byte, is_control_tag, is_valid_indicator, is_valid_tag, push_warning,
    ValidationWarning, WarningKind,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// A subfield within a data field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character)
    pub code: char,
    /// Subfield value, as raw bytes
    pub value: Vec<u8>,
}

impl Subfield {
    /// Create a subfield.
    pub fn new(code: char, value: impl Into<Vec<u8>>) -> Self {
        Subfield {
            code,
            value: value.into(),
        }
    }

    /// The value as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn value_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }
}

impl<V: Into<Vec<u8>>> From<(char, V)> for Subfield {
    fn from((code, value): (char, V)) -> Self {
        Subfield::new(code, value)
    }
}

/// A control field (tags `000`-`009`).
///
/// Warnings are diagnostics and do not take part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlField {
    tag: String,
    data: Vec<u8>,
    #[serde(skip)]
    warnings: Vec<ValidationWarning>,
}

impl PartialEq for ControlField {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.data == other.data
    }
}

impl Eq for ControlField {}

impl ControlField {
    /// Create a control field.
    ///
    /// A tag that is not three letters or digits, or that is not a control
    /// tag, records a warning and leaves the field unencodable.
    pub fn new(tag: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let tag = tag.into();
        let mut warnings = Vec::new();
        if let Some((kind, message)) = tag_problem(&tag, true) {
            push_warning(&mut warnings, kind, &tag, message);
        }
        ControlField {
            tag,
            data: data.into(),
            warnings,
        }
    }

    /// Field tag
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Field data, as raw bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Field data as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn data_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Replace the field data.
    pub fn set_data(&mut self, data: impl Into<Vec<u8>>) {
        self.data = data.into();
    }

    /// Warnings recorded for this field, in arrival order.
    #[must_use]
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Encode as `data ++ 0x1E`.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() + 1);
        out.extend_from_slice(&self.data);
        out.push(FIELD_TERMINATOR);
        out
    }

    fn check_encodable(&self) -> Result<()> {
        if let Some((_, reason)) = tag_problem(&self.tag, true) {
            return Err(unencodable(&self.tag, reason));
        }
        // 0x1F is plain data inside a control field.
        if self
            .data
            .iter()
            .any(|&b| b == FIELD_TERMINATOR || b == RECORD_TERMINATOR)
        {
            return Err(unencodable(
                &self.tag,
                "data contains a terminator byte".to_string(),
            ));
        }
        Ok(())
    }
}

/// A data field (tags `010` and up, or any alphabetic tag).
///
/// Warnings are diagnostics and do not take part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataField {
    tag: String,
    ind1: char,
    ind2: char,
    subfields: SmallVec<[Subfield; 4]>,
    #[serde(skip)]
    warnings: Vec<ValidationWarning>,
}

impl PartialEq for DataField {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.ind1 == other.ind1
            && self.ind2 == other.ind2
            && self.subfields == other.subfields
    }
}

impl Eq for DataField {}

impl DataField {
    /// Create a data field.
    ///
    /// Indicators outside `[0-9A-Za-z ]` are forced to blank with a warning;
    /// `None` is the empty indicator and becomes blank silently. A field
    /// without subfields, or with an unusable tag, also records a warning.
    ///
    /// ```
    /// use marc_codec::DataField;
    ///
    /// let field = DataField::new("650", '!', None, [('a', "Cats")]);
    /// assert_eq!(field.indicator1(), ' ');
    /// assert_eq!(field.indicator2(), ' ');
    /// assert_eq!(field.warnings().len(), 1);
    /// ```
    pub fn new<I, S>(
        tag: impl Into<String>,
        ind1: impl Into<Option<char>>,
        ind2: impl Into<Option<char>>,
        subfields: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Subfield>,
    {
        Self::build(
            tag.into(),
            ind1.into(),
            ind2.into(),
            subfields.into_iter().map(Into::into).collect(),
            Vec::new(),
        )
    }

    fn build(
        tag: String,
        ind1: Option<char>,
        ind2: Option<char>,
        subfields: SmallVec<[Subfield; 4]>,
        mut warnings: Vec<ValidationWarning>,
    ) -> Self {
        if let Some((kind, message)) = tag_problem(&tag, false) {
            push_warning(&mut warnings, kind, &tag, message);
        }
        let ind1 = checked_indicator(&mut warnings, &tag, ind1);
        let ind2 = checked_indicator(&mut warnings, &tag, ind2);
        if subfields.is_empty() {
            push_warning(
                &mut warnings,
                WarningKind::NoSubfields,
                &tag,
                format!("Field {tag} must have at least one subfield"),
            );
        }
        for subfield in &subfields {
            check_code(&mut warnings, &tag, subfield.code);
        }
        DataField {
            tag,
            ind1,
            ind2,
            subfields,
            warnings,
        }
    }

    /// Field tag
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// First indicator
    #[must_use]
    pub fn indicator1(&self) -> char {
        self.ind1
    }

    /// Second indicator
    #[must_use]
    pub fn indicator2(&self) -> char {
        self.ind2
    }

    /// Set the first indicator, validated as at construction.
    pub fn set_indicator1(&mut self, indicator: impl Into<Option<char>>) {
        self.ind1 = checked_indicator(&mut self.warnings, &self.tag, indicator.into());
    }

    /// Set the second indicator, validated as at construction.
    pub fn set_indicator2(&mut self, indicator: impl Into<Option<char>>) {
        self.ind2 = checked_indicator(&mut self.warnings, &self.tag, indicator.into());
    }

    /// Set indicator 1 or 2; any other position is ignored.
    pub fn set_indicator(&mut self, position: u8, indicator: impl Into<Option<char>>) {
        match position {
            1 => self.set_indicator1(indicator),
            2 => self.set_indicator2(indicator),
            _ => {},
        }
    }

    /// All subfields in order.
    #[must_use]
    pub fn subfields(&self) -> &[Subfield] {
        &self.subfields
    }

    /// Append a subfield after the existing ones.
    pub fn add_subfield(&mut self, code: char, value: impl Into<Vec<u8>>) {
        check_code(&mut self.warnings, &self.tag, code);
        self.subfields.push(Subfield::new(code, value));
    }

    /// Replace the value of the first subfield with `code`, or append a new
    /// subfield if there is none.
    pub fn set_subfield(&mut self, code: char, value: impl Into<Vec<u8>>) {
        match self.subfields.iter_mut().find(|sf| sf.code == code) {
            Some(subfield) => subfield.value = value.into(),
            None => self.add_subfield(code, value),
        }
    }

    /// Remove all subfields with a given code
    ///
    /// Returns the removed subfields.
    pub fn remove_subfields(&mut self, code: char) -> Vec<Subfield> {
        let mut removed = Vec::new();
        self.subfields.retain(|sf| {
            if sf.code == code {
                removed.push(sf.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Get first value for a subfield code
    #[must_use]
    pub fn subfield(&self, code: char) -> Option<&[u8]> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_slice())
    }

    /// Iterate over the values of every subfield with a specific code
    pub fn subfield_values(&self, code: char) -> impl Iterator<Item = &[u8]> {
        self.subfields
            .iter()
            .filter(move |sf| sf.code == code)
            .map(|sf| sf.value.as_slice())
    }

    /// Join subfield values with single spaces.
    ///
    /// Values are taken code by code in the order `codes` lists them, each
    /// code's values in field order. An empty `codes` selects every subfield
    /// in field order.
    ///
    /// ```
    /// use marc_codec::DataField;
    ///
    /// let field = DataField::new("245", '1', '0', [('a', "Title"), ('b', "sub"), ('c', "Author")]);
    /// assert_eq!(field.joined(&[]), "Title sub Author");
    /// assert_eq!(field.joined(&['c', 'a']), "Author Title");
    /// ```
    #[must_use]
    pub fn joined(&self, codes: &[char]) -> String {
        let values: Vec<Cow<'_, str>> = if codes.is_empty() {
            self.subfields.iter().map(Subfield::value_str).collect()
        } else {
            codes
                .iter()
                .flat_map(|&code| self.subfields.iter().filter(move |sf| sf.code == code))
                .map(Subfield::value_str)
                .collect()
        };
        values.join(" ")
    }

    /// Warnings recorded for this field, in arrival order.
    #[must_use]
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Encode as `ind1 ++ ind2 ++ (0x1F ++ code ++ value)* ++ 0x1E`.
    ///
    /// Characters that do not fit in a byte cannot occur in a field that
    /// passes [`Field::check_encodable`]; they are written as `?`.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let body: usize = self.subfields.iter().map(|sf| sf.value.len() + 2).sum();
        let mut out = Vec::with_capacity(body + 3);
        out.push(byte_of(self.ind1));
        out.push(byte_of(self.ind2));
        for subfield in &self.subfields {
            out.push(SUBFIELD_DELIMITER);
            out.push(byte_of(subfield.code));
            out.extend_from_slice(&subfield.value);
        }
        out.push(FIELD_TERMINATOR);
        out
    }

    fn check_encodable(&self) -> Result<()> {
        if let Some((_, reason)) = tag_problem(&self.tag, false) {
            return Err(unencodable(&self.tag, reason));
        }
        for indicator in [self.ind1, self.ind2] {
            if !is_valid_indicator(indicator) {
                return Err(unencodable(
                    &self.tag,
                    format!("illegal indicator '{indicator}'"),
                ));
            }
        }
        if let Some(sf) = self.subfields.iter().find(|sf| char_to_byte(sf.code).is_none()) {
            return Err(unencodable(
                &self.tag,
                format!("subfield code '{}' does not fit in a byte", sf.code),
            ));
        }
        if let Some(sf) = self.subfields.iter().find(|sf| {
            is_delimiter(byte_of(sf.code)) || sf.value.iter().any(|&b| is_delimiter(b))
        }) {
            return Err(unencodable(
                &self.tag,
                format!("subfield '{}' contains a delimiter byte", sf.code),
            ));
        }
        Ok(())
    }
}

/// A field of a MARC record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    /// Control field, tags `000`-`009`
    Control(ControlField),
    /// Data field with indicators and subfields
    Data(DataField),
}

impl Field {
    /// Create a control field. See [`ControlField::new`].
    pub fn control(tag: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Field::Control(ControlField::new(tag, data))
    }

    /// Create a data field. See [`DataField::new`].
    pub fn data<I, S>(
        tag: impl Into<String>,
        ind1: impl Into<Option<char>>,
        ind2: impl Into<Option<char>>,
        subfields: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Subfield>,
    {
        Field::Data(DataField::new(tag, ind1, ind2, subfields))
    }

    /// Decode one field from its directory tag and raw bytes.
    ///
    /// The bytes must end with the field terminator. Control tags keep the
    /// remaining bytes verbatim. For data fields the bytes are split on the
    /// subfield delimiter: the first chunk is the indicator pair (forced to
    /// blanks with a warning unless exactly two bytes), each later chunk is a
    /// code byte followed by the value, and empty chunks are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::MissingFieldTerminator`] if the last byte is not
    /// `0x1E` (or `raw` is empty).
    pub fn decode(tag: &str, raw: &[u8]) -> Result<Self> {
        let body = match raw.split_last() {
            Some((&FIELD_TERMINATOR, body)) => body,
            _ => return Err(MarcError::MissingFieldTerminator(tag.to_string())),
        };

        if is_control_tag(tag) {
            return Ok(Field::control(tag, body));
        }

        let mut warnings = Vec::new();
        let mut chunks = body.split(|&b| b == SUBFIELD_DELIMITER);

        let (ind1, ind2) = match chunks.next().unwrap_or_default() {
            &[ind1, ind2] => (char::from(ind1), char::from(ind2)),
            other => {
                push_warning(
                    &mut warnings,
                    WarningKind::InvalidIndicatorLength,
                    tag,
                    format!(
                        "Invalid indicators \"{}\" forced to blanks for tag {tag}",
                        String::from_utf8_lossy(other)
                    ),
                );
                (' ', ' ')
            },
        };

        let mut subfields = SmallVec::new();
        for chunk in chunks {
            match chunk.split_first() {
                Some((&code, value)) => subfields.push(Subfield::new(char::from(code), value)),
                None => push_warning(
                    &mut warnings,
                    WarningKind::EmptySubfield,
                    tag,
                    format!("Entirely empty subfield found in tag {tag}"),
                ),
            }
        }

        Ok(Field::Data(DataField::build(
            tag.to_string(),
            Some(ind1),
            Some(ind2),
            subfields,
            warnings,
        )))
    }

    /// Field tag
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Field::Control(field) => field.tag(),
            Field::Data(field) => field.tag(),
        }
    }

    /// Whether this is a control field.
    #[must_use]
    pub fn is_control(&self) -> bool {
        matches!(self, Field::Control(_))
    }

    /// The control field, if this is one.
    #[must_use]
    pub fn as_control(&self) -> Option<&ControlField> {
        match self {
            Field::Control(field) => Some(field),
            Field::Data(_) => None,
        }
    }

    /// The data field, if this is one.
    #[must_use]
    pub fn as_data(&self) -> Option<&DataField> {
        match self {
            Field::Data(field) => Some(field),
            Field::Control(_) => None,
        }
    }

    /// Mutable access to the data field, if this is one.
    pub fn as_data_mut(&mut self) -> Option<&mut DataField> {
        match self {
            Field::Data(field) => Some(field),
            Field::Control(_) => None,
        }
    }

    /// Indicator 1 or 2 of a data field.
    #[must_use]
    pub fn indicator(&self, position: u8) -> Option<char> {
        let field = self.as_data()?;
        match position {
            1 => Some(field.indicator1()),
            2 => Some(field.indicator2()),
            _ => None,
        }
    }

    /// First value of subfield `code`; always `None` for control fields.
    #[must_use]
    pub fn subfield(&self, code: char) -> Option<&[u8]> {
        self.as_data()?.subfield(code)
    }

    /// First value of subfield `code` as text, replacing invalid UTF-8.
    #[must_use]
    pub fn subfield_str(&self, code: char) -> Option<Cow<'_, str>> {
        self.subfield(code).map(String::from_utf8_lossy)
    }

    /// Warnings recorded for this field, in arrival order.
    #[must_use]
    pub fn warnings(&self) -> &[ValidationWarning] {
        match self {
            Field::Control(field) => field.warnings(),
            Field::Data(field) => field.warnings(),
        }
    }

    /// Encode the field, terminator included.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Field::Control(field) => field.encode(),
            Field::Data(field) => field.encode(),
        }
    }

    /// Check that the field can be serialized.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::UnencodableField`] for an invalid tag, a tag of
    /// the wrong kind, an illegal indicator, or a subfield code that does not
    /// fit in one byte.
    pub fn check_encodable(&self) -> Result<()> {
        match self {
            Field::Control(field) => field.check_encodable(),
            Field::Data(field) => field.check_encodable(),
        }
    }

    /// Whether [`Field::check_encodable`] passes.
    #[must_use]
    pub fn is_encodable(&self) -> bool {
        self.check_encodable().is_ok()
    }
}

impl From<ControlField> for Field {
    fn from(field: ControlField) -> Self {
        Field::Control(field)
    }
}

impl From<DataField> for Field {
    fn from(field: DataField) -> Self {
        Field::Data(field)
    }
}

/// Human-readable rendering, one line per subfield:
///
/// ```text
/// 001     abc123
/// 245 10 _aTitle
///        _bSubtitle
/// ```
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Control(field) => write!(f, "{:>3}     {}", field.tag, field.data_str()),
            Field::Data(field) => {
                let mut prefix = format!("{:>3} {}{}", field.tag, field.ind1, field.ind2);
                for (i, subfield) in field.subfields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{prefix:>6} _{}{}", subfield.code, subfield.value_str())?;
                    prefix.clear();
                }
                Ok(())
            },
        }
    }
}

fn tag_problem(tag: &str, control: bool) -> Option<(WarningKind, String)> {
    if !is_valid_tag(tag) {
        return Some((
            WarningKind::InvalidTag,
            format!("Tag \"{tag}\" is not a valid tag."),
        ));
    }
    match (control, is_control_tag(tag)) {
        (true, false) => Some((
            WarningKind::TagKindMismatch,
            format!("Tag \"{tag}\" is not a control field tag"),
        )),
        (false, true) => Some((
            WarningKind::TagKindMismatch,
            format!("Subfields allowed only for tags bigger or equal to 10, got \"{tag}\""),
        )),
        _ => None,
    }
}

fn checked_indicator(
    warnings: &mut Vec<ValidationWarning>,
    tag: &str,
    indicator: Option<char>,
) -> char {
    match indicator {
        Some(c) if is_valid_indicator(c) => c,
        Some(c) => {
            push_warning(
                warnings,
                WarningKind::InvalidIndicator,
                tag,
                format!("Illegal indicator '{c}' in field '{tag}' forced to blank"),
            );
            ' '
        },
        None => ' ',
    }
}

fn check_code(warnings: &mut Vec<ValidationWarning>, tag: &str, code: char) {
    if char_to_byte(code).is_none() {
        push_warning(
            warnings,
            WarningKind::InvalidSubfieldCode,
            tag,
            format!("Subfield code '{code}' in field '{tag}' does not fit in a byte"),
        );
    }
}

fn is_delimiter(b: u8) -> bool {
    matches!(b, SUBFIELD_DELIMITER | FIELD_TERMINATOR | RECORD_TERMINATOR)
}

fn byte_of(c: char) -> u8 {
    char_to_byte(c).unwrap_or(b'?')
}

fn unencodable(tag: &str, reason: String) -> MarcError {
    MarcError::UnencodableField {
        tag: tag.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_control_field() {
        let field = Field::control("001", "abc123");
        assert_eq!(field.encode(), b"abc123\x1e");
        assert!(field.warnings().is_empty());
    }

    #[test]
    fn test_encode_data_field() {
        let field = Field::data("245", ' ', ' ', [('a', "Title"), ('b', "Sub")]);
        assert_eq!(field.encode(), b"  \x1faTitle\x1fbSub\x1e");
    }

    #[test]
    fn test_decode_control_field_keeps_bytes() {
        let field = Field::decode("008", b"850101s1985    \x1f \x1e").unwrap();
        let control = field.as_control().unwrap();
        assert_eq!(control.data(), b"850101s1985    \x1f ");
        assert!(field.warnings().is_empty());
    }

    #[test]
    fn test_decode_data_field() {
        let field = Field::decode("650", b" 0\x1faCats\x1fxHistory\x1faDogs\x1e").unwrap();
        assert_eq!(field.indicator(1), Some(' '));
        assert_eq!(field.indicator(2), Some('0'));
        assert_eq!(field.indicator(3), None);
        assert_eq!(field.subfield('a'), Some(&b"Cats"[..]));
        let data = field.as_data().unwrap();
        let codes: Vec<char> = data.subfields().iter().map(|sf| sf.code).collect();
        assert_eq!(codes, ['a', 'x', 'a']);
        assert!(field.warnings().is_empty());
    }

    #[test]
    fn test_decode_requires_terminator() {
        assert!(matches!(
            Field::decode("245", b"10\x1faTitle"),
            Err(MarcError::MissingFieldTerminator(tag)) if tag == "245"
        ));
        assert!(matches!(
            Field::decode("001", b""),
            Err(MarcError::MissingFieldTerminator(_))
        ));
    }

    #[test]
    fn test_decode_illegal_indicator() {
        let field = Field::decode("245", b"!0\x1faTitle\x1e").unwrap();
        assert_eq!(field.indicator(1), Some(' '));
        assert_eq!(field.indicator(2), Some('0'));
        assert_eq!(field.warnings().len(), 1);
        assert_eq!(field.warnings()[0].kind, WarningKind::InvalidIndicator);
    }

    #[test]
    fn test_decode_wrong_indicator_length() {
        let field = Field::decode("245", b"1\x1faTitle\x1e").unwrap();
        assert_eq!(field.indicator(1), Some(' '));
        assert_eq!(field.indicator(2), Some(' '));
        assert_eq!(field.warnings().len(), 1);
        assert_eq!(field.warnings()[0].kind, WarningKind::InvalidIndicatorLength);

        let field = Field::decode("245", b"123\x1faTitle\x1e").unwrap();
        assert_eq!(field.indicator(1), Some(' '));
        assert_eq!(field.warnings()[0].kind, WarningKind::InvalidIndicatorLength);
    }

    #[test]
    fn test_decode_empty_subfield_is_skipped() {
        let field = Field::decode("245", b"10\x1faTitle\x1f\x1fbSub\x1e").unwrap();
        let data = field.as_data().unwrap();
        assert_eq!(data.subfields().len(), 2);
        assert_eq!(field.warnings().len(), 1);
        assert_eq!(field.warnings()[0].kind, WarningKind::EmptySubfield);
    }

    #[test]
    fn test_decode_code_without_value() {
        let field = Field::decode("500", b"  \x1fa\x1e").unwrap();
        assert_eq!(field.subfield('a'), Some(&b""[..]));
        assert_eq!(field.encode(), b"  \x1fa\x1e");
    }

    #[test]
    fn test_non_ascii_code_round_trips() {
        let field = Field::decode("500", b"  \x1f\xe9value\x1e").unwrap();
        assert_eq!(field.subfield('\u{e9}'), Some(&b"value"[..]));
        assert!(field.is_encodable());
        assert_eq!(field.encode(), b"  \x1f\xe9value\x1e");
    }

    #[test]
    fn test_invalid_tag_is_unencodable() {
        let field = Field::data("24", '1', '0', [('a', "x")]);
        assert_eq!(field.warnings()[0].kind, WarningKind::InvalidTag);
        assert!(matches!(
            field.check_encodable(),
            Err(MarcError::UnencodableField { .. })
        ));
    }

    #[test]
    fn test_tag_kind_mismatch() {
        let field = Field::data("001", ' ', ' ', [('a', "x")]);
        assert_eq!(field.warnings()[0].kind, WarningKind::TagKindMismatch);
        assert!(!field.is_encodable());

        let field = Field::control("245", "x");
        assert_eq!(field.warnings()[0].kind, WarningKind::TagKindMismatch);
        assert!(!field.is_encodable());
    }

    #[test]
    fn test_empty_indicator_is_silent() {
        let field = DataField::new("245", None, None, [('a', "x")]);
        assert_eq!(field.indicator1(), ' ');
        assert_eq!(field.indicator2(), ' ');
        assert!(field.warnings().is_empty());
    }

    #[test]
    fn test_no_subfields_warns_but_encodes() {
        let field = Field::data("245", '1', '0', Vec::<Subfield>::new());
        assert_eq!(field.warnings()[0].kind, WarningKind::NoSubfields);
        assert!(field.is_encodable());
        assert_eq!(field.encode(), b"10\x1e");
    }

    #[test]
    fn test_wide_subfield_code() {
        let mut field = DataField::new("245", '1', '0', [('a', "x")]);
        field.add_subfield('\u{20ac}', "euro");
        assert_eq!(field.warnings()[0].kind, WarningKind::InvalidSubfieldCode);
        assert!(!Field::from(field).is_encodable());
    }

    #[test]
    fn test_delimiter_in_value_is_unencodable() {
        for byte in [0x1F, 0x1E, 0x1D] {
            let field = Field::data("245", '1', '0', [('a', vec![b'x', byte, b'y'])]);
            assert!(matches!(
                field.check_encodable(),
                Err(MarcError::UnencodableField { tag, .. }) if tag == "245"
            ));
        }

        let field = Field::data("245", '1', '0', [('\u{1f}', "x")]);
        assert!(!field.is_encodable());
    }

    #[test]
    fn test_terminator_in_control_data_is_unencodable() {
        assert!(!Field::control("001", b"ab\x1ecd".to_vec()).is_encodable());
        assert!(!Field::control("001", b"ab\x1dcd".to_vec()).is_encodable());
        assert!(Field::control("001", b"ab\x1fcd".to_vec()).is_encodable());
    }

    #[test]
    fn test_joined_follows_code_order() {
        let field = DataField::new(
            "650",
            ' ',
            '0',
            [('a', "Cats"), ('x', "Behavior"), ('v', "Juvenile"), ('x', "Care")],
        );
        assert_eq!(field.joined(&['v', 'a']), "Juvenile Cats");
        assert_eq!(field.joined(&['x', 'a']), "Behavior Care Cats");
        assert_eq!(field.joined(&['z']), "");
        assert_eq!(field.joined(&[]), "Cats Behavior Juvenile Care");
    }

    #[test]
    fn test_set_subfield_and_indicators() {
        let mut field = DataField::new("245", '1', '0', [('a', "Old")]);
        field.set_subfield('a', "New");
        field.set_subfield('c', "Author");
        assert_eq!(field.subfield('a'), Some(&b"New"[..]));
        assert_eq!(field.subfield('c'), Some(&b"Author"[..]));

        field.set_indicator2('4');
        assert_eq!(field.indicator2(), '4');
        field.set_indicator1('%');
        assert_eq!(field.indicator1(), ' ');
        assert_eq!(field.warnings().len(), 1);
    }

    #[test]
    fn test_remove_subfields() {
        let mut field = DataField::new("650", ' ', '0', [('a', "A"), ('x', "X"), ('a', "B")]);
        let removed = field.remove_subfields('a');
        assert_eq!(removed.len(), 2);
        assert_eq!(field.subfields().len(), 1);
        assert_eq!(field.subfield_values('a').count(), 0);
    }

    #[test]
    fn test_equality_ignores_warnings() {
        let decoded = Field::decode("245", b"!0\x1faTitle\x1e").unwrap();
        let built = Field::data("245", ' ', '0', [('a', "Title")]);
        assert_eq!(decoded, built);
    }

    #[test]
    fn test_display() {
        let field = Field::data("245", '1', '0', [('a', "Title"), ('b', "Sub")]);
        assert_eq!(field.to_string(), "245 10 _aTitle\n       _bSub");

        let field = Field::control("001", "abc123");
        assert_eq!(field.to_string(), "001     abc123");
    }
}
