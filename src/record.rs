//! MARC bibliographic record structure and operations.
//!
//! A [`Record`] is a [`Leader`] plus one ordered list of [`Field`]s. Fields
//! keep their global insertion order, which is also the order they are
//! encoded in. Lookups by tag go through an index derived on demand.
//!
//! # Examples
//!
//! ```
//! use marc_codec::{Field, Record};
//!
//! let mut record = Record::new();
//! record.append(Field::control("001", "12345"));
//! record.append(Field::data("650", ' ', '0', [('a', "Cats")]));
//! record.append(Field::data("650", ' ', '0', [('a', "Dogs")]));
//!
//! let subjects = record.field("650").unwrap();
//! assert_eq!(subjects.len(), 2);
//! assert_eq!(record.subfield("650", 'a'), Some(&b"Cats"[..]));
//! ```

use crate::error::Result;
use crate::field::Field;
use crate::leader::Leader;
use crate::validation::ValidationWarning;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A MARC bibliographic record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record leader (24 bytes)
    pub leader: Leader,
    fields: Vec<Field>,
}

/// All occurrences of one tag in a record, in record order.
///
/// Never empty.
#[derive(Debug, Clone)]
pub struct FieldGroup<'a> {
    fields: Vec<&'a Field>,
}

impl<'a> FieldGroup<'a> {
    /// The first occurrence.
    #[must_use]
    pub fn first(&self) -> &'a Field {
        // Only built with at least one field.
        self.fields[0]
    }

    /// Occurrence `index`, if there is one.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a Field> {
        self.fields.get(index).copied()
    }

    /// Number of occurrences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the occurrences in record order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Field> + '_ {
        self.fields.iter().copied()
    }
}

impl<'a> IntoIterator for FieldGroup<'a> {
    type Item = &'a Field;
    type IntoIter = std::vec::IntoIter<&'a Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Record {
    /// Create an empty record with a blank leader.
    #[must_use]
    pub fn new() -> Self {
        Record::default()
    }

    /// Create an empty record with the given leader.
    #[must_use]
    pub fn with_leader(leader: Leader) -> Self {
        Record {
            leader,
            fields: Vec::new(),
        }
    }

    /// Append a field after every existing field.
    pub fn append(&mut self, field: impl Into<Field>) {
        self.fields.push(field.into());
    }

    /// Append several fields in order.
    pub fn append_fields<I>(&mut self, fields: I)
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
    }

    /// All fields, in record order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Mutable access to all fields, in record order.
    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.fields.iter_mut()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every occurrence of `tag`, or `None` if the tag is absent.
    #[must_use]
    pub fn field(&self, tag: &str) -> Option<FieldGroup<'_>> {
        let fields: Vec<&Field> = self.fields.iter().filter(|f| f.tag() == tag).collect();
        if fields.is_empty() {
            None
        } else {
            Some(FieldGroup { fields })
        }
    }

    /// First occurrence of `tag`.
    #[must_use]
    pub fn first_field(&self, tag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag() == tag)
    }

    /// First value of subfield `code` in the first field tagged `tag`.
    #[must_use]
    pub fn subfield(&self, tag: &str, code: char) -> Option<&[u8]> {
        self.first_field(tag)?.subfield(code)
    }

    /// Map from tag to the positions of its fields.
    ///
    /// Tags appear in order of first occurrence; positions are ascending.
    #[must_use]
    pub fn tag_index(&self) -> IndexMap<&str, Vec<usize>> {
        let mut index: IndexMap<&str, Vec<usize>> = IndexMap::new();
        for (position, field) in self.fields.iter().enumerate() {
            index.entry(field.tag()).or_default().push(position);
        }
        index
    }

    /// Remove every field tagged `tag`.
    ///
    /// Returns the removed fields in record order.
    pub fn delete_field(&mut self, tag: &str) -> Vec<Field> {
        let (removed, kept) = std::mem::take(&mut self.fields)
            .into_iter()
            .partition(|f| f.tag() == tag);
        self.fields = kept;
        removed
    }

    /// Warnings of every field, in record order.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationWarning> {
        self.fields.iter().flat_map(Field::warnings)
    }

    /// Fill a printf-like template from the first field tagged `tag`.
    ///
    /// `%c` is replaced by the first value of subfield `c` (nothing if the
    /// subfield is absent), `%%` by a single `%`. Everything else is copied.
    ///
    /// ```
    /// use marc_codec::{Field, Record};
    ///
    /// let mut record = Record::new();
    /// record.append(Field::data("245", '1', '0', [('a', "Title"), ('c', "Author")]));
    /// assert_eq!(
    ///     record.format_field("245", "%a / %c (100%%)").as_deref(),
    ///     Some("Title / Author (100%)")
    /// );
    /// assert_eq!(record.format_field("100", "%a"), None);
    /// ```
    #[must_use]
    pub fn format_field(&self, tag: &str, template: &str) -> Option<String> {
        let field = self.first_field(tag)?;
        let mut result = String::with_capacity(template.len());
        let mut chars = template.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                result.push(c);
                continue;
            }
            match chars.next() {
                Some('%') => result.push('%'),
                Some(code) => {
                    if let Some(value) = field.subfield_str(code) {
                        result.push_str(&value);
                    }
                },
                None => result.push('%'),
            }
        }
        Some(result)
    }

    /// Encode the record and store the updated leader on `self`.
    ///
    /// This is [`encode_with_leader`](crate::writer::encode_with_leader)
    /// followed by a leader update; encoding again without other changes
    /// yields the same bytes and leader.
    ///
    /// # Errors
    ///
    /// See [`encode_record`](crate::writer::encode_record). On error the
    /// record is left unchanged.
    pub fn to_marc(&mut self) -> Result<Vec<u8>> {
        let (bytes, leader) = crate::writer::encode_with_leader(self)?;
        self.leader = leader;
        Ok(bytes)
    }
}

impl FromIterator<Field> for Record {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Record {
            leader: Leader::default(),
            fields: iter.into_iter().collect(),
        }
    }
}

/// Human-readable rendering: every field's rendering followed by a newline.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            writeln!(f, "{field}")?;
        }
        Ok(())
    }
}
