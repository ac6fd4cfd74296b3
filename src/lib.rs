#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! ## Modules
//!
//! - [`record`]: [`Record`], a leader and an ordered list of fields
//! - [`field`]: Control and data fields, subfields, and the field codec
//! - [`leader`]: MARC record leader (24-byte header)
//! - [`directory`]: Building and parsing the 12-byte-per-entry directory
//! - [`reader`]: Decoding single records and reading binary streams
//! - [`writer`]: Encoding records and writing binary streams
//! - [`boundary_scanner`]: Splitting multi-record buffers on 0x1D
//! - [`rayon_parser_pool`]: Batch decoding, sequential and parallel
//! - [`validation`]: Tag and indicator checks, recoverable warnings
//! - [`error`]: Error types
//! - [`constants`]: Delimiter bytes and fixed widths
//!
//! ## Errors and warnings
//!
//! Structural damage to a record (bad lengths, missing terminators, a broken
//! directory) is a [`MarcError`] and no record is produced. Problems confined
//! to a field's content (illegal indicators, empty subfields, bad tags) are
//! [`ValidationWarning`]s kept on that field, see [`Record::warnings`].

pub mod boundary_scanner;
pub mod constants;
pub mod directory;
pub mod error;
pub mod field;
pub mod leader;
pub mod rayon_parser_pool;
pub mod reader;
pub mod record;
pub mod validation;
pub mod writer;

pub use boundary_scanner::split_records;
pub use error::{MarcError, Result};
pub use field::{ControlField, DataField, Field, Subfield};
pub use leader::Leader;
pub use rayon_parser_pool::{decode_all, decode_batch_parallel};
pub use reader::{decode_record, MarcReader, ReaderConfig};
pub use record::{FieldGroup, Record};
pub use validation::{ValidationWarning, WarningKind};
pub use writer::{encode_record, encode_with_leader, MarcWriter};
