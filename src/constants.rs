//! Delimiters and fixed widths of the ISO 2709 exchange format.

/// Byte that introduces each subfield inside a data field.
pub const SUBFIELD_DELIMITER: u8 = 0x1F;

/// Byte that ends every field and the directory.
pub const FIELD_TERMINATOR: u8 = 0x1E;

/// Byte that ends every record.
pub const RECORD_TERMINATOR: u8 = 0x1D;

/// Length of the leader in bytes.
pub const LEADER_LEN: usize = 24;

/// Length of one directory entry: tag(3) + length(4) + offset(5).
pub const DIRECTORY_ENTRY_LEN: usize = 12;

/// Largest record length the 5-digit leader slot can express.
pub const MAX_RECORD_LEN: usize = 99_999;

/// Largest field length the 4-digit directory slot can express.
pub const MAX_FIELD_LEN: usize = 9_999;
