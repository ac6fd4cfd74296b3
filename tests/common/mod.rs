//! Common test helpers and utilities shared across test suite.

#![allow(dead_code)]

use marc_codec::{encode_record, Field, Leader, Record};

/// A typical book leader; lengths are filled in by the encoder.
pub fn create_test_leader() -> Leader {
    Leader::from_bytes(b"00000nam a2200000 i 4500").unwrap()
}

/// Creates a simple test record with a basic leader and no fields.
pub fn create_test_record() -> Record {
    Record::with_leader(create_test_leader())
}

/// Creates a realistic book record.
///
/// Includes control fields, repeated 650s and a multi-subfield title.
pub fn create_realistic_record() -> Record {
    let mut record = create_test_record();
    record.append(Field::control("001", "ocm00012345"));
    record.append(Field::control("008", "250101s1925    nyu           000 1 eng d"));
    record.append(Field::data(
        "100",
        '1',
        ' ',
        [('a', "Fitzgerald, F. Scott,"), ('d', "1896-1940.")],
    ));
    record.append(Field::data(
        "245",
        '1',
        '4',
        [('a', "The Great Gatsby /"), ('c', "F. Scott Fitzgerald.")],
    ));
    record.append(Field::data(
        "650",
        ' ',
        '0',
        [('a', "Rich people"), ('z', "New York (State)"), ('v', "Fiction.")],
    ));
    record.append(Field::data(
        "650",
        ' ',
        '0',
        [('a', "Long Island (N.Y.)"), ('v', "Fiction.")],
    ));
    record
}

/// Encoded bytes of [`create_realistic_record`].
pub fn realistic_bytes() -> Vec<u8> {
    encode_record(&create_realistic_record()).unwrap()
}

/// Assemble raw record bytes from a directory (without terminator) and a
/// data area, computing both leader lengths.
pub fn assemble_raw(directory: &[u8], data: &[u8]) -> Vec<u8> {
    let base_address = 24 + directory.len() + 1;
    let record_length = base_address + data.len() + 1;
    let mut bytes = format!("{record_length:05}cam a22{base_address:05} a 4500").into_bytes();
    bytes.extend_from_slice(directory);
    bytes.push(0x1E);
    bytes.extend_from_slice(data);
    bytes.push(0x1D);
    bytes
}
