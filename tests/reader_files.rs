//! Reading and writing record files.

mod common;

use common::{create_realistic_record, create_test_record};
use marc_codec::{Field, MarcError, MarcReader, MarcWriter, ReaderConfig, Record};
use std::fs::File;
use std::io::Write;

fn titled(title: &str) -> Record {
    let mut record = create_test_record();
    record.append(Field::control("001", title));
    record.append(Field::data("245", '0', '0', [('a', title)]));
    record
}

fn title_of(record: &Record) -> String {
    record
        .subfield("245", 'a')
        .map(|t| String::from_utf8_lossy(t).into_owned())
        .unwrap_or_default()
}

#[test]
fn test_write_then_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.mrc");

    let mut writer = MarcWriter::new(File::create(&path).unwrap());
    writer.write_record(&create_realistic_record()).unwrap();
    for title in ["Second", "Third"] {
        writer.write_record(&titled(title)).unwrap();
    }
    writer.finish().unwrap();
    assert_eq!(writer.records_written(), 3);

    let mut reader = MarcReader::from_path(&path).unwrap();
    let records: Vec<Record> = reader.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(title_of(&records[0]), "The Great Gatsby /");
    assert_eq!(title_of(&records[2]), "Third");
    assert_eq!(reader.records_read(), 3);
    assert_eq!(reader.errors(), 0);
}

#[test]
fn test_bad_record_in_file_is_skipped() {
    let mut good = Vec::new();
    let mut writer = MarcWriter::new(&mut good);
    writer.write_record(&titled("First")).unwrap();
    drop(writer);

    let mut broken = marc_codec::encode_record(&titled("Broken")).unwrap();
    // Directory length digits of the first entry.
    broken[27] = b'x';

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&good).unwrap();
    file.write_all(&broken).unwrap();
    file.write_all(b"\r\n").unwrap();
    file.write_all(&good).unwrap();
    file.flush().unwrap();

    let results: Vec<_> = MarcReader::from_path(file.path()).unwrap().collect();
    assert_eq!(results.len(), 3);
    assert_eq!(title_of(results[0].as_ref().unwrap()), "First");
    assert!(matches!(
        results[1],
        Err(MarcError::InvalidDirectoryEntry { part: "length", .. })
    ));
    assert_eq!(title_of(results[2].as_ref().unwrap()), "First");
}

#[test]
fn test_truncated_file_reports_last_record() {
    let bytes = marc_codec::encode_record(&titled("Whole")).unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    file.write_all(&bytes[..bytes.len() / 2]).unwrap();
    file.flush().unwrap();

    let mut reader = MarcReader::from_path(file.path()).unwrap();
    assert!(reader.read_record().unwrap().is_some());
    assert!(reader.read_record().is_err());
    assert!(reader.read_record().unwrap().is_none());
    assert_eq!(reader.records_read(), 1);
    assert_eq!(reader.errors(), 1);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = MarcReader::from_path(dir.path().join("absent.mrc")).unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_strict_config_rejects_line_breaks() {
    let bytes = marc_codec::encode_record(&titled("One")).unwrap();
    let mut stream = bytes.clone();
    stream.extend_from_slice(b"\n");
    stream.extend_from_slice(&bytes);

    let config = ReaderConfig {
        trim_line_breaks: false,
        ..ReaderConfig::default()
    };
    let results: Vec<_> = MarcReader::from_bytes(&stream).with_config(config).collect();
    assert_eq!(results.len(), 2);
    assert!(matches!(
        results[1],
        Err(MarcError::InvalidRecordLength { .. })
    ));
}

#[test]
fn test_empty_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut reader = MarcReader::from_path(file.path()).unwrap();
    assert!(reader.read_record().unwrap().is_none());
}
