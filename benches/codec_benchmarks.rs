#![allow(missing_docs)]
//! Benchmarks for the MARC codec.
//!
//! Fixtures are generated in memory so the suite needs no data files.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use marc_codec::{
    decode_all, decode_batch_parallel, decode_record, encode_record, Field, Leader, MarcReader,
    Record,
};

/// A book-sized record with a spread of control and data fields.
fn sample_record(i: usize) -> Record {
    let mut record = Record::with_leader(Leader::default());
    record.append(Field::control("001", format!("ocm{i:08}")));
    record.append(Field::control("008", "250101s2024    nyu           000 0 eng d"));
    record.append(Field::data("020", ' ', ' ', [('a', "9780743273565")]));
    record.append(Field::data("100", '1', ' ', [('a', "Author, Sample,"), ('d', "1900-1990.")]));
    record.append(Field::data(
        "245",
        '1',
        '0',
        [('a', format!("Title number {i} /")), ('c', "Sample Author.".to_string())],
    ));
    record.append(Field::data("260", ' ', ' ', [('a', "New York :"), ('b', "Publisher,"), ('c', "2024.")]));
    for subject in ["Testing", "Benchmarks", "Library science"] {
        record.append(Field::data("650", ' ', '0', [('a', subject), ('v', "Fiction.")]));
    }
    record
}

fn build_stream(count: usize) -> Vec<u8> {
    (0..count)
        .flat_map(|i| encode_record(&sample_record(i)).unwrap_or_default())
        .collect()
}

fn benchmark_decode_single(c: &mut Criterion) {
    let bytes = encode_record(&sample_record(0)).unwrap_or_default();
    let mut group = c.benchmark_group("single_record");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("decode", |b| b.iter(|| decode_record(black_box(&bytes))));
    let record = sample_record(0);
    group.bench_function("encode", |b| b.iter(|| encode_record(black_box(&record))));
    group.finish();
}

fn benchmark_streams(c: &mut Criterion) {
    let stream = build_stream(1_000);
    let mut group = c.benchmark_group("1k_records");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("reader", |b| {
        b.iter(|| MarcReader::from_bytes(black_box(&stream)).filter(Result::is_ok).count());
    });
    group.bench_function("decode_all", |b| b.iter(|| decode_all(black_box(&stream))));
    group.bench_function("decode_batch_parallel", |b| {
        b.iter(|| decode_batch_parallel(black_box(&stream)));
    });
    group.finish();
}

criterion_group!(benches, benchmark_decode_single, benchmark_streams);
criterion_main!(benches);
