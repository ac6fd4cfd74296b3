//! Decoding whole multi-record buffers, sequentially or in parallel.
//!
//! Both entry points split the buffer with [`split_records`] and decode every
//! piece on its own, so one bad record yields one `Err` in its slot and
//! nothing else. Output order always matches input order.
//!
//! # Examples
//!
//! ```
//! use marc_codec::{decode_batch_parallel, encode_record, Field, Record};
//!
//! let mut record = Record::new();
//! record.append(Field::data("245", '0', '0', [('a', "Title")]));
//! let one = encode_record(&record)?;
//!
//! let mut buffer = one.clone();
//! buffer.extend_from_slice(b"00003");
//! buffer.extend_from_slice(&one);
//!
//! let results = decode_batch_parallel(&buffer);
//! assert_eq!(results.len(), 2);
//! # Ok::<(), marc_codec::MarcError>(())
//! ```

use crate::boundary_scanner::split_records;
use crate::error::Result;
use crate::reader::{decode_piece, ReaderConfig};
use crate::record::Record;
use rayon::prelude::*;

/// Decode every record in `buffer`, one after another.
#[must_use]
pub fn decode_all(buffer: &[u8]) -> Vec<Result<Record>> {
    decode_all_with_config(buffer, &ReaderConfig::default())
}

/// [`decode_all`] with explicit reader options.
#[must_use]
pub fn decode_all_with_config(buffer: &[u8], config: &ReaderConfig) -> Vec<Result<Record>> {
    split_records(buffer)
        .into_iter()
        .filter_map(|piece| decode_piece(piece, config))
        .collect()
}

/// Decode every record in `buffer` on Rayon's thread pool.
///
/// Produces the same results as [`decode_all`], in the same order. The
/// pool size follows `RAYON_NUM_THREADS` as usual.
#[must_use]
pub fn decode_batch_parallel(buffer: &[u8]) -> Vec<Result<Record>> {
    decode_batch_parallel_with_config(buffer, &ReaderConfig::default())
}

/// [`decode_batch_parallel`] with explicit reader options.
#[must_use]
pub fn decode_batch_parallel_with_config(
    buffer: &[u8],
    config: &ReaderConfig,
) -> Vec<Result<Record>> {
    let pieces = split_records(buffer);
    tracing::debug!(records = pieces.len(), "decoding batch in parallel");

    pieces
        .par_iter()
        .filter_map(|piece| decode_piece(piece, config))
        .collect()
}
