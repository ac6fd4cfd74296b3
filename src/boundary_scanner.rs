//! Record boundary detection on 0x1D delimiters.
//!
//! A multi-record stream is records back to back with nothing in between;
//! each record ends with the record terminator. Boundaries are found with
//! the SIMD-accelerated `memchr` crate.
//!
//! # Example
//!
//! ```
//! use marc_codec::split_records;
//!
//! let data = [1, 2, 3, 0x1D, 4, 5, 0x1D];
//! let pieces = split_records(&data);
//! assert_eq!(pieces, [&[1, 2, 3, 0x1D][..], &[4, 5, 0x1D][..]]);
//! ```

use crate::constants::RECORD_TERMINATOR;

/// Find record boundaries as `(offset, length)` pairs.
///
/// Each length includes the terminator. Bytes after the last terminator are
/// reported as a final boundary of their own if there are any.
///
/// ```
/// use marc_codec::boundary_scanner::record_boundaries;
///
/// let data = [1, 2, 3, 0x1D, 4, 5];
/// assert_eq!(record_boundaries(&data), [(0, 4), (4, 2)]);
/// assert!(record_boundaries(&[]).is_empty());
/// ```
#[must_use]
pub fn record_boundaries(buffer: &[u8]) -> Vec<(usize, usize)> {
    let mut boundaries = Vec::new();
    let mut offset = 0;

    for terminator_pos in memchr::memchr_iter(RECORD_TERMINATOR, buffer) {
        boundaries.push((offset, terminator_pos - offset + 1));
        offset = terminator_pos + 1;
    }
    if offset < buffer.len() {
        boundaries.push((offset, buffer.len() - offset));
    }

    boundaries
}

/// Split a buffer into raw records, each keeping its terminator.
///
/// A trailing remainder without a terminator is returned as the last piece,
/// so that it fails to decode on its own instead of vanishing.
#[must_use]
pub fn split_records(buffer: &[u8]) -> Vec<&[u8]> {
    record_boundaries(buffer)
        .into_iter()
        .map(|(offset, length)| &buffer[offset..offset + length])
        .collect()
}

/// Count record terminators without allocating.
#[must_use]
pub fn count_records(buffer: &[u8]) -> usize {
    memchr::memchr_iter(RECORD_TERMINATOR, buffer).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record() {
        let data = vec![b'a'; 10]
            .into_iter()
            .chain(std::iter::once(RECORD_TERMINATOR))
            .collect::<Vec<_>>();
        assert_eq!(record_boundaries(&data), [(0, 11)]);
        assert_eq!(split_records(&data), [&data[..]]);
    }

    #[test]
    fn test_multiple_records() {
        let data = [b'a', 0x1D, b'b', b'c', 0x1D, b'd', 0x1D];
        assert_eq!(record_boundaries(&data), [(0, 2), (2, 3), (5, 2)]);
        assert_eq!(count_records(&data), 3);
    }

    #[test]
    fn test_trailing_remainder_is_kept() {
        let data = [b'a', 0x1D, b'x', b'y'];
        let pieces = split_records(&data);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1], b"xy");
        assert_eq!(count_records(&data), 1);
    }

    #[test]
    fn test_no_terminator() {
        assert_eq!(split_records(b"abc"), [&b"abc"[..]]);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(split_records(&[]).is_empty());
        assert_eq!(count_records(&[]), 0);
    }

    #[test]
    fn test_consecutive_terminators() {
        let data = [0x1D, 0x1D];
        assert_eq!(record_boundaries(&data), [(0, 1), (1, 1)]);
    }
}
