#![no_main]

use libfuzzer_sys::fuzz_target;
use marc_codec::{decode_record, encode_record};

// Any record that decodes without warnings must encode to bytes that decode
// to the same fields.
fuzz_target!(|data: &[u8]| {
    let Ok(record) = decode_record(data) else {
        return;
    };
    if record.warnings().next().is_some() {
        return;
    }
    if let Ok(bytes) = encode_record(&record) {
        let again = decode_record(&bytes).map(|r| r.fields().to_vec());
        assert_eq!(again.ok().as_deref(), Some(record.fields()));
    }
});
