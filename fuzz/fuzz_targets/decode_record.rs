#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = marc_codec::decode_record(data);
    for result in marc_codec::MarcReader::from_bytes(data) {
        let _ = result;
    }
});
