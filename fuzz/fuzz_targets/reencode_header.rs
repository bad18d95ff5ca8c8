#![no_main]

use libfuzzer_sys::fuzz_target;

use eml_header::{Discard, HeaderDecoder};

fuzz_target!(|data: &[u8]| {
    let decoder = HeaderDecoder::default();
    let once = decoder.reencode_header(data, &mut Discard);
    // re-encoded words decode to the same text when encoded again
    let twice = decoder.reencode_header(once.as_bytes(), &mut Discard);
    assert_eq!(
        decoder.decode_header(once.as_bytes(), &mut Discard),
        decoder.decode_header(twice.as_bytes(), &mut Discard),
    );
});
