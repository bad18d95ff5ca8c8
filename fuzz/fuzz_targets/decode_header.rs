#![no_main]

use libfuzzer_sys::fuzz_target;

use eml_header::{Diagnostic, HeaderDecoder};

fuzz_target!(|data: &[u8]| {
    let mut diags: Vec<Diagnostic> = vec![];
    let decoded = HeaderDecoder::default().decode_header(data, &mut diags);
    if !data.windows(2).any(|w| w == b"=?") {
        assert_eq!(decoded, String::from_utf8_lossy(data));
    }
    assert!(diags.iter().all(|d| !d.severe));
});
