#![no_main]

use libfuzzer_sys::fuzz_target;

use eml_header::header::read_header;
use eml_header::Diagnostic;

fuzz_target!(|data: &[u8]| {
    let mut reader = data;
    let mut diags: Vec<Diagnostic> = vec![];
    if let Ok(headers) = read_header(&mut reader, &mut diags) {
        // the body is untouched
        assert!(data.ends_with(reader));
        for (name, values) in headers.iter() {
            assert!(!name.is_empty());
            assert!(!values.is_empty());
        }
    }
});
