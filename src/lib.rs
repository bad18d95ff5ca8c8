#![doc = include_str!("../README.md")]

#[macro_use]
mod trace;

pub mod decoder;
pub mod diagnostic;
pub mod error;
pub mod header;
pub mod headers;
pub mod mime;
pub mod text;

use std::io::BufRead;

pub use decoder::{DecodedWord, HeaderDecoder, WordError};
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, Discard};
pub use error::EMLError;
pub use headers::{HeaderMap, HeaderValue};

/// Read a header block, discarding diagnostics.
///
/// ```
/// let mut input = &b"Subject: hi\r\n\r\nbody"[..];
/// let headers = eml_header::read_header(&mut input).unwrap();
/// assert_eq!(headers.get("subject").unwrap(), "hi");
/// assert_eq!(input, b"body");
/// ```
pub fn read_header<R: BufRead + ?Sized>(reader: &mut R) -> error::Result<HeaderMap> {
    header::read_header(reader, &mut Discard)
}

/// Decode the encoded-words of a header value with the standard charsets.
///
/// ```
/// let s = eml_header::decode_header(b"=?ISO-8859-1?Q?Andr=E9?= Pirard");
/// assert_eq!(s, "André Pirard");
/// ```
pub fn decode_header(input: &[u8]) -> String {
    HeaderDecoder::default().decode_header(input, &mut Discard)
}

/// Re-encode the encoded-words of a header value as UTF-8 base64 words.
///
/// ```
/// let s = eml_header::decode_to_utf8_base64_header(b"=?ISO-8859-1?Q?Andr=E9?= <a@b>");
/// assert_eq!(s, "=?UTF-8?b?QW5kcsOp?= <a@b>");
/// ```
pub fn decode_to_utf8_base64_header(input: &[u8]) -> String {
    HeaderDecoder::default().reencode_header(input, &mut Discard)
}
