use std::io::BufRead;

use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::{EMLError, Result};
use crate::headers::HeaderMap;
use crate::text::ascii;
use crate::text::whitespace::{is_ws, strip_line_ending, trim_lwsp_end, trim_ws_start};
use crate::text::words::field_name;

#[derive(Debug, PartialEq)]
enum Line<'a> {
    /// `field-name ":" value`, value without its leading white space
    Field(&'a [u8], &'a [u8]),
    /// Belongs to the value of the previous field
    Continuation(&'a [u8]),
}

/// Classify one header line, terminator already removed.
///
/// A line that starts with white space is a classic RFC 822 fold. A line
/// that does not look like `name: value` is folded into the previous
/// field too: malformed mailers routinely break long values on a new line
/// without indenting it.
fn classify(line: &[u8]) -> Line<'_> {
    if line.first().copied().is_some_and(is_ws) {
        return Line::Continuation(line);
    }
    match field_name(line) {
        Ok((rest, name)) => Line::Field(name, trim_ws_start(rest)),
        Err(_) => Line::Continuation(line),
    }
}

/// Read a block of SMTP or MIME headers.
///
/// Consumes lines up to and including the blank line that ends the header
/// section; the reader is left on the first byte of the body. Header
/// anomalies are recorded in `sink`, I/O errors and a stream that ends
/// before the blank line are returned.
///
/// Continuation lines are unfolded by removing the line break only, so a
/// fold keeps its indentation and a non-indented continuation is glued to
/// the previous line.
pub fn read_header<R: BufRead + ?Sized>(
    reader: &mut R,
    sink: &mut dyn DiagnosticSink,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut current: Option<(String, Vec<u8>)> = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(ascii::LF, &mut buf)? == 0 {
            return Err(EMLError::UnexpectedEof);
        }
        let line = strip_line_ending(&buf).ok_or(EMLError::UnexpectedEof)?;
        if line.is_empty() {
            // End of headers
            break;
        }

        match classify(line) {
            Line::Field(name, value) => {
                if let Some((name, value)) = current.take() {
                    headers.insert(name, trim_lwsp_end(&value));
                }
                current = Some((String::from_utf8_lossy(name).into_owned(), value.to_vec()));
            }
            Line::Continuation(more) => match current.as_mut() {
                Some((_name, value)) => {
                    if !more.first().copied().is_some_and(is_ws) {
                        recover!(field = %_name, "non-indented continuation line");
                    }
                    value.extend_from_slice(more);
                }
                None => {
                    discard!(line = %more.escape_ascii(), "header line before any field");
                    sink.record(Diagnostic::error(
                        DiagnosticKind::MalformedHeader,
                        format!(
                            "line {:?} precedes any field, dropped",
                            String::from_utf8_lossy(more)
                        ),
                    ));
                }
            },
        }
    }

    if let Some((name, value)) = current {
        headers.insert(name, trim_lwsp_end(&value));
    }
    Ok(headers)
}
