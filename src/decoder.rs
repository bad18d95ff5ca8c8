//! Header value decoding per RFC 2047.
//!
//! Terminology from RFC 2047:
//!  - encoded-word: the entire `=?charset?encoding?encoded-text?=` string
//!  - charset: the character set portion of the encoded word
//!  - encoding: the character encoding type used for the encoded-text
//!  - encoded-text: the text we are decoding

use std::borrow::Cow;
use std::fmt;

use memchr::memmem;
use nom::combinator::all_consuming;

use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::mime::charset::{CharsetBackend, CharsetError, StandardCharsets};
use crate::text::ascii;
use crate::text::encoding::{encode_base64_words, encoded_word, EncodedWord, MAX_ENCODED_WORD_LEN};
use crate::text::whitespace::{is_folding_gap, is_lwsp, tokens};

/// Charset label of every re-encoded word. The encoding is always "b".
pub const TARGET_CHARSET: &str = "UTF-8";

const OPENER: &[u8] = b"=?";
const CLOSER: &[u8] = b"?=";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWord {
    pub text: String,
    /// Charset the word was declared in, language suffix removed
    pub charset: String,
}

/// Why an encoded-word is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordError {
    #[error("not an encoded-word")]
    Syntax,
    #[error("invalid {0}-encoded text")]
    Transfer(char),
    #[error(transparent)]
    Charset(#[from] CharsetError),
}

impl WordError {
    fn diagnostic(&self, raw: &[u8]) -> Diagnostic {
        let kind = match self {
            WordError::Syntax | WordError::Transfer(_) => DiagnosticKind::MalformedEncodedWord,
            WordError::Charset(CharsetError::Unknown(_)) => DiagnosticKind::CharsetUnknown,
            WordError::Charset(CharsetError::Malformed(_)) => DiagnosticKind::CharsetMalformed,
        };
        Diagnostic::warning(kind, format!("{} in {:?}, kept as is", self, snippet(raw)))
    }
}

/// The raw word as shown in diagnostics: up to the first white space,
/// bounded to the size of a legal encoded-word.
fn snippet(raw: &[u8]) -> Cow<'_, str> {
    let end = raw
        .iter()
        .position(|c| is_lwsp(*c))
        .unwrap_or(raw.len())
        .min(MAX_ENCODED_WORD_LEN);
    String::from_utf8_lossy(&raw[..end])
}

fn push_lossy(out: &mut String, bytes: &[u8]) {
    out.push_str(&String::from_utf8_lossy(bytes))
}

/// Decodes encoded-words through a [`CharsetBackend`].
///
/// The decoder holds no state of its own: one instance can serve any number
/// of concurrent parses, each with its own sink.
#[derive(Clone, Copy)]
pub struct HeaderDecoder<'c> {
    charsets: &'c (dyn CharsetBackend + Sync),
}

impl Default for HeaderDecoder<'static> {
    fn default() -> Self {
        Self::new(&StandardCharsets)
    }
}

impl<'c> fmt::Debug for HeaderDecoder<'c> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderDecoder").finish_non_exhaustive()
    }
}

impl<'c> HeaderDecoder<'c> {
    pub fn new(charsets: &'c (dyn CharsetBackend + Sync)) -> Self {
        Self { charsets }
    }

    /// Decode exactly one encoded-word.
    ///
    /// Any error means "use the input verbatim". Nothing is recorded here;
    /// callers owning a sink decide what to report.
    pub fn decode_word(&self, input: &[u8]) -> Result<DecodedWord, WordError> {
        let (_, word) = all_consuming(encoded_word)(input).map_err(|_| WordError::Syntax)?;
        self.decode_parsed(&word)
    }

    fn decode_parsed(&self, word: &EncodedWord<'_>) -> Result<DecodedWord, WordError> {
        let bytes = word
            .decode_bytes()
            .ok_or(WordError::Transfer(word.encoding.as_letter()))?;
        let text = self.charsets.decode(word.charset_name(), &bytes)?;
        Ok(DecodedWord {
            text,
            charset: word.charset_name().into(),
        })
    }

    /// Decode every encoded-word of a header value into human readable text.
    ///
    /// Text outside encoded-words is kept as is. White space between two
    /// encoded-words is dropped (RFC 2047 section 6.2), white space next
    /// to ordinary text is kept. A word that cannot be decoded stays in its
    /// raw form and a warning is recorded.
    pub fn decode_header(&self, input: &[u8], sink: &mut dyn DiagnosticSink) -> String {
        if memmem::find(input, OPENER).is_none() {
            // Don't scan if there is nothing to do here
            return String::from_utf8_lossy(input).into_owned();
        }
        self.canonicalize(input, sink).0
    }

    /// Returns the decoded text and how many encoded-words were decoded.
    fn canonicalize(&self, input: &[u8], sink: &mut dyn DiagnosticSink) -> (String, usize) {
        let mut out = String::with_capacity(input.len());
        let mut decoded = 0;
        let mut after_word = false;
        let mut rest = input;

        while let Some(start) = memmem::find(rest, OPENER) {
            let (literal, candidate) = rest.split_at(start);
            let (raw, tail, result) = match encoded_word(candidate) {
                Ok((tail, word)) => (
                    &candidate[..candidate.len() - tail.len()],
                    tail,
                    self.decode_parsed(&word),
                ),
                // Rescan right after the opener, a real word may start there
                Err(_) => (&candidate[..OPENER.len()], &candidate[OPENER.len()..], Err(WordError::Syntax)),
            };

            match result {
                Ok(word) => {
                    if !(after_word && is_folding_gap(literal)) {
                        push_lossy(&mut out, literal);
                    }
                    out.push_str(&word.text);
                    decoded += 1;
                    after_word = true;
                }
                Err(e) => {
                    recover!(error = %e, "encoded-word kept as is");
                    let shown = if e == WordError::Syntax { candidate } else { raw };
                    sink.record(e.diagnostic(shown));
                    push_lossy(&mut out, literal);
                    push_lossy(&mut out, raw);
                    after_word = false;
                }
            }
            rest = tail;
        }
        push_lossy(&mut out, rest);

        (out, decoded)
    }

    /// Re-encode every encoded-word of a header value as UTF-8 "b" words.
    ///
    /// The value is split on white space; each token holding an encoded-word
    /// is decoded and re-encoded, a comment parenthesis stuck to the token
    /// is kept outside the new word. Tokens are joined back with a single
    /// space, so runs of white space between tokens are not preserved.
    pub fn reencode_header(&self, input: &[u8], sink: &mut dyn DiagnosticSink) -> String {
        if memmem::find(input, OPENER).is_none() {
            return String::from_utf8_lossy(input).into_owned();
        }

        let mut output = Vec::new();
        for (i, token) in tokens(input).enumerate() {
            let reencoded = self.reencode_token(token, sink);
            sink.trace(format_args!("{} {} {:?}", i, token.escape_ascii(), reencoded));
            trace_token!(index = i, output = %reencoded, "re-encoded token");
            output.push(reencoded);
        }
        output.join(" ")
    }

    fn reencode_token(&self, token: &[u8], sink: &mut dyn DiagnosticSink) -> String {
        if token.len() <= 4 || memmem::find(token, OPENER).is_none() {
            return String::from_utf8_lossy(token).into_owned();
        }

        // Stash parenthesis, they should not be encoded
        let (prefix, body) = match token.strip_prefix(&[ascii::LEFT_PAR]) {
            Some(body) => ("(", body),
            None => ("", token),
        };
        let (body, suffix) = match body.strip_suffix(&[ascii::RIGHT_PAR]) {
            Some(body) => (body, ")"),
            None => (body, ""),
        };

        // Text stuck to the outer words stays literal, or a following
        // encoded-word would swallow the space before it on decode
        let (lead, core, trail) = split_literals(body);

        match self.canonicalize(core, sink) {
            (text, n) if n > 0 => format!(
                "{}{}{}{}{}",
                prefix,
                String::from_utf8_lossy(lead),
                encode_base64_words(TARGET_CHARSET, &text),
                String::from_utf8_lossy(trail),
                suffix
            ),
            _ => String::from_utf8_lossy(token).into_owned(),
        }
    }
}

/// Split a token into the text before its first `=?`, the span up to its
/// last `?=`, and what follows.
fn split_literals(token: &[u8]) -> (&[u8], &[u8], &[u8]) {
    let start = memmem::find(token, OPENER).unwrap_or(0);
    let end = memmem::rfind(&token[start..], CLOSER)
        .filter(|i| *i >= OPENER.len())
        .map_or(token.len(), |i| start + i + CLOSER.len());
    (&token[..start], &token[start..end], &token[end..])
}
