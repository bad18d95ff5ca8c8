use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1, take_while_m_n},
    character::complete::one_of,
    character::is_hex_digit,
    combinator::{all_consuming, map, map_opt, map_res, value},
    multi::fold_many0,
    sequence::{preceded, tuple},
    IResult,
};

use crate::text::ascii;
use crate::text::words::mime_atom_plain;

/// Longest encoded-word allowed by RFC 2047 section 2, delimiters included.
pub const MAX_ENCODED_WORD_LEN: usize = 75;

/// Padding is frequently missing or truncated in the wild.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WordEncoding {
    /// "Q", a quoted-printable variant
    Quoted,
    /// "B", base64
    Base64,
}

impl WordEncoding {
    pub fn as_letter(&self) -> char {
        match self {
            WordEncoding::Quoted => 'Q',
            WordEncoding::Base64 => 'B',
        }
    }
}

/// A parsed, not yet decoded, `=?charset?encoding?text?=` unit.
#[derive(Debug, PartialEq, Clone)]
pub struct EncodedWord<'a> {
    /// Raw charset field, may carry an RFC 2231 language suffix
    pub charset: &'a str,
    pub encoding: WordEncoding,
    pub text: &'a [u8],
}

impl<'a> EncodedWord<'a> {
    /// Charset label without its language suffix
    pub fn charset_name(&self) -> &'a str {
        match self.charset.split_once('*') {
            Some((name, _)) => name,
            None => self.charset,
        }
    }

    /// RFC 2231 language, as in `=?UTF-8*en?Q?...?=`
    pub fn language(&self) -> Option<&'a str> {
        self.charset.split_once('*').map(|(_, lang)| lang)
    }

    /// Undo the transfer encoding. The result is still in `charset`.
    pub fn decode_bytes(&self) -> Option<Vec<u8>> {
        match self.encoding {
            WordEncoding::Quoted => decode_quoted(self.text),
            WordEncoding::Base64 => LENIENT_BASE64.decode(self.text).ok(),
        }
    }
}

/// Encoded word
///
/// ```abnf
/// encoded-word = "=?" charset "?" encoding "?" encoded-text "?="
/// charset      = token    ; see section 3
/// encoding     = token    ; see section 4
/// ```
///
/// The parser is strict on the delimiters: a charset or encoding field
/// holding a control character means the scanner ran past the real token
/// boundary and the input is rejected.
pub fn encoded_word(input: &[u8]) -> IResult<&[u8], EncodedWord<'_>> {
    let (rest, (_, charset, _, encoding, _, text, _)) = tuple((
        tag("=?"),
        map_res(mime_atom_plain, std::str::from_utf8),
        tag("?"),
        word_encoding,
        tag("?"),
        take_while(is_encoded_text),
        tag("?="),
    ))(input)?;

    Ok((
        rest,
        EncodedWord {
            charset,
            encoding,
            text,
        },
    ))
}

fn word_encoding(input: &[u8]) -> IResult<&[u8], WordEncoding> {
    alt((
        value(WordEncoding::Quoted, one_of("Qq")),
        value(WordEncoding::Base64, one_of("Bb")),
    ))(input)
}

/// RFC 2047 forbids white space in encoded-text, mailers still send raw
/// spaces in Q words. Everything printable but "?" is accepted here and
/// the transfer decoding decides.
fn is_encoded_text(c: u8) -> bool {
    c >= ascii::SP && c != ascii::QUESTION && c != ascii::DEL
}

#[derive(Debug, PartialEq, Clone)]
pub enum QuotedChunk<'a> {
    Safe(&'a [u8]),
    Encoded(u8),
    Space,
}

/// Decode the Q encoding of RFC 2047 section 4.2.
///
/// Unlike a quoted-printable body, "_" stands for a space. Returns `None`
/// on a stray "=" or an invalid hex octet.
pub fn decode_quoted(text: &[u8]) -> Option<Vec<u8>> {
    all_consuming(fold_many0(
        quoted_chunk,
        || Vec::with_capacity(text.len()),
        |mut acc, chunk| {
            match chunk {
                QuotedChunk::Safe(v) => acc.extend_from_slice(v),
                QuotedChunk::Encoded(b) => acc.push(b),
                QuotedChunk::Space => acc.push(ascii::SP),
            };
            acc
        },
    ))(text)
    .ok()
    .map(|(_, bytes)| bytes)
}

pub fn quoted_chunk(input: &[u8]) -> IResult<&[u8], QuotedChunk<'_>> {
    alt((safe_char2, encoded_space, hex_octet))(input)
}

fn safe_char2(input: &[u8]) -> IResult<&[u8], QuotedChunk<'_>> {
    map(take_while1(is_safe_char2), QuotedChunk::Safe)(input)
}

/// RFC2047 section 4.2
/// 8-bit values which correspond to printable ASCII characters other
/// than "=", "?", and "_" (underscore), MAY be represented as those
/// characters.
fn is_safe_char2(c: u8) -> bool {
    c >= ascii::SP && c != ascii::UNDERSCORE && c != ascii::QUESTION && c != ascii::EQ
}

fn encoded_space(input: &[u8]) -> IResult<&[u8], QuotedChunk<'_>> {
    value(QuotedChunk::Space, tag("_"))(input)
}

fn hex_octet(input: &[u8]) -> IResult<&[u8], QuotedChunk<'_>> {
    map_opt(
        preceded(tag("="), take_while_m_n(2, 2, is_hex_digit)),
        |h: &[u8]| {
            std::str::from_utf8(h)
                .ok()
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .map(QuotedChunk::Encoded)
        },
    )(input)
}

/// Encode `text` as one or more B encoded-words labelled `charset`.
///
/// Each word stays within `MAX_ENCODED_WORD_LEN` and never splits a
/// character; words are separated by a single space, which decoders
/// elide between adjacent encoded-words.
pub fn encode_base64_words(charset: &str, text: &str) -> String {
    // "=?" charset "?b?" text "?="
    let room = MAX_ENCODED_WORD_LEN.saturating_sub(charset.len() + 7);
    let max_chunk = (room / 4 * 3).max(4);

    let mut out = String::with_capacity(text.len() * 4 / 3 + charset.len() + 8);
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if idx > start && idx + c.len_utf8() - start > max_chunk {
            push_base64_word(&mut out, charset, &text[start..idx]);
            start = idx;
        }
    }
    push_base64_word(&mut out, charset, &text[start..]);
    out
}

fn push_base64_word(out: &mut String, charset: &str, chunk: &str) {
    if !out.is_empty() {
        out.push(ascii::SP as char);
    }
    out.push_str("=?");
    out.push_str(charset);
    out.push_str("?b?");
    general_purpose::STANDARD.encode_string(chunk.as_bytes(), out);
    out.push_str("?=");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encoded_word() {
        assert_eq!(
            encoded_word(b"=?US-ASCII?Q?Keith_Moore?= rest"),
            Ok((
                &b" rest"[..],
                EncodedWord {
                    charset: "US-ASCII",
                    encoding: WordEncoding::Quoted,
                    text: b"Keith_Moore",
                }
            ))
        );
        assert_eq!(
            encoded_word(b"=?utf-8?b?SGVsbG8=?=").map(|(_, w)| w.encoding),
            Ok(WordEncoding::Base64)
        );
    }

    #[test]
    fn test_encoded_word_rejected() {
        // control characters in the charset or encoding field
        assert!(encoded_word(b"=?US\nASCII?Q?Keith_Moore?=").is_err());
        assert!(encoded_word(b"=?US-ASCII?\r?Keith_Moore?=").is_err());
        // unknown encoding letter
        assert!(encoded_word(b"=?US-ASCII?X?Keith_Moore?=").is_err());
        // terminator must be exactly "?="
        assert!(encoded_word(b"=?US-ASCII?Q?Keith_Moore?!").is_err());
        assert!(encoded_word(b"=?US-ASCII?Q?Keith_Moore").is_err());
        // empty charset
        assert!(encoded_word(b"=??Q?a?=").is_err());
    }

    #[test]
    fn test_language_suffix() {
        let (_, w) = encoded_word(b"=?UTF-8*en?Q?hello?=").unwrap();
        assert_eq!(w.charset_name(), "UTF-8");
        assert_eq!(w.language(), Some("en"));

        let (_, w) = encoded_word(b"=?UTF-8?Q?hello?=").unwrap();
        assert_eq!(w.charset_name(), "UTF-8");
        assert_eq!(w.language(), None);
    }

    // =?iso8859-1?Q?Accus=E9_de_r=E9ception_(affich=E9)?=
    #[test]
    fn test_quoted_chunks() {
        let mut input = &b"Accus=E9_de"[..];
        let mut chunks = vec![];
        while !input.is_empty() {
            let (rest, chunk) = quoted_chunk(input).unwrap();
            chunks.push(chunk);
            input = rest;
        }
        assert_eq!(
            chunks,
            vec![
                QuotedChunk::Safe(b"Accus"),
                QuotedChunk::Encoded(0xe9),
                QuotedChunk::Space,
                QuotedChunk::Safe(b"de"),
            ]
        );
    }

    #[test]
    fn test_decode_quoted() {
        assert_eq!(
            decode_quoted(b"Accus=E9_de_r=e9ception_(affich=E9)"),
            Some(b"Accus\xe9 de r\xe9ception (affich\xe9)".to_vec())
        );
        assert_eq!(decode_quoted(b""), Some(vec![]));
        assert_eq!(decode_quoted(b"bad=ZZ"), None);
        assert_eq!(decode_quoted(b"trailing="), None);
        assert_eq!(decode_quoted(b"sign=+F"), None);
    }

    #[test]
    fn test_decode_base64() {
        let (_, w) = encoded_word(b"=?ISO-8859-1?B?SWYgeW91IGNhbiByZWFkIHRoaXMgeW8=?=").unwrap();
        assert_eq!(w.decode_bytes(), Some(b"If you can read this yo".to_vec()));

        // missing padding
        let (_, w) = encoded_word(b"=?US-ASCII?B?SGVsbG8gV29ybGQ?=").unwrap();
        assert_eq!(w.decode_bytes(), Some(b"Hello World".to_vec()));

        let (_, w) = encoded_word(b"=?US-ASCII?B?***?=").unwrap();
        assert_eq!(w.decode_bytes(), None);
    }

    #[test]
    fn test_encode_base64_words() {
        assert_eq!(
            encode_base64_words("UTF-8", "Mirosław"),
            "=?UTF-8?b?TWlyb3PFgmF3?=",
        );
        assert_eq!(encode_base64_words("UTF-8", ""), "=?UTF-8?b??=");
    }

    #[test]
    fn test_encode_base64_words_split() {
        let text = "é".repeat(40);
        let encoded = encode_base64_words("UTF-8", &text);
        let words: Vec<&str> = encoded.split(' ').collect();
        assert_eq!(words.len(), 2);

        let mut decoded = Vec::new();
        for word in words {
            assert!(word.len() <= MAX_ENCODED_WORD_LEN);
            let (rest, w) = encoded_word(word.as_bytes()).unwrap();
            assert!(rest.is_empty());
            let bytes = w.decode_bytes().unwrap();
            // every chunk is valid UTF-8 on its own
            assert!(std::str::from_utf8(&bytes).is_ok());
            decoded.extend(bytes);
        }
        assert_eq!(String::from_utf8(decoded).unwrap(), text);
    }
}
