use ::charset::Charset;

/// Why a charset backend could not produce text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharsetError {
    #[error("unknown charset {0:?}")]
    Unknown(String),
    #[error("byte sequence is not valid {0}")]
    Malformed(String),
}

/// Turns bytes in a named charset into text.
///
/// This is the only seam between the decoders and a charset library.
/// Labels are compared case-insensitively. Implementations are shared by
/// independent decodes and must not keep per-call state.
///
/// Any `Fn(&str, &[u8]) -> Result<String, CharsetError>` is a backend, which
/// is handy to restrict or extend the charsets a caller accepts.
pub trait CharsetBackend {
    fn decode(&self, charset: &str, input: &[u8]) -> Result<String, CharsetError>;
}

impl<F> CharsetBackend for F
where
    F: Fn(&str, &[u8]) -> Result<String, CharsetError>,
{
    fn decode(&self, charset: &str, input: &[u8]) -> Result<String, CharsetError> {
        self(charset, input)
    }
}

/// Default backend
///
/// Labels are resolved as the WHATWG Encoding Standard does (through
/// `encoding_rs`), plus UTF-7. This covers the IANA names seen in mail:
/// US-ASCII and the ISO-8859 family, UTF-8, Shift_JIS, EUC-JP,
/// ISO-2022-JP, EUC-KR, GB2312, Big5, KOI8-R...
///
/// The WHATWG "replacement" encoding, which maps labels such as
/// ISO-2022-KR to a single U+FFFD, is reported as unknown.
///
/// WHATWG resolves US-ASCII to windows-1252. Here the US-ASCII labels are
/// strict instead: an 8-bit byte is malformed data.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardCharsets;

/// IANA aliases of US-ASCII seen in mail
const ASCII_LABELS: &[&str] = &["us-ascii", "ascii", "us", "ansi_x3.4-1968", "iso646-us", "csascii"];

impl StandardCharsets {
    pub fn is_ascii_label(label: &str) -> bool {
        let label = label.trim();
        ASCII_LABELS.iter().any(|l| l.eq_ignore_ascii_case(label))
    }

    pub fn lookup(label: &str) -> Option<Charset> {
        Charset::for_label_no_replacement(label.trim().as_bytes())
    }
}

impl CharsetBackend for StandardCharsets {
    fn decode(&self, label: &str, input: &[u8]) -> Result<String, CharsetError> {
        if Self::is_ascii_label(label) {
            if !input.is_ascii() {
                return Err(CharsetError::Malformed("US-ASCII".into()));
            }
            return Ok(String::from_utf8_lossy(input).into_owned());
        }
        let charset = Self::lookup(label).ok_or_else(|| CharsetError::Unknown(label.into()))?;
        let (text, malformed) = charset.decode_without_bom_handling(input);
        if malformed {
            return Err(CharsetError::Malformed(charset.name().into()));
        }
        Ok(text.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        for label in ["us-ascii", "Us-Ascii", "ascii", "ISO-8859-1", "utf-8", "utf8", "big5", "Shift_JIS", " koi8-r "] {
            assert!(StandardCharsets::lookup(label).is_some(), "{label}");
        }
        assert!(StandardCharsets::lookup("x-klingon").is_none());
        assert!(StandardCharsets::lookup("iso-2022-kr").is_none());
    }

    #[test]
    fn test_decode() {
        let backend = StandardCharsets;
        assert_eq!(backend.decode("US-ASCII", b"Keith Moore"), Ok("Keith Moore".into()));
        assert_eq!(
            backend.decode("utf-8", b"abcABC $ \xc2\xa2 \xe2\x82\xac"),
            Ok("abcABC $ \u{a2} \u{20ac}".into())
        );
        assert_eq!(
            backend.decode("iso-8859-1", b"#\xa3 c\xa9 r\xae u\xb5"),
            Ok("#\u{a3} c\u{a9} r\u{ae} u\u{b5}".into())
        );
        assert_eq!(
            backend.decode("big5", b"\xa1\x5d \xa1\x61 \xa1\x71"),
            Ok("\u{ff08} \u{ff5b} \u{3008}".into())
        );
    }

    #[test]
    fn test_decode_failures() {
        let backend = StandardCharsets;
        assert_eq!(
            backend.decode("x-klingon", b"abc"),
            Err(CharsetError::Unknown("x-klingon".into()))
        );
        assert!(matches!(
            backend.decode("utf-8", b"caf\xe9"),
            Err(CharsetError::Malformed(_))
        ));
        // no windows-1252 fallback for 8-bit bytes
        assert_eq!(
            backend.decode("US-ASCII", b"caf\xe9"),
            Err(CharsetError::Malformed("US-ASCII".into()))
        );
        assert_eq!(
            backend.decode(" ascii", b"\x80"),
            Err(CharsetError::Malformed("US-ASCII".into()))
        );
        assert_eq!(backend.decode("iso-8859-1", b"caf\xe9"), Ok("caf\u{e9}".into()));
    }

    #[test]
    fn test_closure_backend() {
        let ascii_only = |charset: &str, input: &[u8]| {
            if charset.eq_ignore_ascii_case("us-ascii") && input.is_ascii() {
                Ok(String::from_utf8_lossy(input).into_owned())
            } else {
                Err(CharsetError::Unknown(charset.into()))
            }
        };
        assert_eq!(ascii_only.decode("US-ASCII", b"ok"), Ok("ok".into()));
        assert!(ascii_only.decode("utf-8", b"ok").is_err());
    }
}
