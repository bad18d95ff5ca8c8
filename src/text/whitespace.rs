//! Whitespace classification shared by the header reader and the
//! encoded-word scanners.

use crate::text::ascii;

/// Folding white space inside a line
///
/// ```abnf
/// WSP = SP / HTAB
/// ```
pub fn is_ws(c: u8) -> bool {
    ascii::WS.contains(&c)
}

/// RFC 822 linear white space, line breaks included
///
/// Detects the separators used to split a header value into tokens.
pub fn is_lwsp(c: u8) -> bool {
    ascii::LWSP.contains(&c)
}

/// True when `gap` holds nothing but folding white space.
///
/// Two encoded-words separated by such a gap are one logical phrase
/// (RFC 2047 section 6.2): the gap is not displayed. An empty gap
/// qualifies too.
pub fn is_folding_gap(gap: &[u8]) -> bool {
    gap.iter().all(|c| is_lwsp(*c))
}

/// Split a value into its whitespace-delimited tokens.
///
/// Runs of separators collapse, leading and trailing separators are
/// dropped.
pub fn tokens(input: &[u8]) -> impl Iterator<Item = &[u8]> {
    input
        .split(|c| is_lwsp(*c))
        .filter(|tok| !tok.is_empty())
}

/// Obsolete/Compatible line ending
///
/// Lines must end with \r\n but a lot of mail in the wild only uses \n,
/// both are accepted. Returns `None` if the line is not terminated.
pub fn strip_line_ending(line: &[u8]) -> Option<&[u8]> {
    line.strip_suffix(&[ascii::LF])
        .map(|l| l.strip_suffix(&[ascii::CR]).unwrap_or(l))
}

/// Remove leading folding white space
pub fn trim_ws_start(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|c| !is_ws(*c)).unwrap_or(input.len());
    &input[start..]
}

/// Remove trailing linear white space
pub fn trim_lwsp_end(input: &[u8]) -> &[u8] {
    let end = input.iter().rposition(|c| !is_lwsp(*c)).map_or(0, |i| i + 1);
    &input[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lwsp() {
        for c in [b' ', b'\t', b'\r', b'\n'] {
            assert!(is_lwsp(c));
        }
        for c in [b'a', b'(', b'=', 0x0b, 0x0c, 0x00] {
            assert!(!is_lwsp(c));
        }
    }

    #[test]
    fn test_folding_gap() {
        assert!(is_folding_gap(b" "));
        assert!(is_folding_gap(b"  \t"));
        assert!(is_folding_gap(b"\r\n  "));
        assert!(is_folding_gap(b""));
        assert!(!is_folding_gap(b" b "));
    }

    #[test]
    fn test_tokens() {
        let toks: Vec<&[u8]> = tokens(b"  First\tLast \r\n <u@h>  ").collect();
        assert_eq!(toks, vec![&b"First"[..], &b"Last"[..], &b"<u@h>"[..]]);
        assert_eq!(tokens(b" \r\n\t").count(), 0);
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending(b"From: a\r\n"), Some(&b"From: a"[..]));
        assert_eq!(strip_line_ending(b"From: a\n"), Some(&b"From: a"[..]));
        assert_eq!(strip_line_ending(b"\r\n"), Some(&b""[..]));
        assert_eq!(strip_line_ending(b"From: a"), None);
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim_ws_start(b" \t value "), &b"value "[..]);
        assert_eq!(trim_lwsp_end(b" value \r\n"), &b" value"[..]);
        assert_eq!(trim_lwsp_end(b" \t "), &b""[..]);
    }
}
