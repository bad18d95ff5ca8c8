use nom::{
    bytes::complete::{tag, take_while1},
    character::is_alphanumeric,
    sequence::terminated,
    IResult,
};

use crate::text::ascii;

/// ASCII printable characters
pub fn is_vchar(c: u8) -> bool {
    (ascii::EXCLAMATION..=ascii::TILDE).contains(&c)
}

/// Field name allowed characters
///
/// ```abnf
/// ftext      =   %d33-57 /          ; Printable US-ASCII
///                %d59-126           ;  characters not including
///                                   ;  ":".
/// ```
pub fn is_ftext(c: u8) -> bool {
    is_vchar(c) && c != ascii::COL
}

/// Field name, up to and including the colon
///
/// The colon must come before any white space: `name : value` is not a
/// field start, the header reader folds such a line into the previous
/// value.
///
/// ```abnf
/// field-name     =   1*ftext
/// ```
pub fn field_name(input: &[u8]) -> IResult<&[u8], &[u8]> {
    terminated(take_while1(is_ftext), tag(":"))(input)
}

/// MIME Token allowed characters
///
/// forbidden: ()<>@,;:\"/[]?=
pub fn is_mime_atom_text(c: u8) -> bool {
    is_alphanumeric(c)
        || c == ascii::EXCLAMATION
        || c == ascii::NUM
        || c == ascii::DOLLAR
        || c == ascii::PERCENT
        || c == ascii::AMPERSAND
        || c == ascii::SQUOTE
        || c == ascii::ASTERISK
        || c == ascii::PLUS
        || c == ascii::MINUS
        || c == ascii::PERIOD
        || c == ascii::CARRET
        || c == ascii::UNDERSCORE
        || c == ascii::GRAVE
        || c == ascii::LEFT_CURLY
        || c == ascii::PIPE
        || c == ascii::RIGHT_CURLY
        || c == ascii::TILDE
}

/// `1*token_text`
///
/// Control characters are not token text: a charset field holding a
/// CR or LF stops here and the encoded-word is rejected.
pub fn mime_atom_plain(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(is_mime_atom_text)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ftext() {
        assert!(is_ftext(b'X'));
        assert!(is_ftext(b'-'));
        assert!(is_ftext(b'='));
        assert!(!is_ftext(b':'));
        assert!(!is_ftext(b' '));
        assert!(!is_ftext(0x7f));
    }

    #[test]
    fn test_field_name() {
        assert_eq!(
            field_name(b"Content-Type: text/plain"),
            Ok((&b" text/plain"[..], &b"Content-Type"[..]))
        );
        // white space before the colon
        assert!(field_name(b"comments : obsolete").is_err());
        assert!(field_name(b"word=x; foo:=bar").is_err());
        assert_eq!(field_name(b"word=x;foo:=bar"), Ok((&b"=bar"[..], &b"word=x;foo"[..])));
        assert_eq!(field_name(b"line2: bar"), Ok((&b" bar"[..], &b"line2"[..])));
        assert!(field_name(b"line2=bar; name=value:text").is_err());
        assert!(field_name(b": no name").is_err());
        assert!(field_name(b" folded: value").is_err());
    }

    #[test]
    fn test_mime_atom_plain() {
        assert_eq!(
            mime_atom_plain(b"ISO-8859-1?Q?a?="),
            Ok((&b"?Q?a?="[..], &b"ISO-8859-1"[..]))
        );
        assert_eq!(
            mime_atom_plain(b"US\nASCII?Q?x?="),
            Ok((&b"\nASCII?Q?x?="[..], &b"US"[..]))
        );
        assert!(mime_atom_plain(b"?Q?").is_err());
    }
}
