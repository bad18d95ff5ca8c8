use std::borrow::Cow;
use std::fmt;

use crate::decoder::HeaderDecoder;
use crate::diagnostic::DiagnosticSink;

/// Headers that carry email addresses. Their values are usually handed to
/// an address-list parser after [`HeaderMap::get_canonical`].
pub const ADDRESS_HEADERS: &[&str] = &["bcc", "cc", "delivered-to", "from", "reply-to", "to"];

pub fn is_address_header(name: &str) -> bool {
    ADDRESS_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// One logical field value, continuation lines already joined.
///
/// Kept as raw bytes: 8-bit header text is common and its charset is
/// unknown until a decoder looks at it.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct HeaderValue(Vec<u8>);

impl HeaderValue {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl From<Vec<u8>> for HeaderValue {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl From<&[u8]> for HeaderValue {
    fn from(v: &[u8]) -> Self {
        Self(v.to_vec())
    }
}

impl From<&str> for HeaderValue {
    fn from(v: &str) -> Self {
        Self(v.as_bytes().to_vec())
    }
}

impl PartialEq<str> for HeaderValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for HeaderValue {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl fmt::Debug for HeaderValue {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("HeaderValue")
            .field(&self.to_string_lossy())
            .finish()
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&self.to_string_lossy())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    values: Vec<HeaderValue>,
}

/// Field names to their values.
///
/// Names compare case-insensitively and keep the case of their first
/// occurrence. Repeated fields keep every value in order, and distinct
/// names iterate in the order they first appeared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderMap {
    entries: Vec<Entry>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value, after any value already stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<HeaderValue>) {
        let name = name.into();
        let value = value.into();
        match self.entry_mut(&name) {
            Some(entry) => entry.values.push(value),
            None => self.entries.push(Entry {
                name,
                values: vec![value],
            }),
        }
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// First value of `name`
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entry(name).and_then(|e| e.values.first())
    }

    /// Every value of `name`, in order of appearance
    pub fn get_all(&self, name: &str) -> &[HeaderValue] {
        self.entry(name).map(|e| e.values.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HeaderValue])> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.values.as_slice()))
    }

    /// Number of distinct field names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value of `name` with its encoded-words decoded
    pub fn get_decoded(
        &self,
        name: &str,
        decoder: &HeaderDecoder<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<String> {
        self.get(name)
            .map(|v| decoder.decode_header(v.as_bytes(), sink))
    }

    /// First value of `name` with its encoded-words re-encoded to UTF-8
    pub fn get_canonical(
        &self,
        name: &str,
        decoder: &HeaderDecoder<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<String> {
        self.get(name)
            .map(|v| decoder.reencode_header(v.as_bytes(), sink))
    }
}
