//! Structured, non-fatal records of parsing anomalies.
//!
//! Diagnostics are appended to a caller-owned [`DiagnosticSink`] for the
//! lifetime of one message parse. They are never raised as errors.

use std::fmt;

/// What went wrong. The set is closed so callers can match on it
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A multipart body lacks its closing boundary. Raised by enclosing
    /// body parsers, never by this crate.
    BoundaryMissing,
    /// An encoded-word names a charset the backend does not know.
    CharsetUnknown,
    /// The charset backend rejected the decoded bytes.
    CharsetMalformed,
    /// An "=?" opener that is not a valid encoded-word, or whose encoded
    /// text cannot be transfer-decoded.
    MalformedEncodedWord,
    /// A header line that could be neither a field nor a continuation.
    MalformedHeader,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::BoundaryMissing => "Boundary Missing",
            DiagnosticKind::CharsetUnknown => "Unknown Charset",
            DiagnosticKind::CharsetMalformed => "Malformed Charset Data",
            DiagnosticKind::MalformedEncodedWord => "Malformed Encoded-Word",
            DiagnosticKind::MalformedHeader => "Malformed Header",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub detail: String,
    /// Data was lost. When false a best-effort substitute was used and the
    /// output is still usable.
    pub severe: bool,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            severe: false,
        }
    }

    pub fn error(kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            severe: true,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sev = if self.severe { "E" } else { "W" };
        write!(f, "[{}] {}: {}", sev, self.kind, self.detail)
    }
}

/// Append-only destination for diagnostics.
///
/// `trace` receives free-form debugging events from the decoders. It is a
/// no-op unless a sink overrides it.
pub trait DiagnosticSink {
    fn record(&mut self, diagnostic: Diagnostic);

    fn trace(&mut self, _event: fmt::Arguments<'_>) {}
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic)
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl DiagnosticSink for Discard {
    fn record(&mut self, _diagnostic: Diagnostic) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let w = Diagnostic::warning(DiagnosticKind::CharsetUnknown, "Warn Details");
        assert_eq!(w.to_string(), "[W] Unknown Charset: Warn Details");
        assert!(!w.severe);

        let e = Diagnostic::error(DiagnosticKind::BoundaryMissing, "Error Details");
        assert_eq!(e.to_string(), "[E] Boundary Missing: Error Details");
        assert!(e.severe);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<Diagnostic> = vec![];
        {
            let dyn_sink: &mut dyn DiagnosticSink = &mut sink;
            dyn_sink.record(Diagnostic::warning(DiagnosticKind::MalformedEncodedWord, "a"));
            dyn_sink.trace(format_args!("ignored {}", 1));
            dyn_sink.record(Diagnostic::error(DiagnosticKind::MalformedHeader, "b"));
        }
        assert_eq!(
            sink.iter().map(|d| d.kind).collect::<Vec<_>>(),
            vec![DiagnosticKind::MalformedEncodedWord, DiagnosticKind::MalformedHeader]
        );
    }
}
