/// Hard failures: the header block cannot be read at all.
///
/// Anything recoverable is reported as a [`crate::diagnostic::Diagnostic`]
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum EMLError {
    /// The stream ended before the blank line closing the header block, the
    /// caller cannot tell whether a body is present.
    #[error("end of stream inside the header block")]
    UnexpectedEof,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EMLError>;
