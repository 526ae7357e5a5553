
/// [`Result`][std::result::Result] alias for [`SyntaxError`].
pub type Result<T,E = SyntaxError> = core::result::Result<T,E>;

/// An error that may occur while compiling a template.
///
/// `offset` is the byte offset into the template source where the problem was found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {offset}")]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    offset: usize,
}

/// The kind of [`SyntaxError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    /// `{{` without matching `}}`.
    #[error("unclosed substitution")]
    Unclosed,
    /// `}}` in literal text without a preceding `{{`.
    #[error("unexpected `}}}}` outside substitution")]
    Unopened,
    /// `a..b`, `a.`, or `{{!}}`.
    #[error("empty name")]
    EmptyName,
    /// `{{!name%join}}` or `{{!name|data}}`.
    #[error("template insertion does not accept join string or data")]
    InsertData,
}

impl SyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    /// Byte offset into the template source.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

