//! Document errors.

/// Recoverable failures of document operations.
///
/// Queries on a document view treat out-of-range offsets as programmer
/// errors and panic; mutations come from user commands and report them
/// here instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// A multi-line indent was cancelled. Lines already re-indented stay.
    #[error("indentation cancelled after {completed} of {total} lines")]
    Cancelled { completed: usize, total: usize },

    /// The anchor was released, or belongs to another document.
    #[error("anchor is no longer valid")]
    StaleAnchor,

    /// The edit range does not fit in the document.
    #[error("edit at {offset} removing {len} bytes is outside the document of length {doc_len}")]
    InvalidEdit { offset: u32, len: u32, doc_len: u32 },

    /// The offset lies beyond the end of the document.
    #[error("offset {offset} is outside the document of length {doc_len}")]
    OutOfRange { offset: u32, doc_len: u32 },

    /// The offset splits a multi-byte character.
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: u32 },

    /// The document would grow beyond `u32::MAX` bytes.
    #[error("document would exceed {max} bytes")]
    TooLarge { max: u32 },
}
