use thiserror::Error;

/// An edit addressed lines a [`TokenizedDocument`](crate::TokenizedDocument)
/// does not have.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A line index at or past the end.
    #[error("line {line} is out of range for a document of {len} lines")]
    #[allow(missing_docs)]
    LineOutOfRange { line: usize, len: usize },
    /// A range that is inverted or ends past the last line.
    #[error("lines {start}..{end} are out of range for a document of {len} lines")]
    #[allow(missing_docs)]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
}
