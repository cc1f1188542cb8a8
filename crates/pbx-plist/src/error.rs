//! Error types for property list parsing.

use thiserror::Error;

/// Errors that can occur when deserializing a property list.
#[derive(Debug, Error)]
pub enum PlistError {
    /// Input ended in the middle of a construct.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A character that cannot start or continue the expected construct.
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    /// A comment, string, data block, or container was never closed.
    #[error("unterminated {construct} starting at offset {offset}")]
    Unterminated {
        construct: &'static str,
        offset: usize,
    },

    /// An escape sequence inside a quoted string is malformed.
    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    /// A non-hex character inside a `<...>` data block.
    #[error("invalid data byte {found:?} at offset {offset}")]
    InvalidDataByte { found: char, offset: usize },

    /// Decoded string content is not valid UTF-8.
    #[error("invalid UTF-8 in input")]
    InvalidUtf8,

    /// The input is a binary property list, which this decoder does not handle.
    #[error("binary property lists are not supported")]
    UnsupportedFormat,

    /// Bytes remain after the root value.
    #[error("trailing content at offset {offset}")]
    TrailingContent { offset: usize },
}

/// Result type alias for plist operations.
pub type Result<T> = std::result::Result<T, PlistError>;
