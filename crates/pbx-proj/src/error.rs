//! Error types for project document operations.

use std::path::PathBuf;

use pbx_plist::PlistError;
use thiserror::Error;

/// Errors that can occur while opening, resolving, or saving a project
/// document.
#[derive(Debug, Error)]
pub enum ProjError {
    /// No project directory was given.
    #[error("project path is empty")]
    EmptyPath,

    /// The project file does not exist or cannot be opened.
    #[error("project file {path} is not readable")]
    Unreadable { path: PathBuf },

    /// The project file path cannot be resolved to a real location.
    #[error("project file {path} is not resolvable")]
    Unresolvable { path: PathBuf },

    /// The deserialized root value is not a dictionary.
    #[error("project file is not a dictionary")]
    NotADictionary,

    /// A required top-level key is missing or has the wrong type.
    #[error("project file is not parseable (no {key})")]
    MissingKey { key: &'static str },

    /// An entry in the objects map is not a dictionary.
    #[error("object {uuid} is not a dictionary")]
    MalformedObject { uuid: String },

    /// A reference that must resolve did not.
    #[error("unable to resolve required reference {key} of object {uuid}")]
    UnresolvedReference { uuid: String, key: &'static str },

    /// String content handed to the writer is not valid UTF-8.
    #[error("string is not valid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },

    /// A value kind the writer cannot represent in this dialect.
    #[error("cannot encode value of kind {kind}")]
    UnsupportedValue { kind: &'static str },

    /// Underlying plist decode failure.
    #[error(transparent)]
    Plist(#[from] PlistError),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for project operations.
pub type Result<T> = std::result::Result<T, ProjError>;
