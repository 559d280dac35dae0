//! Error types for pmstd library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pmstd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that stop processing of a document.
///
/// Block-level problems are reported through [`SectionError`] instead and
/// never abort a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A profile or normalizer pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The conversion collaborator could not produce text for a document.
    #[error("Conversion of '{path}' failed: {reason}")]
    Conversion { path: PathBuf, reason: String },

    /// No converter handles the input, or the input is not what it claims to be.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Error during JSON rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a conversion error for the given source path.
    pub fn conversion(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Conversion {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Reason a single block was skipped during classification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// The header is nothing but marker characters and whitespace.
    #[error("header '{0}' has no title text")]
    EmptyTitle(String),

    /// The header does not start with the structural marker.
    #[error("header '{header}' does not start with '{marker}'")]
    MissingMarker { header: String, marker: char },
}
