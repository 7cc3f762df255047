//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The page carries no metadata element with the given name.
    #[display("metadata not found: {_0}")]
    MetadataNotFound(#[error(not(source))] &'static str),
    /// No bold text in the page content mentions a version.
    #[display("unable to find the latest version in the page")]
    VersionNotFound,
    /// A field was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The offending value.
        value: String,
    },
    /// The values do not make a usable release (empty label, non-positive timestamp).
    #[display("invalid release: {_0}")]
    InvalidRelease(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The page either has the data or it doesn't; fetching the same
        // markup again won't change that.
        false
    }
}
