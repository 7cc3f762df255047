//! Application Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. The error tree of each library crate
//! is kept as the children of these kinds.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("unable to load configuration")]
    Config,
    /// Unknown hardware line, locale or output format. Raised before any
    /// network activity.
    #[display("unsupported input")]
    UnsupportedInput,
    #[display("unable to get the latest release")]
    Fetch,
    #[display("unable to access the release database")]
    Store,
    #[display("unable to render the releases")]
    Render,
    #[display("unable to write to standard output")]
    Stdout,
    #[display("unable to write output file: {}", _0.display())]
    Output(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
