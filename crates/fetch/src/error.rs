//! Fetch Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use psfeed_extract::error::ErrorKind as ExtractErrorKind;

/// A fetch error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A hardware line, locale or similar value supplied by the user is not
    /// supported. Reported before any network activity.
    #[display("unsupported input: {_0}")]
    UnsupportedInput(#[error(not(source))] String),
    /// DNS, connection, TLS or timeout failure while talking to the vendor.
    #[display("unable to reach the support page")]
    Transport,
    /// The vendor answered with something other than `200 OK`.
    #[display("unable to fetch the update page, status code: {_0}")]
    Status(#[error(not(source))] u16),
    /// The page was fetched but the release could not be scraped from it.
    #[display("unable to extract the latest release: {_0}")]
    Extract(#[error(not(source))] ExtractErrorKind),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // No retry policy exists; every failure is fatal to the run.
        false
    }
}
