//! Release extraction from the system software support page.

use std::convert::Infallible;
use std::str::FromStr;

use exn::{OptionExt, ResultExt};
use scraper::Html;
use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};
use crate::models::Release;
use crate::{consts, date};

/// Holds a parsed support page and runs the release heuristics against it.
///
/// The page has no structured API for this data, so both fields are scraped
/// with loose heuristics. Note the asymmetric tie-breaks: the publish date
/// takes the *last* matching `<meta>` element, the version takes the *first*
/// matching bold run.
#[derive(Debug)]
pub struct Extractor {
    document: Html,
}
impl Extractor {
    pub fn from_document(document: Html) -> Self {
        Self { document }
    }

    pub fn from_html(html: &str) -> Self {
        Self::from_document(Html::parse_document(html))
    }

    /// Extracts the full release: publish date first, then the version label.
    ///
    /// # Errors
    ///
    /// Fails with the error of the first extraction step that fails; a partial
    /// release is never returned.
    #[instrument(skip(self))]
    pub fn release(&self) -> Result<Release> {
        let (timestamp, date) = self.publish_date()?;
        let version = self.latest_version()?;
        Release::from_parts(timestamp, date, version)
    }

    /// Reads the `publish_date_timestamp` metadata as epoch seconds, returning
    /// it with its [`UNIX_DATE`](crate::UNIX_DATE) rendering.
    ///
    /// Every `<meta>` element is scanned; when the name appears more than once
    /// the last occurrence in document order wins.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::MetadataNotFound`] when no element carries the name.
    /// - [`ErrorKind::ParseError`] when its content is not a positive integer.
    #[instrument(level = "trace", skip(self))]
    pub fn publish_date(&self) -> Result<(i64, String)> {
        let content = self
            .document
            .select(&consts::META_SELECTOR)
            .filter(|meta| meta.value().attr("name") == Some(consts::PUBLISH_DATE_KEY))
            .last()
            .ok_or_raise(|| ErrorKind::MetadataNotFound(consts::PUBLISH_DATE_KEY))?
            .value()
            .attr("content")
            .unwrap_or_default()
            .trim();
        let timestamp = content.parse::<i64>().or_raise(|| ErrorKind::ParseError {
            field: consts::PUBLISH_DATE_KEY,
            value: content.to_string(),
        })?;
        let published_at = date::published_at(timestamp).or_raise(|| ErrorKind::ParseError {
            field: consts::PUBLISH_DATE_KEY,
            value: content.to_string(),
        })?;
        Ok((timestamp, date::format_date(published_at)?))
    }

    /// Finds the first bold run in the page content mentioning "version"
    /// (case-insensitive) and returns it trimmed.
    ///
    /// The page lists the current release first, so the scan stops at the
    /// first match; older releases further down never overwrite it.
    #[instrument(level = "trace", skip(self))]
    pub fn latest_version(&self) -> Result<String> {
        self.document
            .select(&consts::VERSION_SELECTOR)
            .map(|bold| bold.text().collect::<String>())
            .find(|text| consts::VERSION_REGEX.is_match(text))
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_raise(|| ErrorKind::VersionNotFound)
    }
}
impl FromStr for Extractor {
    type Err = Infallible;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_html(s))
    }
}
impl From<Html> for Extractor {
    fn from(document: Html) -> Self {
        Self::from_document(document)
    }
}

impl TryFrom<Extractor> for Release {
    type Error = Error;
    fn try_from(extractor: Extractor) -> Result<Self> {
        extractor.release()
    }
}
