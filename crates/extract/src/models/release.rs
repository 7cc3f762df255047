use crate::date;
use crate::error::{ErrorKind, Result};
use time::UtcDateTime;

/// A system software release as announced on the vendor support page.
///
/// Two releases are the *same release* when their version labels are equal;
/// the publish date is informational and may change if the vendor
/// re-publishes the page. Construction validates that the label is non-empty
/// and the timestamp is after the epoch, so every `Release` in circulation is
/// safe to persist and render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    published_at: UtcDateTime,
    date: String,
    version: String,
}
impl AsRef<Release> for Release {
    fn as_ref(&self) -> &Release {
        self
    }
}
impl Release {
    /// Builds a release from a publish timestamp and a version label, deriving
    /// the human-readable date.
    pub fn new(timestamp: i64, version: impl AsRef<str>) -> Result<Self> {
        let published_at = date::published_at(timestamp)?;
        Self::validated(published_at, date::format_date(published_at)?, version)
    }

    /// Rebuilds a release from previously stored parts. The stored date string
    /// is kept verbatim.
    pub fn from_parts(timestamp: i64, date: impl Into<String>, version: impl AsRef<str>) -> Result<Self> {
        let date = date.into();
        if date.trim().is_empty() {
            exn::bail!(ErrorKind::InvalidRelease("date must not be empty"));
        }
        Self::validated(date::published_at(timestamp)?, date, version)
    }

    fn validated(published_at: UtcDateTime, date: String, version: impl AsRef<str>) -> Result<Self> {
        let version = version.as_ref().trim();
        if version.is_empty() {
            exn::bail!(ErrorKind::InvalidRelease("version must not be empty"));
        }
        Ok(Self { published_at, date, version: version.to_string() })
    }

    /// Seconds since the epoch; the ordering key.
    pub fn timestamp(&self) -> i64 {
        self.published_at.unix_timestamp()
    }

    pub fn published_at(&self) -> UtcDateTime {
        self.published_at
    }

    /// Human-readable publish date, see [`UNIX_DATE`](crate::UNIX_DATE).
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Version label, e.g. `"Version 24.02-01.00.00"`. This is the dedup key.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Stable identifier for feed entries: BLAKE3 of the date followed by the
    /// version label, hex encoded.
    pub fn guid(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.date.as_bytes());
        hasher.update(self.version.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    /// Whether `other` describes the same release (same version label).
    pub fn is_same_release(&self, other: &Release) -> bool {
        self.version == other.version
    }
}
