use crate::error::{Error, ErrorKind, Result};
use crate::{Channel, Release, rss, text};
use exn::ResultExt;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::instrument;

/// Output formats for a release history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Rss,
}
impl Format {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Rss => "rss",
        }
    }

    /// Renders the releases in this format and writes the result.
    pub fn render(&self, releases: &[Release], channel: &Channel, writer: impl Write) -> Result<()> {
        match self {
            Self::Text => render_text(releases, channel, writer),
            Self::Rss => render_rss(releases, channel, writer),
        }
    }
}
impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for Format {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "rss" => Ok(Self::Rss),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(s.trim().to_string())),
        }
    }
}

/// Writes the plain text report.
#[instrument(skip_all, fields(hardware = %channel.hardware, count = releases.len()))]
pub fn render_text(releases: &[Release], channel: &Channel, writer: impl Write) -> Result<()> {
    write_all(writer, text::text(releases, channel.hardware))
}

/// Writes the RSS 2.0 document.
///
/// The document is rendered completely before anything is written, so a
/// template failure leaves the writer untouched.
#[instrument(skip_all, fields(hardware = %channel.hardware, count = releases.len()))]
pub fn render_rss(releases: &[Release], channel: &Channel, writer: impl Write) -> Result<()> {
    write_all(writer, rss::rss(releases, channel)?)
}

fn write_all(mut writer: impl Write, document: String) -> Result<()> {
    writer.write_all(document.as_bytes()).or_raise(|| ErrorKind::Io)?;
    writer.flush().or_raise(|| ErrorKind::Io)
}
