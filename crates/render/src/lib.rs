//! Rendering of release histories as a plain text report or an RSS feed.

pub mod error;
mod render;
mod rss;
mod text;

pub use crate::render::{Format, render_rss, render_text};
use psfeed_extract::models as extract;
use psfeed_fetch::HardwareLine;

pub(crate) type Release = extract::Release;

/// Feed-level details shared by every entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub hardware: HardwareLine,
    /// Support page the releases were scraped from.
    pub link: String,
}
impl Channel {
    pub fn new(hardware: HardwareLine, link: impl Into<String>) -> Self {
        Self { hardware, link: link.into() }
    }
}
