//! Single-shot download of the support page.

use std::time::Duration;

use exn::ResultExt;
use psfeed_extract::Extractor;
use psfeed_extract::models::Release;
use reqwest::StatusCode;
use reqwest::redirect::Policy;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::{HardwareLine, Locale};

/// Vendor host serving the support pages.
pub const DEFAULT_BASE_URL: &str = "https://www.playstation.com";
const TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 10;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds the system software support page URL for a hardware line.
///
/// ```rust
/// use psfeed_fetch::{HardwareLine, Locale, support_url};
/// let url = support_url("https://www.playstation.com", HardwareLine::Ps5, &Locale::default());
/// assert_eq!(url, "https://www.playstation.com/en-us/support/hardware/ps5/system-software/");
/// ```
pub fn support_url(base_url: &str, hardware: HardwareLine, locale: &Locale) -> String {
    format!(
        "{}/{}/support/hardware/{}/system-software/",
        base_url.trim_end_matches('/'),
        locale.as_str().to_lowercase(),
        hardware.as_str().to_lowercase(),
    )
}

/// HTTP client for the support site.
///
/// One request per run, no retries: any transport failure or unexpected
/// status is returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    base_url: String,
}
impl Fetcher {
    /// Fetcher pointed at the public vendor site.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Fetcher pointed at another host with the same path layout (a mirror,
    /// or a mock server in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .or_raise(|| ErrorKind::Transport)?;
        Ok(Self { client, base_url: base_url.into() })
    }

    /// Support page URL for the given hardware line and locale on this host.
    pub fn url(&self, hardware: HardwareLine, locale: &Locale) -> String {
        support_url(&self.base_url, hardware, locale)
    }

    /// Downloads a page and returns its body.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Transport`] when the request or the body download fails.
    /// - [`ErrorKind::Status`] for any status other than `200 OK`.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.or_raise(|| ErrorKind::Transport)?;
        let status = response.status();
        if status != StatusCode::OK {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }
        let body = response.text().await.or_raise(|| ErrorKind::Transport)?;
        tracing::debug!(bytes = body.len(), "downloaded support page");
        Ok(body)
    }

    /// Fetches the support page for a hardware line and scrapes the latest
    /// release from it.
    ///
    /// # Errors
    ///
    /// Fetch errors as per [`fetch_page`](Self::fetch_page); extraction
    /// failures surface as [`ErrorKind::Extract`] carrying the extractor's
    /// error kind.
    #[instrument(skip(self), fields(%hardware, %locale))]
    pub async fn latest_release(&self, hardware: HardwareLine, locale: &Locale) -> Result<Release> {
        let html = self.fetch_page(&self.url(hardware, locale)).await?;
        match Extractor::from_html(&html).release() {
            Ok(release) => {
                tracing::info!(version = release.version(), date = release.date(), "found latest release");
                Ok(release)
            },
            Err(err) => {
                let kind = (*err).clone();
                Err(err).or_raise(|| ErrorKind::Extract(kind.clone()))
            },
        }
    }
}
