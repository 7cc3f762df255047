mod consts;
mod date;
pub mod error;
mod extract;
pub mod models;

use tracing::instrument;

pub use crate::date::{UNIX_DATE, format_date, parse_date, published_at};
use crate::error::Result;
pub use crate::extract::Extractor;
use crate::models::Release;

/// Easy, top-level entrypoint for the extraction of a [`Release`] from the raw
/// bytes of a support page.
///
/// Accepts raw bytes, instead of requiring HTML to be valid UTF-8. Invalid byte
/// sequences are replaced with U+FFFD before parsing. See [`Extractor`] for
/// the heuristics involved.
#[instrument(skip(html), fields(html_size = html.as_ref().len()))]
pub fn extract(html: impl AsRef<[u8]>) -> Result<Release> {
    let html = String::from_utf8_lossy(html.as_ref());
    Extractor::from_html(&html).release()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn page(version: &[u8]) -> Vec<u8> {
        let mut html = br#"<html><head><meta name="publish_date_timestamp" content="1700000000"></head><body>
            <div><div class="accordion"><div><div class="parbase textblock"><div><p><b>"#
            .to_vec();
        html.extend_from_slice(version);
        html.extend_from_slice(b"</b></p></div></div></div></div></div></body></html>");
        html
    }

    #[test]
    fn test_extract_tolerates_invalid_utf8() {
        let release = extract(page(b"Version 24.02-01.00.00 caf\xe9")).unwrap();
        assert_eq!(release.timestamp(), 1_700_000_000);
        assert_eq!(release.version(), "Version 24.02-01.00.00 caf\u{FFFD}");
    }

    #[test]
    fn test_extract_empty_document() {
        let err = extract(b"").unwrap_err();
        assert!(matches!(&*err, ErrorKind::MetadataNotFound(_)));
    }
}
