use crate::Release;
use psfeed_fetch::HardwareLine;
use std::fmt::Write;

/// Plain text report: a heading naming the hardware line, then one line per
/// release in the order given.
///
/// ```text
/// PS5 Updates:
/// - Tue Nov 14 22:13:20 UTC 2023: Version 24.02-01.00.00
/// ```
pub(crate) fn text(releases: &[Release], hardware: HardwareLine) -> String {
    let mut out = format!("{} Updates:\n", hardware.label());
    for release in releases {
        // Infallible: writing to a String.
        let _ = writeln!(out, "- {}: {}", release.date(), release.version());
    }
    out
}
