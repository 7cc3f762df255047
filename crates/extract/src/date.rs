//! Fixed human-readable date layout for release timestamps.
//!
//! Timestamps are always rendered in UTC so that the same release produces
//! the same string on every host; the string ends up in the record store and
//! in feed GUIDs, so it must never drift.

use exn::ResultExt;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{PrimitiveDateTime, UtcDateTime};

use crate::error::{ErrorKind, Result};

/// Unix `date`-style layout, e.g. `Tue Nov 14 22:13:20 UTC 2023`.
pub const UNIX_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] UTC [year]"
);

/// Converts epoch seconds into a [`UtcDateTime`], rejecting anything at or
/// before the epoch.
pub fn published_at(timestamp: i64) -> Result<UtcDateTime> {
    if timestamp <= 0 {
        exn::bail!(ErrorKind::InvalidRelease("timestamp must be positive"));
    }
    UtcDateTime::from_unix_timestamp(timestamp).or_raise(|| ErrorKind::ParseError {
        field: "timestamp",
        value: timestamp.to_string(),
    })
}

/// Renders a point in time with the [`UNIX_DATE`] layout.
pub fn format_date(datetime: UtcDateTime) -> Result<String> {
    datetime.format(UNIX_DATE).or_raise(|| ErrorKind::ParseError {
        field: "date",
        value: datetime.unix_timestamp().to_string(),
    })
}

/// Parses a [`UNIX_DATE`] string back into epoch seconds.
pub fn parse_date(date: &str) -> Result<i64> {
    let parsed = PrimitiveDateTime::parse(date, UNIX_DATE).or_raise(|| ErrorKind::ParseError {
        field: "date",
        value: date.to_string(),
    })?;
    Ok(parsed.assume_utc().unix_timestamp())
}
