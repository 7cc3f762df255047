//! Hardware lines and locales understood by the support site.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, ErrorKind};

static LOCALE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(?:-[a-z]{2,4})?$").unwrap());

/// A console family with a system software support page.
///
/// This is a closed allow-list: the lower-case identifier is used both as a
/// URL segment and as a table name in the record store, so nothing outside
/// this enum may ever reach either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HardwareLine {
    Ps4,
    Ps5,
}
impl HardwareLine {
    pub const ALL: [HardwareLine; 2] = [HardwareLine::Ps4, HardwareLine::Ps5];

    /// Lower-case identifier, e.g. `"ps5"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ps4 => "ps4",
            Self::Ps5 => "ps5",
        }
    }

    /// Upper-case label for headings, e.g. `"PS5"`.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ps4 => "PS4",
            Self::Ps5 => "PS5",
        }
    }
}
impl fmt::Display for HardwareLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
impl FromStr for HardwareLine {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL.into_iter().find(|hardware| hardware.as_str().eq_ignore_ascii_case(wanted)).ok_or_else(|| {
            Error::from(ErrorKind::UnsupportedInput(format!(
                "hardware line \"{wanted}\" (expected one of: ps4, ps5)"
            )))
        })
    }
}

/// Region/language code selecting the localized support page, e.g. `en-us`.
///
/// Always lower-case. English locales give the best results since the version
/// heuristic looks for the word "version".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);
impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl Default for Locale {
    fn default() -> Self {
        Self("en-us".to_string())
    }
}
impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
impl FromStr for Locale {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let locale = s.trim().to_lowercase();
        if !LOCALE_REGEX.is_match(&locale) {
            exn::bail!(ErrorKind::UnsupportedInput(format!("locale \"{}\"", s.trim())));
        }
        Ok(Self(locale))
    }
}
