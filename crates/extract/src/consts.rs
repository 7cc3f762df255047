use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Name of the `<meta>` element carrying the page publish date (epoch seconds).
pub(crate) const PUBLISH_DATE_KEY: &str = "publish_date_timestamp";

selector!(META_SELECTOR, "meta[name]");
// Bold runs inside the accordion text blocks of the support page body. Loose
// on purpose: the vendor shuffles wrapper elements around between redesigns.
selector!(VERSION_SELECTOR, "div .accordion div .parbase.textblock div p b");
regex!(VERSION_REGEX, r"(?i)version");
