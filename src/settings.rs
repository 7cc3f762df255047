use std::path::PathBuf;

use exn::ResultExt;
use psfeed_config::Config;
use psfeed_fetch::{HardwareLine, Locale};
use psfeed_render::Format;

use crate::error::{ErrorKind, Result};

/// Validated run settings.
///
/// Every string value of the merged [`Config`] is parsed here, so that an
/// unsupported hardware line, locale or format is rejected before anything
/// touches the network or the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub hardware: HardwareLine,
    pub locale: Locale,
    pub format: Format,
    pub database: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
    pub dry_run: bool,
}
impl Settings {
    pub fn resolve(config: Config, dry_run: bool) -> Result<Self> {
        Ok(Self {
            hardware: config.hardware.parse::<HardwareLine>().or_raise(|| ErrorKind::UnsupportedInput)?,
            locale: config.locale.parse::<Locale>().or_raise(|| ErrorKind::UnsupportedInput)?,
            format: config.format.parse::<Format>().or_raise(|| ErrorKind::UnsupportedInput)?,
            database: config.database.filter(|path| !path.as_os_str().is_empty()),
            output: config.output.filter(|path| !path.as_os_str().is_empty()),
            base_url: config.base_url.filter(|url| !url.trim().is_empty()),
            dry_run,
        })
    }
}
