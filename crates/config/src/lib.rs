//! Layered configuration.
//!
//! Values are merged in order, later layers winning:
//!
//! 1. built-in defaults,
//! 2. a configuration file (TOML, YAML or JSON, chosen by extension),
//! 3. `PSFEED_*` environment variables (e.g. `PSFEED_HARDWARE=ps4`),
//! 4. command-line overrides.
//!
//! Values are kept as plain strings here; turning them into hardware lines,
//! locales and formats (and rejecting unsupported ones) is up to the caller.

pub mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

pub const ENV_PREFIX: &str = "PSFEED_";
pub const CONFIG_FILE_NAME: &str = "psfeed.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hardware line to check, `ps4` or `ps5`.
    pub hardware: String,
    /// Locale of the support site to scrape; English locales work best.
    pub locale: String,
    /// SQLite file recording every release seen so far. Without it only the
    /// live release is reported.
    pub database: Option<PathBuf>,
    /// `text` or `rss`.
    pub format: String,
    /// Output file; standard output when absent.
    pub output: Option<PathBuf>,
    /// Alternative host serving the support pages.
    pub base_url: Option<String>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            hardware: "ps5".to_string(),
            locale: "en-us".to_string(),
            database: None,
            format: "text".to_string(),
            output: None,
            base_url: None,
        }
    }
}

/// Command-line values; unset fields leave lower layers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Where to look for a configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The platform configuration directory; skipped if the file is absent.
    Default,
    /// A file the user asked for; it must exist.
    Explicit(PathBuf),
    /// No configuration file at all.
    None,
}

impl Config {
    /// Platform-specific default location, e.g. `~/.config/psfeed/psfeed.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "psfeed").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Builds the layered [`Figment`] without extracting it.
    pub fn figment(source: &Source, overrides: &Overrides) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        let file = match source {
            Source::Default => Self::default_path().filter(|path| path.is_file()),
            Source::Explicit(path) if !path.is_file() => exn::bail!(ErrorKind::MissingFile(path.clone())),
            Source::Explicit(path) => Some(path.clone()),
            Source::None => None,
        };
        if let Some(path) = file {
            tracing::debug!(path = %path.display(), "loading configuration file");
            figment = Self::merge_file(figment, &path)?;
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)).merge(Serialized::defaults(overrides)))
    }

    fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
        let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase);
        Ok(match extension.as_deref() {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => exn::bail!(ErrorKind::UnsupportedFile(path.to_path_buf())),
        })
    }

    /// Loads the merged configuration.
    #[instrument(skip(overrides))]
    pub fn load(source: &Source, overrides: &Overrides) -> Result<Self> {
        Self::figment(source, overrides)?.extract().or_raise(|| ErrorKind::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load(&Source::None, &Overrides::default()).unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.hardware, "ps5");
            assert_eq!(config.locale, "en-us");
            assert_eq!(config.format, "text");
            Ok(())
        });
    }

    #[rstest]
    #[case("psfeed.toml", "hardware = \"ps4\"\ndatabase = \"releases.db\"\n")]
    #[case("psfeed.yaml", "hardware: ps4\ndatabase: releases.db\n")]
    #[case("psfeed.json", r#"{"hardware": "ps4", "database": "releases.db"}"#)]
    fn test_reads_files(#[case] name: &str, #[case] contents: &str) {
        Jail::expect_with(|jail| {
            jail.create_file(name, contents)?;
            let path = jail.directory().join(name);
            let config = Config::load(&Source::Explicit(path), &Overrides::default()).unwrap();
            assert_eq!(config.hardware, "ps4");
            assert_eq!(config.database, Some(PathBuf::from("releases.db")));
            assert_eq!(config.locale, "en-us");
            Ok(())
        });
    }

    #[test]
    fn test_layers_override_in_order() {
        Jail::expect_with(|jail| {
            jail.create_file("psfeed.toml", "hardware = \"ps4\"\nformat = \"rss\"\nlocale = \"en-gb\"\n")?;
            jail.set_env("PSFEED_FORMAT", "text");
            jail.set_env("PSFEED_LOCALE", "en-au");
            let overrides = Overrides {
                locale: Some("fr-fr".to_string()),
                ..Overrides::default()
            };
            let path = jail.directory().join("psfeed.toml");
            let config = Config::load(&Source::Explicit(path), &overrides).unwrap();
            assert_eq!(config.hardware, "ps4"); // file
            assert_eq!(config.format, "text"); // env
            assert_eq!(config.locale, "fr-fr"); // flag
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("nope.toml");
            let err = Config::load(&Source::Explicit(path.clone()), &Overrides::default()).unwrap_err();
            assert_eq!(*err, ErrorKind::MissingFile(path));
            Ok(())
        });
    }

    #[test]
    fn test_unsupported_file_type() {
        Jail::expect_with(|jail| {
            jail.create_file("psfeed.ini", "hardware=ps4")?;
            let path = jail.directory().join("psfeed.ini");
            let err = Config::load(&Source::Explicit(path.clone()), &Overrides::default()).unwrap_err();
            assert_eq!(*err, ErrorKind::UnsupportedFile(path));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values() {
        Jail::expect_with(|jail| {
            jail.create_file("psfeed.toml", "hardware = [\"ps4\", \"ps5\"]\n")?;
            let path = jail.directory().join("psfeed.toml");
            let err = Config::load(&Source::Explicit(path), &Overrides::default()).unwrap_err();
            assert_eq!(*err, ErrorKind::Invalid);
            Ok(())
        });
    }

    #[test]
    fn test_default_path_names_the_file() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }
}
