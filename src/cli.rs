use clap::{ArgAction, Parser};
use psfeed_config::{Overrides, Source};
use std::path::PathBuf;

/// Check the latest console system software release and report it as plain
/// text or as an RSS feed.
#[derive(Debug, Parser)]
#[command(name = "psfeed", version, about)]
pub struct Cli {
    /// Hardware to get the information for: "ps4" or "ps5" [default: ps5]
    #[arg(long)]
    pub hardware: Option<String>,
    /// Localisation of the support site to use, e.g. "en-us". For best results
    /// use an English locale: "en-XX" [default: en-us]
    #[arg(long, alias = "local")]
    pub locale: Option<String>,
    /// Path to the SQLite database to record releases into
    #[arg(long = "db", value_name = "PATH")]
    pub database: Option<PathBuf>,
    /// Output format: "text" for plain text, "rss" for an RSS feed [default: text]
    #[arg(long)]
    pub format: Option<String>,
    /// Output file path [default: standard output]
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Configuration file (toml, yaml or json)
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,
    /// Ignore configuration files
    #[arg(long)]
    pub no_config: bool,
    /// Alternative host serving the support pages
    #[arg(long, value_name = "URL", hide = true)]
    pub base_url: Option<String>,
    /// Report what would be recorded without writing to the database
    #[arg(long)]
    pub dry_run: bool,
    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    pub quiet: bool,
}
impl Cli {
    pub fn source(&self) -> Source {
        match (&self.config, self.no_config) {
            (_, true) => Source::None,
            (Some(path), false) => Source::Explicit(path.clone()),
            (None, false) => Source::Default,
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            hardware: self.hardware.clone(),
            locale: self.locale.clone(),
            database: self.database.clone(),
            format: self.format.clone(),
            output: self.output.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_flags() {
        let cli = Cli::parse_from(["psfeed", "--hardware", "ps4", "--db", "releases.db", "--format", "rss", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.source(), Source::Default);
        let overrides = cli.overrides();
        assert_eq!(overrides.hardware.as_deref(), Some("ps4"));
        assert_eq!(overrides.database, Some(PathBuf::from("releases.db")));
        assert_eq!(overrides.format.as_deref(), Some("rss"));
        assert_eq!(overrides.locale, None);
    }

    #[test]
    fn test_config_sources() {
        let cli = Cli::parse_from(["psfeed", "--config", "psfeed.yaml"]);
        assert_eq!(cli.source(), Source::Explicit(PathBuf::from("psfeed.yaml")));
        let cli = Cli::parse_from(["psfeed", "--no-config"]);
        assert_eq!(cli.source(), Source::None);
        assert!(Cli::try_parse_from(["psfeed", "--no-config", "--config", "a.toml"]).is_err());
    }

    #[test]
    fn test_legacy_locale_flag() {
        let cli = Cli::parse_from(["psfeed", "--local", "en-gb"]);
        assert_eq!(cli.locale.as_deref(), Some("en-gb"));
    }
}
