//! Command-line front end: configuration, logging and the fetch, record and
//! render pipeline.

pub mod cli;
pub mod error;
pub mod logging;
pub mod run;
pub mod settings;

use exn::ResultExt;
use psfeed_config::Config;

use crate::cli::Cli;
use crate::error::{ErrorKind, Result};
use crate::settings::Settings;

/// Loads configuration for the parsed command line and runs the pipeline.
pub async fn main(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.source(), &cli.overrides()).or_raise(|| ErrorKind::Config)?;
    let settings = Settings::resolve(config, cli.dry_run)?;
    tracing::debug!(?settings, "resolved settings");
    run::run(&settings).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_unsupported_hardware_makes_no_request() {
        let server = MockServer::start().await;
        let cli = Cli::parse_from(["psfeed", "--no-config", "--hardware", "ps3", "--base-url", &server.uri()]);
        let err = main(&cli).await.unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedInput);
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let cli = Cli::parse_from(["psfeed", "--config", "/nonexistent/psfeed.toml"]);
        let err = main(&cli).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Config);
    }
}
