use std::process::ExitCode;

use clap::Parser;
use psfeed::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    psfeed::logging::init(cli.verbose, cli.quiet);
    match psfeed::main(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        },
    }
}
