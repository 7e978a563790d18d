//! `stash-pulls` CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use stash_pulls::{
    HttpTransport, HttpTransportConfig, PullRequestService, StashConfig, StashError,
};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StashError> {
    let config = load_config()?;

    let transport_config =
        HttpTransportConfig::new(config.require_server_url()?, config.resolve_token())
            .with_timeout(config.timeout());
    let service = PullRequestService::new(HttpTransport::new(transport_config)?);

    let mut stdout = io::stdout().lock();
    cli::run(&config, &service, &mut stdout).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`StashError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<StashConfig, StashError> {
    StashConfig::load().map_err(|error| StashError::Configuration {
        message: error.to_string(),
    })
}
