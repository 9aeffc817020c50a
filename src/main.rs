use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use send_email::cli::Cli;
use send_email::mail::install_crypto_provider;
use send_email::pipeline;

fn main() -> ExitCode {
    // Install rustls crypto provider before any TLS usage
    install_crypto_provider();

    // Every log line, the success notice included, goes to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let request = cli.into_request().context("Invalid arguments")?;
    let delivered = pipeline::run(request).context("Could not prepare email")?;
    Ok(delivered)
}
