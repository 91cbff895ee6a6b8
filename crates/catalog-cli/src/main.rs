use anyhow::Context;
use clap::Parser;

use catalog_config::CatalogConfig;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("catalog error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    let mut config = CatalogConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(path) = &flags.db {
        config.store.path.clone_from(path);
    }
    init_tracing(&config, flags.quiet, flags.verbose)?;
    tracing::debug!(store = %config.store.path, fanout = ?config.hydration.fanout, "configuration loaded");

    commands::dispatch(cli.command, &config, &flags).await
}

fn init_tracing(config: &CatalogConfig, quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CATALOG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
