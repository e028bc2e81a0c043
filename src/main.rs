use anyhow::Context;
use clap::Parser;
use listing_desk::cli::{self, Cli};
use listing_desk::config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;
    debug!("Using backend at {}", config.api.base_url);

    cli::run(cli, config).await
}
