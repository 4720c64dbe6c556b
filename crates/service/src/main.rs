//! Universal Motor Controller daemon (umcd).

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use umc_config::Config;

#[derive(Debug, Parser)]
#[command(name = "umcd", version, about = "Universal Motor Controller daemon")]
struct Cli {
    /// Path to the JSON configuration document.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("umc=info,info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    if cli.check {
        info!(path = %cli.config.display(), "configuration is valid");
        return Ok(());
    }

    info!(version = env!("CARGO_PKG_VERSION"), "starting umcd");
    umc_service::daemon::run(config).await
}
