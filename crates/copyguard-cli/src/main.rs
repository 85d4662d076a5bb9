mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use copyguard_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load()?;

    match cli.command {
        cli::Commands::Scan {
            document,
            terms,
            all,
            track,
        } => commands::scan::handle(&config, &document, &terms, all, track).await,
        cli::Commands::Bridge { document } => commands::bridge::handle(&config, &document).await,
        cli::Commands::Memory(cmd) => commands::memory::handle(cmd, &config).await,
    }
}
