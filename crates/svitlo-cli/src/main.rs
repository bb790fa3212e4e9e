mod commands;
mod report;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "svitlo")]
#[command(about = "Power-outage status checker for DTEK addresses")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the configured addresses.
    List,
    /// Check one address by its key.
    Check {
        /// Address key from the addresses file (e.g. "home").
        key: String,
    },
    /// Check every configured address concurrently.
    CheckAll,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = svitlo_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let book = svitlo_core::load_addresses(&config.addresses_path)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::List => commands::run_list(&book),
        Commands::Check { key } => commands::run_check(&config, &book, &key).await,
        Commands::CheckAll => commands::run_check_all(&config, &book).await,
    }
}
