use anyhow::{Context, Result};
use clap::Parser;
use pet_store_common::config::PetStorageConfig;
use pet_store_service::PetService;
use tracing::{info, warn};

mod cli_config;
mod commands;

use cli_config::CliConfig;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "pet_store", version, about = "Manage stored pets")]
struct Cli {
    /// Configuration file to use instead of ./pet_store.{toml,yaml,json}
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => CliConfig::load_from_file(path),
        None => CliConfig::load(),
    }
    .context("Failed to load configuration")?;
    info!(storage = ?config.storage, "Loaded configuration");
    if config.storage == PetStorageConfig::InMemory {
        warn!("In-memory storage is discarded when the command exits");
    }

    let storage = config
        .storage
        .build_pet_storage()
        .context("Failed to initialize pet storage")?;
    let mut service = PetService::new(storage);

    let output = cli.command.run(&mut service).context("Command failed")?;
    println!("{}", output);

    Ok(())
}
