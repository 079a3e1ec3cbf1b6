//! Make Every Mile Count
//!
//! CLI and web API for per-mile driving cost

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::info;

use milecount::cli::{AccountCommands, Cli, Commands};
use milecount::commands;
use milecount::config::{AppConfig, Settings};
use milecount::utils::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let command = cli.get_command();

    if let Commands::Version = command {
        println!("{}", milecount::version_info());
        return Ok(());
    }

    // Environment settings first so logging is up before config loading
    let settings = Settings::new().context("Failed to load settings")?;
    init_logging(&settings.logging)?;

    let config = AppConfig::load_from(cli.config.as_deref())
        .context("Failed to load configuration")?;
    info!("Configuration loaded");

    match command {
        Commands::Serve => commands::serve::execute(settings, config).await,
        Commands::Calculate(args) => commands::calculate::execute(args, settings, config).await,
        Commands::Mpg(args) => commands::lookup::mpg(args, config).await,
        Commands::Price(args) => commands::lookup::price(args, config).await,
        Commands::Regions => commands::lookup::regions(),
        Commands::Account { action } => match action {
            AccountCommands::Register(args) => commands::account::register(args, config).await,
            AccountCommands::Vehicles(args) => commands::account::vehicles(args, config).await,
        },
        Commands::Version => Ok(()),
    }
}
