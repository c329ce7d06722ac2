//! CraftSwap CLI
//!
//! Thin front end over the `cswcore` collaborator interface: argument
//! parsing, log setup and human-readable output live here, nothing else.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use cswcore::Settings;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    if cli.verbose {
        tracing::debug!("verbose logging enabled");
    }

    let mut settings = Settings::load().context("failed to initialize configuration")?;

    match cli.command {
        Commands::Create { name } => commands::run_create(&settings, &name),
        Commands::Switch { name } => commands::run_switch(&settings, &name),
        Commands::List => commands::run_list(&settings),
        Commands::Info { name } => commands::run_info(&settings, &name),
        Commands::Restore => commands::run_restore(&settings),
        Commands::Delete { name, yes } => commands::run_delete(&settings, &name, yes),
        Commands::Config { key, value } => {
            commands::run_config(&mut settings, &key, value.as_deref())
        }
    }
}
