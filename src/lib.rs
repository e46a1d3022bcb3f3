//! timeclock-admin library root.
//! Exposes the CLI parser, the high-level run() function, and the core
//! modules: event store, hours calculator, synced dataset, synchronizer.

pub mod cache;
pub mod calc;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod sync;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Employee { cmd } => cli::commands::employee::handle(cmd, cfg),
        Commands::Group { cmd } => cli::commands::group::handle(cmd, cfg),
        Commands::Special { cmd } => cli::commands::special::handle(cmd, cfg),
        Commands::Record { cmd } => cli::commands::record::handle(cmd, cfg),
        Commands::Calc { cmd } => cli::commands::calc::handle(cmd, cfg),
        Commands::Sync { cmd } => cli::commands::sync::handle(cmd, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let cfg = Config::load(cli.config.as_deref())?;

    dispatch(&cli, &cfg)
}
