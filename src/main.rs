//! legacy-redirect - send readers of an old docs/blog site to its new home.

mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod redirect;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, EmitCommand};
use config::{RedirectConfig, TableHandle};
use std::sync::Arc;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = RedirectConfig::load(cli)?;
    config.validate()?;

    match &cli.command {
        Commands::Presets => cli::check::run_presets(),
        Commands::Check => cli::check::run_check(&config),
        Commands::Resolve { args } => cli::resolve::run_resolve(args, &config.checked_table()?),
        Commands::Emit { target } => {
            let table = config.checked_table()?;
            match target {
                EmitCommand::Script { output } => {
                    cli::emit::emit_script(&table, output.as_deref())
                }
                EmitCommand::Pages { paths, output } => {
                    cli::emit::run_emit_pages(&table, paths, output)
                }
            }
        }
        Commands::Serve { .. } => {
            let tables = Arc::new(TableHandle::new(&config, config.checked_table()?));
            cli::serve::serve(&config, tables)
        }
    }
}
