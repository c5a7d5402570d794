//! sandpen - A live HTML/CSS/JS playground for the terminal.

mod actor;
mod bridge;
mod cli;
mod compose;
mod config;
mod console;
mod controller;
mod core;
mod embed;
mod logger;
mod persist;
mod platform;
mod project;
mod reload;
mod workspace;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{PenConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = init_config(PenConfig::load(&cli)?);
    debug!("config"; "workspace {}", config.workspace().display());

    match &cli.command {
        Commands::Init { force } => cli::init::init_workspace(&config, *force),
        Commands::Serve { share, .. } => {
            let bound_server = cli::serve::bind_server()?;
            debug!("serve"; "bound {}", bound_server.addr());
            bound_server.run(share.clone())
        }
        Commands::Compose { output } => {
            cli::compose::compose_workspace(&config, output.as_deref())
        }
        Commands::Share { base } => cli::share::print_share_link(&config, base.as_deref()),
        Commands::Open { link } => cli::open::open_link(&config, link),
    }
}
