//! Toolbox CLI
//!
//! Loads tool manifests into a registry and lists, searches or renders them.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose { "debug" } else { "warn" };
    if let Err(e) = toolbox_registry::logging::init(directive) {
        eprintln!("{}: cannot initialize logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Loading catalog from {:?}", cli.catalog);

    let Some(command) = cli.command else {
        println!("{} Toolbox CLI", "toolbox".green().bold());
        println!();
        println!("Run {} for available commands.", "toolbox --help".cyan());
        return Ok(());
    };

    let registry = context::load_registry(cli.config.as_deref(), &cli.catalog)?;

    match command {
        Commands::List { grouped, json } => commands::run_list(&registry, grouped, json),
        Commands::Search { keyword, json } => commands::run_search(&registry, &keyword, json),
        Commands::Render { id, events } => commands::run_render(&registry, &id, events),
    }
}
