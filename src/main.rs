//! taxtree CLI entry point

use std::process;

use clap::Parser;
use colored::Colorize;
use taxtree::cli::{Cli, Commands};
use taxtree::config::LOG_ENV;
use taxtree::TaxTreeError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr so they never mix with the printed trees
    let default_level = if cli.global.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        let exit_code = e
            .downcast_ref::<TaxTreeError>()
            .map(TaxTreeError::exit_code)
            .unwrap_or(1);
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List(args) => {
            taxtree::commands::list::run(args, &cli.global)?;
        }
    }
    Ok(())
}
