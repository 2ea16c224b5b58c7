//! Keel CLI - Bank statement importer
//!
//! Usage:
//!   keel import --file export.csv --account 3    Import an export
//!   keel inspect --file export.xlsx              Show detected format/columns

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Import {
            file,
            account,
            spreadsheet,
            known_hashes,
            output,
        } => commands::cmd_import(
            &file,
            account,
            spreadsheet,
            known_hashes.as_deref(),
            output.as_deref(),
        ),
        Commands::Inspect { file, spreadsheet } => commands::cmd_inspect(&file, spreadsheet),
    }
}
