//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keel - Import and normalize bank statements
#[derive(Parser)]
#[command(name = "keel")]
#[command(about = "Bank-statement ingestion for personal budgeting", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import transactions from a CSV or spreadsheet export
    Import {
        /// File to import
        #[arg(short, long)]
        file: PathBuf,

        /// Account id to assign to imported transactions
        #[arg(short, long, default_value_t = 1)]
        account: i64,

        /// Treat the file as a spreadsheet (auto-detected from the extension)
        #[arg(long)]
        spreadsheet: bool,

        /// File of known import hashes, one per line; matching transactions
        /// are skipped as duplicates
        #[arg(long)]
        known_hashes: Option<PathBuf>,

        /// Write accepted transactions as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the detected format and columns of an export without importing
    Inspect {
        /// File to inspect
        #[arg(short, long)]
        file: PathBuf,

        /// Treat the file as a spreadsheet (auto-detected from the extension)
        #[arg(long)]
        spreadsheet: bool,
    },
}
