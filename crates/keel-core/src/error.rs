//! Error types for Keel

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet decoding error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unreadable text encoding: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Could not extract valid transactions; found columns: {}", .headers.join(", "))]
    NoTransactions { headers: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;
