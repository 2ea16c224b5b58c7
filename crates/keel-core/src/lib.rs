//! Keel Core Library
//!
//! Shared functionality for the Keel personal budgeting app:
//! - Bank/brokerage statement ingestion (CSV and spreadsheet exports)
//! - Header-signature format detection for known bank layouts
//! - Amount and date normalization
//! - Content-based duplicate fingerprinting
//!
//! The persistence layer and HTTP API that consume normalized batches live
//! outside this crate; callers hand in file bytes and a set of already-stored
//! fingerprints, and get back an accepted batch plus a duplicate count.

pub mod error;
pub mod import;
pub mod models;

pub use error::{Error, Result};
pub use import::{
    compute_fingerprint, dedupe, detect_format, import_transactions, normalize_date,
    normalize_date_checked, normalize_transactions, parse_amount, parse_tabular, resolve_column,
    DedupOutcome, ImportOutcome, ParsedTable,
};
pub use models::{NewTransaction, RawRow, SourceFormat, TransactionType};
