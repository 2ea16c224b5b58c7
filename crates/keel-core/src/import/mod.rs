//! Bank-statement ingestion pipeline
//!
//! Raw file bytes go in one end; a normalized, deduplicated transaction
//! batch comes out the other:
//!
//! ```text
//! bytes -> tabular parse -> format detect -> per-format normalize
//!       -> fingerprint -> dedupe -> accepted batch
//! ```
//!
//! Each stage is usable on its own (the API layer calls `parse_tabular` to
//! preview uploads, for example); [`import_transactions`] wires the whole
//! flow for callers that just want the outcome.

pub mod amount;
pub mod columns;
pub mod date;
pub mod fingerprint;
pub mod format;
pub mod normalize;
pub mod tabular;

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{NewTransaction, SourceFormat};

pub use amount::parse_amount;
pub use columns::resolve_column;
pub use date::{normalize_date, normalize_date_checked};
pub use fingerprint::{compute_fingerprint, dedupe, DedupOutcome};
pub use format::detect_format;
pub use normalize::normalize_transactions;
pub use tabular::{parse_delimited, parse_spreadsheet, parse_tabular, ParsedTable};

/// Result of one import run, with enough context for user-facing reporting
#[derive(Debug)]
pub struct ImportOutcome {
    /// Layout the file was recognized as
    pub source_format: SourceFormat,
    /// Headers as parsed from the file
    pub headers: Vec<String>,
    /// Data rows in the file after noise filtering
    pub total_rows: usize,
    /// Transactions that survived normalization and deduplication
    pub accepted: Vec<NewTransaction>,
    /// Transactions discarded as already-seen fingerprints
    pub duplicate_count: usize,
}

/// Run the full ingestion pipeline over one uploaded file.
///
/// `existing_hashes` holds the fingerprints already stored for the target
/// account; it is updated in place with the accepted batch. One set per
/// invocation; sharing it across concurrent imports breaks the
/// at-most-once-per-fingerprint guarantee.
pub fn import_transactions(
    content: &[u8],
    spreadsheet: bool,
    account_id: i64,
    existing_hashes: &mut HashSet<String>,
) -> Result<ImportOutcome> {
    let table = parse_tabular(content, spreadsheet)?;
    let source_format = detect_format(&table.headers);
    debug!(
        "Importing {} rows detected as {}",
        table.rows.len(),
        source_format
    );

    // A file whose every row was dropped as noise is not an empty file;
    // report it the same way as a batch that normalized to nothing.
    if table.rows.is_empty() && table.noise_rows > 0 {
        return Err(Error::NoTransactions {
            headers: table.headers,
        });
    }

    let transactions = normalize_transactions(&table.rows, &table.headers, account_id)?;
    let total_rows = table.rows.len();
    let outcome = dedupe(transactions, existing_hashes);

    Ok(ImportOutcome {
        source_format,
        headers: table.headers,
        total_rows,
        accepted: outcome.accepted,
        duplicate_count: outcome.duplicate_count,
    })
}
