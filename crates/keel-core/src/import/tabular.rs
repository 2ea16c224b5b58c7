//! Raw file decoding into header + row records
//!
//! Two input shapes: delimited text (CSV) and spreadsheet binaries
//! (XLSX/XLS/ODS). Both produce the same `ParsedTable` so the rest of the
//! pipeline never cares which one the user uploaded.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::RawRow;

/// Keywords that mark a spreadsheet row as a likely header row
const HEADER_KEYWORDS: &[&str] = &[
    "date",
    "amount",
    "description",
    "merchant",
    "debit",
    "credit",
    "transaction",
];

/// How many leading spreadsheet rows to scan for the header row
const HEADER_SCAN_LIMIT: usize = 10;

/// Rows with fewer populated cells than this are metadata/footer noise
const MIN_POPULATED_CELLS: usize = 2;

/// Parsed headers plus data rows, ready for normalization
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    /// Rows dropped as metadata/footer noise. Lets callers tell "file had
    /// rows but none were usable" apart from a genuinely empty file.
    pub noise_rows: usize,
}

/// Decode raw upload bytes into a table.
///
/// `spreadsheet` selects the binary decoder; otherwise the content must be
/// UTF-8 delimited text. Decode failures are hard errors, unlike row-level
/// noise: an unreadable file is something the user has to fix.
pub fn parse_tabular(content: &[u8], spreadsheet: bool) -> Result<ParsedTable> {
    if spreadsheet {
        parse_spreadsheet(content)
    } else {
        let text = std::str::from_utf8(content)?;
        parse_delimited(text)
    }
}

/// Parse header-aware delimited text (quoted fields may contain delimiters
/// and newlines).
pub fn parse_delimited(text: &str) -> Result<ParsedTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    let mut noise_rows = 0;
    for result in rdr.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        if row.populated_cells() >= MIN_POPULATED_CELLS {
            rows.push(row);
        } else {
            noise_rows += 1;
        }
    }

    debug!(
        "Parsed {} delimited rows ({} columns, {} noise rows dropped)",
        rows.len(),
        headers.len(),
        noise_rows
    );
    Ok(ParsedTable {
        headers,
        rows,
        noise_rows,
    })
}

/// Decode the first sheet of a spreadsheet binary.
///
/// Bank spreadsheet exports often prepend a report title or account summary
/// above the real header row, so the header row is found by scoring instead
/// of assumed to be row 0.
pub fn parse_spreadsheet(content: &[u8]) -> Result<ParsedTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(content))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Import("spreadsheet has no sheets".to_string()))??;

    let grid: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let header_idx = header_row_index(&grid);
    let headers: Vec<String> = grid.get(header_idx).cloned().unwrap_or_default();

    let mut rows = Vec::new();
    let mut noise_rows = 0;
    for cells in grid.iter().skip(header_idx + 1) {
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), cells.get(i).cloned().unwrap_or_default()))
            .collect();
        if row.populated_cells() >= MIN_POPULATED_CELLS {
            rows.push(row);
        } else {
            noise_rows += 1;
        }
    }

    debug!(
        "Parsed {} spreadsheet rows (header row {}, {} columns, {} noise rows dropped)",
        rows.len(),
        header_idx,
        headers.len(),
        noise_rows
    );
    Ok(ParsedTable {
        headers,
        rows,
        noise_rows,
    })
}

/// Pick the most header-like row among the first few.
///
/// Score = populated cells + 3 per cell containing a header keyword; only
/// rows with at least 3 populated cells qualify, first-seen wins ties, and
/// row 0 is the default when nothing qualifies.
fn header_row_index(grid: &[Vec<String>]) -> usize {
    let mut best: Option<(usize, usize)> = None;

    for (i, cells) in grid.iter().take(HEADER_SCAN_LIMIT).enumerate() {
        let populated = cells.iter().filter(|c| !c.trim().is_empty()).count();
        if populated < 3 {
            continue;
        }
        let keyword_hits = cells
            .iter()
            .filter(|c| {
                let lc = c.to_lowercase();
                HEADER_KEYWORDS.iter().any(|k| lc.contains(k))
            })
            .count();
        let score = populated + 3 * keyword_hits;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }

    best.map_or(0, |(i, _)| i)
}

/// Stringify a spreadsheet cell; date-typed cells become `YYYY-MM-DD`
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::DateTimeIso(s) => s.split('T').next().unwrap_or(s).trim().to_string(),
        Data::DurationIso(s) => s.trim().to_string(),
    }
}

/// Convert an Excel serial day number to an ISO date string.
/// Excel's epoch is 1899-12-30 (accounting for the 1900 leap year bug).
fn excel_serial_to_date(serial: f64) -> String {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    let date = base + chrono::Duration::days(serial as i64);
    date.format("%Y-%m-%d").to_string()
}
