//! Inspect command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use keel_core::{detect_format, parse_tabular};

pub fn cmd_inspect(file: &Path, force_spreadsheet: bool) -> Result<()> {
    let content =
        fs::read(file).with_context(|| format!("Failed to read file: {}", file.display()))?;
    let spreadsheet = force_spreadsheet || super::is_spreadsheet_file(file);

    let table = parse_tabular(&content, spreadsheet)?;
    let format = detect_format(&table.headers);

    println!("🔍 {}", file.display());
    println!("   Format: {}", format);
    println!("   Columns: {}", table.headers.join(", "));
    println!("   Data rows: {}", table.rows.len());
    if table.noise_rows > 0 {
        println!("   Noise rows dropped: {}", table.noise_rows);
    }

    Ok(())
}
