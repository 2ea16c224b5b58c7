//! Import command implementation

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use keel_core::import_transactions;

pub fn cmd_import(
    file: &Path,
    account: i64,
    force_spreadsheet: bool,
    known_hashes: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let content =
        fs::read(file).with_context(|| format!("Failed to read file: {}", file.display()))?;
    let spreadsheet = force_spreadsheet || super::is_spreadsheet_file(file);

    // Pre-load fingerprints the storage layer already knows about
    let mut existing: HashSet<String> = HashSet::new();
    if let Some(path) = known_hashes {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read hash file: {}", path.display()))?;
        existing.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }
    let preloaded = existing.len();

    println!("📥 Importing {}...", file.display());

    let outcome = import_transactions(&content, spreadsheet, account, &mut existing)?;

    println!("   Format: {}", outcome.source_format);
    println!("   Found {} rows", outcome.total_rows);
    println!("✅ Import complete!");
    println!("   Imported: {}", outcome.accepted.len());
    println!("   Skipped (duplicates): {}", outcome.duplicate_count);
    if preloaded > 0 {
        println!("   Known hashes pre-loaded: {}", preloaded);
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&outcome.accepted)
            .context("Failed to serialize transactions to JSON")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        println!(
            "   Wrote {} transactions to {}",
            outcome.accepted.len(),
            path.display()
        );
    }

    Ok(())
}
