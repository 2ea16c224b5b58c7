//! Bank layout detection from header signatures

use crate::models::SourceFormat;

/// Classify a header set into one of the known bank layouts.
///
/// Checks run in a fixed order because header sets can satisfy several
/// signatures at once (a generic export with a "Date" column would also
/// loosely match later patterns). First match wins; anything unrecognized
/// falls back to [`SourceFormat::Generic`], so detection never fails.
pub fn detect_format(headers: &[String]) -> SourceFormat {
    let joined = headers
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>()
        .join("|");

    if joined.contains("post date") && joined.contains("debit") && joined.contains("credit") {
        return SourceFormat::Abound;
    }
    if joined.contains("extended details") || joined.contains("appears on your statement as") {
        return SourceFormat::Amex;
    }
    if joined.contains("original description") && joined.contains("category") {
        return SourceFormat::Usaa;
    }
    if joined.contains("date") && joined.contains("name") && joined.contains("net") {
        return SourceFormat::Paypal;
    }

    SourceFormat::Generic
}
