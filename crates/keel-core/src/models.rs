//! Domain models for Keel

use serde::{Deserialize, Serialize};

/// Bank/institution export layouts recognized by header signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Abound,
    Amex,
    Usaa,
    Paypal,
    /// Unrecognized layout; columns are resolved heuristically
    Generic,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abound => "abound",
            Self::Amex => "amex",
            Self::Usaa => "usaa",
            Self::Paypal => "paypal",
            Self::Generic => "generic",
        }
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abound" => Ok(Self::Abound),
            "amex" | "americanexpress" => Ok(Self::Amex),
            "usaa" => Ok(Self::Usaa),
            "paypal" => Ok(Self::Paypal),
            "generic" => Ok(Self::Generic),
            _ => Err(format!("Unknown source format: {}", s)),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction direction/kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
    Refund,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
            Self::Refund => "refund",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "transfer" => Ok(Self::Transfer),
            "refund" => Ok(Self::Refund),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One parsed line of an uploaded file before semantic interpretation.
///
/// Preserves column order and the original header casing; lookups by header
/// name are case-insensitive because banks are not consistent about it.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.cells.push((header.into(), value.into()));
    }

    /// Look up a cell by header name (case-insensitive, ignoring edge whitespace)
    pub fn get(&self, header: &str) -> Option<&str> {
        let wanted = header.trim();
        self.cells
            .iter()
            .find(|(h, _)| h.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, v)| v.as_str())
    }

    /// Number of cells with non-empty trimmed content
    pub fn populated_cells(&self) -> usize {
        self.cells.iter().filter(|(_, v)| !v.trim().is_empty()).count()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// A normalized, storage-ready transaction produced by the ingestion pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Destination account, assigned by the caller
    pub account_id: i64,
    /// ISO-8601 date (best effort; unrecognized source dates pass through verbatim)
    pub date: String,
    /// Description string verbatim from the source row
    pub merchant_raw: String,
    /// Cleaned merchant label; falls back to `merchant_raw`
    pub merchant_clean: String,
    /// Negative = money out, positive = money in
    pub amount: f64,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// Source category if present, else "uncategorized"
    pub category: String,
    /// Content fingerprint for deduplication; derived, not user-editable
    pub import_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_lookup_is_case_insensitive() {
        let row: RawRow = vec![
            ("Post Date".to_string(), "01/15/2024".to_string()),
            ("Description".to_string(), "NETFLIX.COM".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(row.get("post date"), Some("01/15/2024"));
        assert_eq!(row.get("DESCRIPTION"), Some("NETFLIX.COM"));
        assert_eq!(row.get("Amount"), None);
    }

    #[test]
    fn test_raw_row_populated_cells() {
        let row: RawRow = vec![
            ("Date".to_string(), "01/15/2024".to_string()),
            ("Description".to_string(), "   ".to_string()),
            ("Amount".to_string(), "-5.50".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(row.populated_cells(), 2);
    }

    #[test]
    fn test_source_format_round_trip() {
        for format in [
            SourceFormat::Abound,
            SourceFormat::Amex,
            SourceFormat::Usaa,
            SourceFormat::Paypal,
            SourceFormat::Generic,
        ] {
            assert_eq!(format.as_str().parse::<SourceFormat>(), Ok(format));
        }
    }
}
