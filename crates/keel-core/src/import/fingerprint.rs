//! Content-based duplicate fingerprinting

use std::collections::HashSet;

use tracing::debug;

use crate::models::NewTransaction;

/// Accepted batch plus the count of discarded duplicates
#[derive(Debug, Default)]
pub struct DedupOutcome {
    pub accepted: Vec<NewTransaction>,
    pub duplicate_count: usize,
}

/// Compute the dedup fingerprint for a transaction.
///
/// The key is `date|amount|merchant` lowercased with each part trimmed, run
/// through a 32-bit rolling polynomial hash (h = h*31 + code unit, wrapping)
/// and base-36 encoded. Previously stored fingerprints were produced with
/// exactly these overflow semantics over UTF-16 code units, so the
/// arithmetic here must not change; a different hash would re-import every
/// historical transaction as new.
pub fn compute_fingerprint(date: &str, amount: f64, merchant_raw: &str) -> String {
    let key = format!("{}|{}|{}", date.trim(), amount, merchant_raw.trim()).to_lowercase();

    let mut hash: i32 = 0;
    for unit in key.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }

    to_base36(hash.unsigned_abs())
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    while value > 0 {
        out.insert(0, DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    out
}

/// Filter a normalized batch against fingerprints already stored for the
/// target account.
///
/// The caller owns `existing_hashes` and must not share it across concurrent
/// imports. Accepted fingerprints are added to the set as they pass, so
/// duplicates within the batch itself are caught too.
pub fn dedupe(
    transactions: Vec<NewTransaction>,
    existing_hashes: &mut HashSet<String>,
) -> DedupOutcome {
    let mut outcome = DedupOutcome::default();

    for tx in transactions {
        if existing_hashes.contains(&tx.import_hash) {
            outcome.duplicate_count += 1;
        } else {
            existing_hashes.insert(tx.import_hash.clone());
            outcome.accepted.push(tx);
        }
    }

    debug!(
        "Deduped batch: {} accepted, {} duplicates",
        outcome.accepted.len(),
        outcome.duplicate_count
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    fn tx(date: &str, amount: f64, merchant: &str) -> NewTransaction {
        NewTransaction {
            account_id: 1,
            date: date.to_string(),
            merchant_raw: merchant.to_string(),
            merchant_clean: merchant.to_string(),
            amount,
            tx_type: if amount > 0.0 {
                TransactionType::Income
            } else {
                TransactionType::Expense
            },
            category: "uncategorized".to_string(),
            import_hash: compute_fingerprint(date, amount, merchant),
        }
    }

    #[test]
    fn test_fingerprint_known_values() {
        // Pinned: these must never change, or stored data stops deduping
        assert_eq!(compute_fingerprint("2024-03-04", -45.0, "NETFLIX.COM"), "4o1gk");
        assert_eq!(
            compute_fingerprint("2024-01-15", 1234.56, "ACME PAYROLL"),
            "x3ssu1"
        );
        assert_eq!(compute_fingerprint("2024-01-15", -5.5, "STARBUCKS"), "geyasy");
    }

    #[test]
    fn test_fingerprint_ignores_case_and_edge_whitespace() {
        let a = compute_fingerprint("2024-03-04", -45.0, "NETFLIX.COM");
        let b = compute_fingerprint(" 2024-03-04 ", -45.0, "  netflix.com  ");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_distinguishes_fields() {
        let base = compute_fingerprint("2024-03-04", -45.0, "NETFLIX.COM");
        assert_ne!(base, compute_fingerprint("2024-03-05", -45.0, "NETFLIX.COM"));
        assert_ne!(base, compute_fingerprint("2024-03-04", -45.01, "NETFLIX.COM"));
        assert_ne!(base, compute_fingerprint("2024-03-04", -45.0, "HULU"));
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u32::MAX), "1z141z3");
    }

    #[test]
    fn test_dedupe_against_existing() {
        let mut existing = HashSet::new();
        existing.insert(compute_fingerprint("2024-03-04", -45.0, "NETFLIX.COM"));

        let batch = vec![
            tx("2024-03-04", -45.0, "NETFLIX.COM"),
            tx("2024-03-04", -5.5, "STARBUCKS"),
        ];

        let outcome = dedupe(batch, &mut existing);
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.duplicate_count, 1);
        assert_eq!(outcome.accepted[0].merchant_raw, "STARBUCKS");
    }

    #[test]
    fn test_dedupe_catches_within_batch_duplicates() {
        let mut existing = HashSet::new();
        let batch = vec![
            tx("2024-03-04", -45.0, "NETFLIX.COM"),
            tx("2024-03-04", -45.0, "NETFLIX.COM"),
        ];

        let outcome = dedupe(batch, &mut existing);
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.duplicate_count, 1);
    }
}
