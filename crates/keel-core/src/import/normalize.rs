//! Per-format row extraction into normalized transactions

use tracing::debug;

use crate::error::{Error, Result};
use crate::import::amount::parse_amount;
use crate::import::columns::resolve_column;
use crate::import::date::normalize_date;
use crate::import::fingerprint::compute_fingerprint;
use crate::import::format::detect_format;
use crate::models::{NewTransaction, RawRow, SourceFormat, TransactionType};

const DATE_PATTERNS: &[&str] = &["date", "transaction date", "posting date", "post date"];
const DESCRIPTION_PATTERNS: &[&str] =
    &["description", "merchant", "payee", "name", "memo", "details"];
const CATEGORY_PATTERNS: &[&str] = &["category"];
const AMOUNT_PATTERNS: &[&str] = &["amount", "total", "net", "sum", "value"];
const DEBIT_PATTERNS: &[&str] = &["debit", "withdrawal", "debits", "charge"];
const CREDIT_PATTERNS: &[&str] = &["credit", "deposit", "credits"];

/// Per-format extraction result, before common post-processing
struct RowDraft {
    date: String,
    merchant_raw: String,
    merchant_clean: Option<String>,
    amount: f64,
    category: Option<String>,
    tx_type: Option<TransactionType>,
}

/// Convert raw rows into normalized transactions for one account.
///
/// Malformed rows are dropped silently: bank exports are noisy and per-row
/// errors would bury the user. A non-empty input that yields nothing at all
/// is a different story: that means the columns were misread, so it fails
/// with the detected headers for diagnostics.
pub fn normalize_transactions(
    rows: &[RawRow],
    headers: &[String],
    account_id: i64,
) -> Result<Vec<NewTransaction>> {
    let format = detect_format(headers);

    let transactions: Vec<NewTransaction> = rows
        .iter()
        .filter_map(|row| extract_row(format, row, headers))
        .filter_map(|draft| finish_row(draft, account_id))
        .collect();

    debug!(
        "Normalized {} of {} rows as {}",
        transactions.len(),
        rows.len(),
        format
    );

    if transactions.is_empty() && !rows.is_empty() {
        return Err(Error::NoTransactions {
            headers: headers.to_vec(),
        });
    }

    Ok(transactions)
}

fn extract_row(format: SourceFormat, row: &RawRow, headers: &[String]) -> Option<RowDraft> {
    match format {
        SourceFormat::Abound => extract_abound(row),
        SourceFormat::Amex => extract_amex(row),
        SourceFormat::Usaa => extract_usaa(row),
        SourceFormat::Paypal => extract_paypal(row),
        SourceFormat::Generic => extract_generic(row, headers),
    }
}

/// Common post-processing: reject rows without a usable date or amount,
/// normalize the date, fill fallbacks, and attach the fingerprint.
fn finish_row(draft: RowDraft, account_id: i64) -> Option<NewTransaction> {
    if draft.date.trim().is_empty() {
        return None;
    }
    if draft.amount.is_nan() || draft.amount == 0.0 {
        return None;
    }

    let date = normalize_date(&draft.date);
    let merchant_clean = draft
        .merchant_clean
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| draft.merchant_raw.clone());
    let category = draft
        .category
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "uncategorized".to_string());
    let tx_type = draft.tx_type.unwrap_or(if draft.amount > 0.0 {
        TransactionType::Income
    } else {
        TransactionType::Expense
    });
    let import_hash = compute_fingerprint(&date, draft.amount, &draft.merchant_raw);

    Some(NewTransaction {
        account_id,
        date,
        merchant_raw: draft.merchant_raw,
        merchant_clean,
        amount: draft.amount,
        tx_type,
        category,
        import_hash,
    })
}

/// Abound: separate Debit/Credit columns, credit inflow positive
fn extract_abound(row: &RawRow) -> Option<RowDraft> {
    let date = row
        .get("Post Date")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| row.get("Date"))
        .unwrap_or("")
        .to_string();

    let debit = parse_amount(row.get("Debit").unwrap_or(""));
    let credit = parse_amount(row.get("Credit").unwrap_or(""));
    if debit == 0.0 && credit == 0.0 {
        return None;
    }

    Some(RowDraft {
        date,
        merchant_raw: row.get("Description").unwrap_or("").to_string(),
        merchant_clean: None,
        amount: credit - debit,
        category: None,
        tx_type: None,
    })
}

/// Amex: charges are stored positive in the export, so the sign flips
fn extract_amex(row: &RawRow) -> Option<RowDraft> {
    let date = row.get("Date").unwrap_or("").to_string();
    let amount = -parse_amount(row.get("Amount").unwrap_or(""));

    let merchant_raw = row
        .get("Description")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| row.get("Appears On Your Statement As"))
        .unwrap_or("")
        .to_string();

    Some(RowDraft {
        date,
        merchant_raw,
        merchant_clean: None,
        amount,
        category: row.get("Category").map(str::to_string),
        tx_type: None,
    })
}

/// USAA: signed Amount column used as-is
fn extract_usaa(row: &RawRow) -> Option<RowDraft> {
    Some(RowDraft {
        date: row.get("Date").unwrap_or("").to_string(),
        merchant_raw: row
            .get("Original Description")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| row.get("Description"))
            .unwrap_or("")
            .to_string(),
        merchant_clean: None,
        amount: parse_amount(row.get("Amount").unwrap_or("")),
        category: row.get("Category").map(str::to_string),
        tx_type: None,
    })
}

/// PayPal: Net column is already signed; merchant falls back to the service
fn extract_paypal(row: &RawRow) -> Option<RowDraft> {
    let date = row.get("Date")?.to_string();
    let net = row.get("Net")?;

    let merchant_raw = row
        .get("Name")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("PayPal")
        .to_string();

    Some(RowDraft {
        date,
        merchant_raw,
        merchant_clean: None,
        amount: parse_amount(net),
        category: None,
        tx_type: None,
    })
}

/// Generic: columns resolved heuristically; a single amount-like column is
/// preferred over separate debit/credit columns
fn extract_generic(row: &RawRow, headers: &[String]) -> Option<RowDraft> {
    let date = resolve_column(headers, DATE_PATTERNS)
        .and_then(|col| row.get(col))
        .unwrap_or("")
        .to_string();

    let single_amount = resolve_column(headers, AMOUNT_PATTERNS)
        .and_then(|col| row.get(col))
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let amount = match single_amount {
        Some(raw) => parse_amount(raw),
        None => {
            let debit = resolve_column(headers, DEBIT_PATTERNS)
                .and_then(|col| row.get(col))
                .map(parse_amount)
                .unwrap_or(0.0);
            let credit = resolve_column(headers, CREDIT_PATTERNS)
                .and_then(|col| row.get(col))
                .map(parse_amount)
                .unwrap_or(0.0);
            credit - debit
        }
    };

    if amount.is_nan() || amount == 0.0 {
        return None;
    }

    Some(RowDraft {
        date,
        merchant_raw: resolve_column(headers, DESCRIPTION_PATTERNS)
            .and_then(|col| row.get(col))
            .unwrap_or("")
            .to_string(),
        merchant_clean: None,
        amount,
        category: resolve_column(headers, CATEGORY_PATTERNS)
            .and_then(|col| row.get(col))
            .map(str::to_string),
        tx_type: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::tabular::parse_delimited;

    fn normalize_csv(csv: &str) -> Result<Vec<NewTransaction>> {
        let table = parse_delimited(csv).unwrap();
        normalize_transactions(&table.rows, &table.headers, 1)
    }

    #[test]
    fn test_abound_debit_credit() {
        let csv = r#"Post Date,Date,Description,Debit,Credit
01/15/2024,01/14/2024,COFFEE SHOP,5.50,
01/16/2024,01/15/2024,PAYCHECK,,2500.00
01/17/2024,01/16/2024,PENDING,,"#;

        let txs = normalize_csv(csv).unwrap();
        assert_eq!(txs.len(), 2);

        // Post Date preferred over Date
        assert_eq!(txs[0].date, "2024-01-15");
        assert_eq!(txs[0].amount, -5.50);
        assert_eq!(txs[0].tx_type, TransactionType::Expense);

        assert_eq!(txs[1].amount, 2500.00);
        assert_eq!(txs[1].tx_type, TransactionType::Income);
    }

    #[test]
    fn test_amex_inverts_charges() {
        let csv = r#"Date,Description,Amount,Extended Details,Appears On Your Statement As,Category
01/15/2024,NETFLIX.COM,45.00,,NETFLIX.COM,Entertainment
01/14/2024,AMAZON REFUND,-25.00,,AMAZON REFUND,Merchandise"#;

        let txs = normalize_csv(csv).unwrap();
        assert_eq!(txs.len(), 2);

        // A positive charge becomes a negative expense
        assert_eq!(txs[0].amount, -45.00);
        assert_eq!(txs[0].tx_type, TransactionType::Expense);
        assert_eq!(txs[0].category, "Entertainment");

        // A refund (negative in the export) becomes positive
        assert_eq!(txs[1].amount, 25.00);
        assert_eq!(txs[1].tx_type, TransactionType::Income);
    }

    #[test]
    fn test_amex_statement_text_fallback() {
        let csv = r#"Date,Description,Amount,Extended Details,Appears On Your Statement As,Category
01/15/2024,,12.00,,ADOBE ACROPRO SUBS,Software"#;

        let txs = normalize_csv(csv).unwrap();
        assert_eq!(txs[0].merchant_raw, "ADOBE ACROPRO SUBS");
    }

    #[test]
    fn test_usaa_amount_as_is() {
        let csv = r#"Date,Description,Original Description,Category,Amount
2024-01-15,Grocery Run,H-E-B #123 AUSTIN TX,Groceries,-87.43
2024-01-16,Salary,ACME PAYROLL,Income,2500.00"#;

        let txs = normalize_csv(csv).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].merchant_raw, "H-E-B #123 AUSTIN TX");
        assert_eq!(txs[0].amount, -87.43);
        assert_eq!(txs[0].category, "Groceries");
        assert_eq!(txs[1].amount, 2500.00);
    }

    #[test]
    fn test_paypal_merchant_fallback() {
        let csv = r#"Date,Name,Gross,Fee,Net
01/15/2024,Widget Store,-20.00,0.00,-20.00
01/16/2024,,-5.00,0.00,-5.00"#;

        let txs = normalize_csv(csv).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].merchant_raw, "Widget Store");
        assert_eq!(txs[0].amount, -20.00);
        assert_eq!(txs[1].merchant_raw, "PayPal");
    }

    #[test]
    fn test_generic_single_amount_column() {
        let csv = r#"Transaction Date,Payee,Amount
01/15/2024,NETFLIX.COM,-15.99"#;

        let txs = normalize_csv(csv).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].date, "2024-01-15");
        assert_eq!(txs[0].merchant_raw, "NETFLIX.COM");
        assert_eq!(txs[0].amount, -15.99);
        assert_eq!(txs[0].category, "uncategorized");
    }

    #[test]
    fn test_generic_withdrawal_deposit_columns() {
        let csv = r#"Date,Description,Withdrawal,Deposit
01/15/2024,ATM CASH,60.00,
01/16/2024,REFUND,,30.00"#;

        let txs = normalize_csv(csv).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].amount, -60.00);
        assert_eq!(txs[1].amount, 30.00);
    }

    #[test]
    fn test_rows_without_usable_amount_are_dropped() {
        let csv = r#"Date,Description,Amount
01/15/2024,NETFLIX.COM,-15.99
01/16/2024,ZERO DOLLAR AUTH,0.00
01/17/2024,PENDING,n/a"#;

        let txs = normalize_csv(csv).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].merchant_raw, "NETFLIX.COM");
    }

    #[test]
    fn test_merchant_clean_defaults_to_raw() {
        let csv = r#"Date,Description,Amount
01/15/2024,STARBUCKS #998,-5.50"#;

        let txs = normalize_csv(csv).unwrap();
        assert_eq!(txs[0].merchant_clean, "STARBUCKS #998");
        assert!(!txs[0].import_hash.is_empty());
    }

    #[test]
    fn test_no_transactions_failure_carries_headers() {
        let csv = r#"Date,Description,Amount
01/15/2024,NOT A NUMBER,abc
01/16/2024,ALSO BAD,xyz"#;

        let err = normalize_csv(csv).unwrap_err();
        match err {
            Error::NoTransactions { headers } => {
                assert_eq!(headers, vec!["Date", "Description", "Amount"]);
            }
            other => panic!("expected NoTransactions, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_not_a_failure() {
        let txs = normalize_transactions(&[], &["Date".to_string()], 1).unwrap();
        assert!(txs.is_empty());
    }
}
