//! Currency-string amount parsing

/// Parse a raw cell value into a signed amount.
///
/// Bank exports wrap negatives in parentheses, prefix currency symbols, and
/// insert thousands separators. Unparseable input (including empty cells)
/// yields 0.0 rather than an error; callers drop zero-amount rows.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    // "(123.45)" accounting style means negative
    let (body, negated) = match trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => (inner, true),
        None => (trimmed, false),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ',') && !c.is_whitespace())
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if negated => -value,
        Ok(value) => value,
        Err(_) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56"), 1234.56);
        assert_eq!(parse_amount("-123.45"), -123.45);
        assert_eq!(parse_amount("(50.00)"), -50.00);
        assert_eq!(parse_amount("($1,000.00)"), -1000.00);
        assert_eq!(parse_amount("€99.99"), 99.99);
        assert_eq!(parse_amount(" 1 234.56 "), 1234.56);
    }

    #[test]
    fn test_parse_amount_junk_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("$"), 0.0);
        assert_eq!(parse_amount("(n/a)"), 0.0);
    }
}
