//! Date normalization to ISO 8601

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Formats attempted before falling back to textual rewrites.
/// Order matters: US month-first forms win over the European day-first form,
/// which only catches dates the US forms reject (day > 12).
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",  // 2024-01-15 (already ISO)
    "%m/%d/%Y",  // 01/15/2024
    "%m/%d/%y",  // 01/15/24
    "%m-%d-%Y",  // 01-15-2024
    "%d/%m/%Y",  // 15/01/2024
    "%Y/%m/%d",  // 2024/01/15
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
];

fn slash_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid regex"))
}

fn dash_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})$").expect("valid regex"))
}

/// Normalize a raw date string to `YYYY-MM-DD`.
///
/// Unrecognized input is returned unchanged so a noisy row can still carry
/// its original text downstream; use [`normalize_date_checked`] when the
/// caller needs to know whether normalization actually happened.
pub fn normalize_date(raw: &str) -> String {
    normalize_date_checked(raw).0
}

/// Like [`normalize_date`], with a flag reporting whether any rule matched.
pub fn normalize_date_checked(raw: &str) -> (String, bool) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (String::new(), false);
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return (date.format("%Y-%m-%d").to_string(), true);
        }
    }

    // Textual rewrites: zero-pad and reorder without calendar validation,
    // matching what the upstream exports themselves get away with.
    // Slashes are month-first, dashes day-first.
    if let Some(caps) = slash_date_re().captures(trimmed) {
        return (format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[1], &caps[2]), true);
    }
    if let Some(caps) = dash_date_re().captures(trimmed) {
        return (format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[2], &caps[1]), true);
    }

    (raw.to_string(), false)
}
