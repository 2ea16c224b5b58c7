//! Header-to-role column resolution for unrecognized layouts

/// Find the header filling a semantic role, given keyword patterns in
/// priority order.
///
/// An exact case-insensitive match on any pattern wins immediately; otherwise
/// the first header whose lowercase form contains a pattern as a substring is
/// taken, still honoring pattern order. Returns the original-cased header.
pub fn resolve_column<'a>(headers: &'a [String], patterns: &[&str]) -> Option<&'a str> {
    for pattern in patterns {
        if let Some(header) = headers
            .iter()
            .find(|h| h.trim().eq_ignore_ascii_case(pattern))
        {
            return Some(header.as_str());
        }
    }

    for pattern in patterns {
        if let Some(header) = headers
            .iter()
            .find(|h| h.to_lowercase().contains(pattern))
        {
            return Some(header.as_str());
        }
    }

    None
}
