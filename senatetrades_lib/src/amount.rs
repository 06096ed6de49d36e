//! Disclosure amount-range parsing.
//!
//! Senate filings report trade values as ranges ("$15,001 - $50,000"), as
//! open-ended floors ("Over $50,000,000"), or occasionally as a bare figure.
//! Some filings carry embedded spaces as thousand separators ("$1 000 001").
//! This module collapses all of those shapes into a single representative
//! integer value, or `None` when the string is not a dollar figure at all.

use regex::Regex;
use std::sync::OnceLock;

fn range_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*-\s*").expect("valid regex"))
}

/// Normalize a raw disclosure amount string to a representative value.
///
/// Ranges resolve to the midpoint of the two bounds (integer division);
/// "Over $N" and bare "$N" resolve to N itself. Returns `None` when the
/// string cannot be parsed as a number after stripping currency symbols
/// and separators -- callers exclude such rows from aggregates.
pub fn normalize_amount(raw: &str) -> Option<i64> {
    let parts: Vec<&str> = range_separator().split(raw.trim()).collect();
    match parts.as_slice() {
        [single] => parse_dollar_figure(single),
        [low, high] => {
            let low = parse_dollar_figure(low)?;
            let high = parse_dollar_figure(high)?;
            Some((low + high) / 2)
        }
        _ => None,
    }
}

/// Parse one side of an amount string: optional "Over" prefix, optional "$",
/// commas or spaces as thousand separators.
fn parse_dollar_figure(part: &str) -> Option<i64> {
    let mut s = part.trim();
    if let Some(rest) = s.get(..4).and_then(|prefix| {
        prefix
            .eq_ignore_ascii_case("over")
            .then(|| s[4..].trim_start())
    }) {
        s = rest;
    }
    let s = s.strip_prefix('$').unwrap_or(s).trim();
    let cleaned: String = s.chars().filter(|c| *c != ',' && *c != ' ').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_resolves_to_midpoint() {
        assert_eq!(normalize_amount("$15,001-$50,000"), Some(32500));
    }

    #[test]
    fn range_with_spaces_around_hyphen() {
        assert_eq!(normalize_amount("$15,001 - $50,000"), Some(32500));
    }

    #[test]
    fn range_with_space_separators() {
        assert_eq!(normalize_amount("$1 000 001-$5 000 000"), Some(3_000_000));
    }

    #[test]
    fn over_resolves_to_floor() {
        assert_eq!(normalize_amount("Over $50,000,000"), Some(50_000_000));
        assert_eq!(normalize_amount("OVER $1,000,000"), Some(1_000_000));
    }

    #[test]
    fn bare_figure() {
        assert_eq!(normalize_amount("$1,001"), Some(1001));
        assert_eq!(normalize_amount("1001"), Some(1001));
    }

    #[test]
    fn garbage_returns_none() {
        assert_eq!(normalize_amount("not a number"), None);
        assert_eq!(normalize_amount(""), None);
        assert_eq!(normalize_amount("$--"), None);
    }

    #[test]
    fn partial_range_returns_none() {
        assert_eq!(normalize_amount("$15,001-unknown"), None);
    }

    #[test]
    fn midpoint_uses_integer_division() {
        // (1001 + 15000) / 2 = 8000 (truncated from 8000.5)
        assert_eq!(normalize_amount("$1,001-$15,000"), Some(8000));
    }
}
