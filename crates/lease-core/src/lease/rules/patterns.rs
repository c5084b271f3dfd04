//! Named patterns and word lists used by the lease answer normalizers.

use lazy_static::lazy_static;
use regex::Regex;

/// Substrings that mark a tenant answer as naming the other party.
pub const LANDLORD_TERMS: [&str; 4] = ["landlord", "owner", "lessor", "property management"];

/// Spelled-out numbers understood by the duration fallback, checked in order.
pub const DURATION_WORDS: [(&str, u32); 5] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("seven", 7),
    ("twelve", 12),
];

/// Unit words for the duration fallback, in priority order.
pub const DURATION_FALLBACK_UNITS: [&str; 3] = ["year", "month", "day"];

/// Unit used by the duration fallback when no unit word is present.
pub const DURATION_DEFAULT_UNIT: &str = "week";

/// Durations in days below this are flagged.
pub const SHORT_DURATION_DAYS: u64 = 30;

/// Minimum number of whitespace-separated tokens in a complete address.
pub const MIN_ADDRESS_TOKENS: usize = 3;

lazy_static! {
    // At least one ASCII letter
    pub static ref HAS_LETTER: Regex = Regex::new(r"[a-zA-Z]").unwrap();

    // "term(12) months" or "12 months", anchored at the start of the answer
    pub static ref DURATION_PATTERN: Regex = Regex::new(
        r"^(?:[a-zA-Z]+\s*\(\s*([0-9]+)\s*\)\s*|\b([0-9]+)\s*)(day|week|month|year)s?"
    ).unwrap();

    // Optional dollar sign, digits with comma separators, optional decimals
    pub static ref RENT_AMOUNT: Regex = Regex::new(
        r"\$?([0-9,]+\.?[0-9]*)"
    ).unwrap();

    // Street type words/abbreviations or a 5-digit ZIP, unanchored
    pub static ref ADDRESS_MARKER: Regex = Regex::new(
        r"(?i)(street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr|[0-9]{5})"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_pattern_forms() {
        let caps = DURATION_PATTERN.captures("twelve (12) months").unwrap();
        assert_eq!(&caps[1], "12");
        assert_eq!(&caps[3], "month");

        let caps = DURATION_PATTERN.captures("1 year").unwrap();
        assert!(caps.get(1).is_none());
        assert_eq!(&caps[2], "1");
        assert_eq!(&caps[3], "year");

        let caps = DURATION_PATTERN.captures("30days").unwrap();
        assert_eq!(&caps[2], "30");
        assert_eq!(&caps[3], "day");
    }

    #[test]
    fn test_duration_pattern_is_anchored() {
        assert!(DURATION_PATTERN.captures("for 12 months").is_none());
        assert!(DURATION_PATTERN.captures("12 fortnights").is_none());
    }

    #[test]
    fn test_rent_amount_pattern() {
        let caps = RENT_AMOUNT.captures("Rent is $2,450.50 per month").unwrap();
        assert_eq!(&caps[1], "2,450.50");

        let caps = RENT_AMOUNT.captures("1200").unwrap();
        assert_eq!(&caps[1], "1200");

        assert!(RENT_AMOUNT.captures("no rent listed").is_none());
    }

    #[test]
    fn test_address_marker_is_unanchored() {
        assert!(ADDRESS_MARKER.is_match("123 Main St"));
        assert!(ADDRESS_MARKER.is_match("PO Box 62704"));
        // Matches inside words, like the street-type check it replaces
        assert!(ADDRESS_MARKER.is_match("Westfield Mall"));
        assert!(!ADDRESS_MARKER.is_match("Unit 4 Springfield"));
    }
}
