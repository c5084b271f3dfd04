//! Lease duration normalization.
//!
//! Numeric answers ("12 months", "term (6) weeks") are parsed first and
//! reformatted as `<number> <unit>`, pluralized unless the number is one.
//! Answers with a spelled-out number fall back to a small word table. The
//! fallback's unit priority (year, month, day, then week) has not been checked
//! against real leases.

use super::check_confidence;
use super::patterns::{
    DURATION_DEFAULT_UNIT, DURATION_FALLBACK_UNITS, DURATION_PATTERN, DURATION_WORDS,
    SHORT_DURATION_DAYS,
};
use crate::models::field::{FieldIssue, FieldKind, NormalizedField};

/// Clean and standardize a lease duration.
///
/// Day counts under 30 are flagged as unusually short.
pub fn clean_lease_duration(text: &str, confidence: f32, min_confidence: f32) -> NormalizedField {
    let kind = FieldKind::LeaseDuration;
    let answer = text.trim().to_lowercase();

    if let Some(low) = check_confidence(kind, &answer, confidence, min_confidence) {
        return low;
    }

    if let Some((number, unit)) = parse_numeric_duration(&answer) {
        let count = number.parse::<u64>().ok();
        let unit = if count == Some(1) {
            unit.to_string()
        } else {
            format!("{}s", unit)
        };
        let duration = format!("{} {}", number, unit);

        // Unparseable counts are too large to be short
        let short = unit.starts_with("day") && count.is_some_and(|n| n < SHORT_DURATION_DAYS);
        if short {
            return NormalizedField::with_issue(kind, duration, FieldIssue::ShortDuration);
        }
        return NormalizedField::valid(kind, duration);
    }

    if let Some(duration) = spelled_out_duration(&answer) {
        return NormalizedField::valid(kind, duration);
    }

    NormalizedField::with_issue(kind, answer, FieldIssue::UnrecognizedDuration)
}

/// Extract `(number, unit)` from an answer starting with a numeric duration.
///
/// The number is returned as written; the unit is singular.
fn parse_numeric_duration(answer: &str) -> Option<(&str, &str)> {
    let caps = DURATION_PATTERN.captures(answer)?;
    let number = caps.get(1).or_else(|| caps.get(2))?.as_str();
    let unit = caps.get(3)?.as_str();
    Some((number, unit))
}

/// Map a spelled-out count and unit word to `<n> <unit>s`.
fn spelled_out_duration(answer: &str) -> Option<String> {
    let (_, number) = DURATION_WORDS
        .iter()
        .find(|(word, _)| answer.contains(word))?;

    let unit = DURATION_FALLBACK_UNITS
        .iter()
        .find(|unit| answer.contains(*unit))
        .copied()
        .unwrap_or(DURATION_DEFAULT_UNIT);

    Some(format!("{} {}s", number, unit))
}
