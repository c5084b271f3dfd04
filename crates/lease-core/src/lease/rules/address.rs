//! Property address validation.

use super::patterns::{ADDRESS_MARKER, MIN_ADDRESS_TOKENS};
use super::{check_confidence, is_all_digits};
use crate::models::field::{FieldIssue, FieldKind, NormalizedField};

/// Check that an address looks complete.
///
/// Short or purely numeric answers are incomplete. Longer answers without a
/// street-type word or a ZIP code are returned but flagged.
pub fn clean_property_address(text: &str, confidence: f32, min_confidence: f32) -> NormalizedField {
    let kind = FieldKind::PropertyAddress;
    let address = text.trim();

    if let Some(low) = check_confidence(kind, address, confidence, min_confidence) {
        return low;
    }

    if address.split_whitespace().count() < MIN_ADDRESS_TOKENS || is_all_digits(address) {
        return NormalizedField::with_issue(kind, address, FieldIssue::IncompleteAddress);
    }

    if !ADDRESS_MARKER.is_match(address) {
        return NormalizedField::with_issue(kind, address, FieldIssue::PossiblyIncompleteAddress);
    }

    NormalizedField::valid(kind, address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::FieldStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_complete_address() {
        let field = clean_property_address(" 123 Main St, Springfield, IL 62704 ", 0.9, 0.5);
        assert_eq!(field.status, FieldStatus::Valid);
        assert_eq!(field.message(), "123 Main St, Springfield, IL 62704");

        let field = clean_property_address("Box 12 Town 62704", 0.9, 0.5);
        assert_eq!(field.status, FieldStatus::Valid);
    }

    #[test]
    fn test_incomplete_address() {
        let field = clean_property_address("Springfield", 0.9, 0.5);
        assert_eq!(field.status, FieldStatus::Invalid);
        assert_eq!(field.message(), "Springfield (Incomplete address)");

        assert_eq!(
            clean_property_address("42", 0.9, 0.5).message(),
            "42 (Incomplete address)"
        );
        assert_eq!(
            clean_property_address("Main Street", 0.9, 0.5).issue,
            Some(FieldIssue::IncompleteAddress)
        );
    }

    #[test]
    fn test_possibly_incomplete_address() {
        let field = clean_property_address("Unit 4 Springfield", 0.9, 0.5);
        assert_eq!(field.status, FieldStatus::Flagged);
        assert_eq!(field.message(), "Unit 4 Springfield (Possibly incomplete address)");

        assert_eq!(
            clean_property_address("1 2 3", 0.9, 0.5).issue,
            Some(FieldIssue::PossiblyIncompleteAddress)
        );
    }

    #[test]
    fn test_marker_matches_inside_words() {
        let field = clean_property_address("Apt 9 Westfield Mall", 0.9, 0.5);
        assert_eq!(field.status, FieldStatus::Valid);
    }
}
