//! Tenant name validation.

use super::patterns::{HAS_LETTER, LANDLORD_TERMS};
use super::{check_confidence, is_all_digits};
use crate::models::field::{FieldIssue, FieldKind, NormalizedField};

/// Clean and validate a tenant name.
///
/// Rejects answers naming the landlord side and answers that cannot be a
/// name (no letters, or only digits). Landlord terms match anywhere in the
/// answer, ignoring case.
pub fn clean_tenant_name(text: &str, confidence: f32, min_confidence: f32) -> NormalizedField {
    let kind = FieldKind::TenantName;
    let name = text.trim();

    if let Some(low) = check_confidence(kind, name, confidence, min_confidence) {
        return low;
    }

    if contains_landlord_term(name) {
        return NormalizedField::with_issue(kind, name, FieldIssue::LandlordTerm);
    }

    if !HAS_LETTER.is_match(name) || is_all_digits(name) {
        return NormalizedField::with_issue(kind, name, FieldIssue::NotAName);
    }

    NormalizedField::valid(kind, name)
}

/// Whether the answer mentions the landlord side of the lease.
pub fn contains_landlord_term(text: &str) -> bool {
    let lower = text.to_lowercase();
    LANDLORD_TERMS.iter().any(|term| lower.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::FieldStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_name() {
        let field = clean_tenant_name("  John Smith ", 0.9, 0.5);
        assert_eq!(field.status, FieldStatus::Valid);
        assert_eq!(field.message(), "John Smith");
    }

    #[test]
    fn test_landlord_terms() {
        let field = clean_tenant_name("Landlord Associates", 0.9, 0.5);
        assert_eq!(field.status, FieldStatus::Invalid);
        assert_eq!(field.issue, Some(FieldIssue::LandlordTerm));
        assert_eq!(field.message(), "Invalid tenant name (contains landlord-related term)");

        assert!(contains_landlord_term("ACME PROPERTY MANAGEMENT"));
        assert!(contains_landlord_term("the Lessor"));
        // Unanchored: matches inside longer words
        assert!(contains_landlord_term("Joe Downer"));
        assert!(!contains_landlord_term("Jane Lessee"));
    }

    #[test]
    fn test_not_a_name() {
        let field = clean_tenant_name("12345", 0.9, 0.5);
        assert_eq!(field.issue, Some(FieldIssue::NotAName));
        assert_eq!(field.message(), "Invalid tenant name (not a name)");

        let field = clean_tenant_name("  ", 0.9, 0.5);
        assert_eq!(field.issue, Some(FieldIssue::NotAName));

        let field = clean_tenant_name("#42-7", 0.9, 0.5);
        assert_eq!(field.issue, Some(FieldIssue::NotAName));
    }

    #[test]
    fn test_landlord_check_precedes_name_check() {
        let field = clean_tenant_name("owner 1", 0.9, 0.5);
        assert_eq!(field.issue, Some(FieldIssue::LandlordTerm));
    }

    #[test]
    fn test_low_confidence_skips_content_checks() {
        let field = clean_tenant_name("Landlord Associates", 0.2, 0.5);
        assert_eq!(field.status, FieldStatus::LowConfidence);
        assert_eq!(field.message(), "Landlord Associates (Low confidence: 0.20)");
    }
}
