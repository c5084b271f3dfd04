//! Lease field kinds and the normalized result of cleaning an answer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::lease::rules;

/// The lease attributes the reader extracts.
///
/// The set is closed: every consumer matches on it exhaustively, so adding a
/// kind forces a normalizer, a label and a default question to be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    TenantName,
    LeaseDuration,
    RentAmount,
    PropertyAddress,
}

impl FieldKind {
    /// All field kinds, in extraction order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::TenantName,
        FieldKind::LeaseDuration,
        FieldKind::RentAmount,
        FieldKind::PropertyAddress,
    ];

    /// Human-readable label ("Tenant Name").
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::TenantName => "Tenant Name",
            FieldKind::LeaseDuration => "Lease Duration",
            FieldKind::RentAmount => "Rent Amount",
            FieldKind::PropertyAddress => "Property Address",
        }
    }

    /// Machine identifier ("tenant_name").
    pub fn id(self) -> &'static str {
        match self {
            FieldKind::TenantName => "tenant_name",
            FieldKind::LeaseDuration => "lease_duration",
            FieldKind::RentAmount => "rent_amount",
            FieldKind::PropertyAddress => "property_address",
        }
    }

    /// Question asked of the QA model when no override is configured.
    pub fn default_question(self) -> &'static str {
        match self {
            FieldKind::TenantName => "Who is the tenant signing the lease agreement?",
            FieldKind::LeaseDuration => "What is the duration of the lease?",
            FieldKind::RentAmount => "What is the monthly rent amount?",
            FieldKind::PropertyAddress => "What is the full address of the leased property?",
        }
    }

    /// Normalize a raw answer with the rule set for this kind.
    pub fn normalize(self, text: &str, confidence: f32, min_confidence: f32) -> NormalizedField {
        match self {
            FieldKind::TenantName => rules::clean_tenant_name(text, confidence, min_confidence),
            FieldKind::LeaseDuration => rules::clean_lease_duration(text, confidence, min_confidence),
            FieldKind::RentAmount => rules::clean_rent_amount(text, confidence, min_confidence),
            FieldKind::PropertyAddress => {
                rules::clean_property_address(text, confidence, min_confidence)
            }
        }
    }

    /// Normalize a [`RawAnswer`] produced by the QA model.
    pub fn normalize_answer(self, answer: &RawAnswer, min_confidence: f32) -> NormalizedField {
        self.normalize(&answer.text, answer.confidence, min_confidence)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no known field kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field kind: {0}")]
pub struct UnknownFieldKind(pub String);

impl FromStr for FieldKind {
    type Err = UnknownFieldKind;

    /// Accepts "tenant_name", "tenant-name", "Tenant Name" and "tenantname".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.id().replace('_', "") == key)
            .ok_or_else(|| UnknownFieldKind(s.to_string()))
    }
}

/// An answer span returned by the question-answering model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAnswer {
    /// Answer text as found in the document.
    pub text: String,
    /// Model confidence (0.0 - 1.0).
    pub confidence: f32,
}

impl RawAnswer {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Outcome category of a normalized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    /// Accepted as-is.
    Valid,
    /// Accepted, with a warning annotation.
    Flagged,
    /// Model confidence below the configured minimum.
    LowConfidence,
    /// Content failed a structural check for the field.
    Invalid,
    /// Content matched no recognized format.
    Unrecognized,
}

/// Reason attached to a field that is not plainly valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", content = "confidence", rename_all = "snake_case")]
pub enum FieldIssue {
    LowConfidence(f32),
    LandlordTerm,
    NotAName,
    ShortDuration,
    UnrecognizedDuration,
    InvalidRentAmount,
    IncompleteAddress,
    PossiblyIncompleteAddress,
}

impl FieldIssue {
    /// Status implied by this issue.
    pub fn status(&self) -> FieldStatus {
        match self {
            FieldIssue::LowConfidence(_) => FieldStatus::LowConfidence,
            FieldIssue::LandlordTerm | FieldIssue::NotAName | FieldIssue::IncompleteAddress => {
                FieldStatus::Invalid
            }
            FieldIssue::UnrecognizedDuration | FieldIssue::InvalidRentAmount => {
                FieldStatus::Unrecognized
            }
            FieldIssue::ShortDuration | FieldIssue::PossiblyIncompleteAddress => {
                FieldStatus::Flagged
            }
        }
    }

    /// Annotation text shown in parentheses.
    pub fn label(&self) -> String {
        match self {
            FieldIssue::LowConfidence(c) => format!("Low confidence: {:.2}", c),
            FieldIssue::LandlordTerm => "contains landlord-related term".to_string(),
            FieldIssue::NotAName => "not a name".to_string(),
            FieldIssue::ShortDuration => "Unusually short duration".to_string(),
            FieldIssue::UnrecognizedDuration => "Unrecognized duration format".to_string(),
            FieldIssue::InvalidRentAmount => "Invalid rent amount format".to_string(),
            FieldIssue::IncompleteAddress => "Incomplete address".to_string(),
            FieldIssue::PossiblyIncompleteAddress => "Possibly incomplete address".to_string(),
        }
    }

    /// Whether the message replaces the value instead of annotating it.
    fn replaces_value(&self) -> bool {
        matches!(self, FieldIssue::LandlordTerm | FieldIssue::NotAName)
    }
}

/// A cleaned answer with its validation status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedField {
    /// Field this value belongs to.
    pub kind: FieldKind,
    /// Cleaned value (trimmed, and reformatted where the rules allow).
    pub value: String,
    /// Validation outcome.
    pub status: FieldStatus,
    /// Annotation reason, absent for valid values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<FieldIssue>,
}

impl NormalizedField {
    /// A value that passed every check.
    pub fn valid(kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            status: FieldStatus::Valid,
            issue: None,
        }
    }

    /// A value annotated with an issue; the status follows from the issue.
    pub fn with_issue(kind: FieldKind, value: impl Into<String>, issue: FieldIssue) -> Self {
        Self {
            kind,
            value: value.into(),
            status: issue.status(),
            issue: Some(issue),
        }
    }

    /// Whether the value can be used (valid or merely flagged).
    pub fn is_accepted(&self) -> bool {
        matches!(self.status, FieldStatus::Valid | FieldStatus::Flagged)
    }

    /// Human-readable message, e.g. "12 months" or "banana (Unrecognized duration format)".
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NormalizedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.issue {
            None => f.write_str(&self.value),
            Some(issue) if issue.replaces_value() => {
                write!(f, "Invalid {} ({})", self.kind.label().to_lowercase(), issue.label())
            }
            Some(issue) => write!(f, "{} ({})", self.value, issue.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_kind_from_str() {
        assert_eq!("tenant_name".parse::<FieldKind>().unwrap(), FieldKind::TenantName);
        assert_eq!("lease-duration".parse::<FieldKind>().unwrap(), FieldKind::LeaseDuration);
        assert_eq!("Rent Amount".parse::<FieldKind>().unwrap(), FieldKind::RentAmount);
        assert_eq!("PROPERTYADDRESS".parse::<FieldKind>().unwrap(), FieldKind::PropertyAddress);
        assert!("landlord".parse::<FieldKind>().is_err());
    }

    #[test]
    fn test_field_kind_order_and_labels() {
        let labels: Vec<&str> = FieldKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            vec!["Tenant Name", "Lease Duration", "Rent Amount", "Property Address"]
        );
    }

    #[test]
    fn test_issue_status() {
        assert_eq!(FieldIssue::LowConfidence(0.1).status(), FieldStatus::LowConfidence);
        assert_eq!(FieldIssue::NotAName.status(), FieldStatus::Invalid);
        assert_eq!(FieldIssue::InvalidRentAmount.status(), FieldStatus::Unrecognized);
        assert_eq!(FieldIssue::ShortDuration.status(), FieldStatus::Flagged);
    }

    #[test]
    fn test_display_messages() {
        let field = NormalizedField::with_issue(FieldKind::TenantName, "Acme Owner LLC", FieldIssue::LandlordTerm);
        assert_eq!(field.message(), "Invalid tenant name (contains landlord-related term)");
        assert!(!field.is_accepted());

        let field = NormalizedField::with_issue(FieldKind::RentAmount, "n/a", FieldIssue::LowConfidence(0.456));
        assert_eq!(field.message(), "n/a (Low confidence: 0.46)");

        let field = NormalizedField::with_issue(FieldKind::LeaseDuration, "15 days", FieldIssue::ShortDuration);
        assert_eq!(field.message(), "15 days (Unusually short duration)");
        assert!(field.is_accepted());

        let field = NormalizedField::valid(FieldKind::PropertyAddress, "1 Elm Street Boston");
        assert_eq!(field.message(), "1 Elm Street Boston");
    }

    #[test]
    fn test_serialize_normalized_field() {
        let field = NormalizedField::with_issue(FieldKind::LeaseDuration, "banana", FieldIssue::UnrecognizedDuration);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["kind"], "lease_duration");
        assert_eq!(json["status"], "unrecognized");
        assert_eq!(json["issue"]["code"], "unrecognized_duration");
    }
}
