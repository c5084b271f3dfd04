//! Lease extraction results.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{FieldKind, NormalizedField, RawAnswer};

/// Marker shown for a field whose answer could not be produced.
pub const ERROR_MARKER: &str = "Error";

/// Outcome of extracting one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FieldOutcome {
    /// The model answered and the answer was normalized.
    Extracted {
        /// Raw model answer.
        answer: RawAnswer,
        /// Normalized result.
        field: NormalizedField,
    },
    /// The model failed for this field.
    Failed {
        /// Field that failed.
        kind: FieldKind,
        /// Error description.
        error: String,
    },
}

impl FieldOutcome {
    /// Field this outcome belongs to.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldOutcome::Extracted { field, .. } => field.kind,
            FieldOutcome::Failed { kind, .. } => *kind,
        }
    }

    /// Normalized field, if extraction succeeded.
    pub fn field(&self) -> Option<&NormalizedField> {
        match self {
            FieldOutcome::Extracted { field, .. } => Some(field),
            FieldOutcome::Failed { .. } => None,
        }
    }

    /// Display message, or the error marker for failed fields.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FieldOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldOutcome::Extracted { field, .. } => write!(f, "{}", field),
            FieldOutcome::Failed { .. } => f.write_str(ERROR_MARKER),
        }
    }
}

/// How the document text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Embedded PDF text.
    TextPdf,
    /// OCR over page images.
    ScannedPdf,
    /// Plain text handed in directly.
    Text,
    #[default]
    Unknown,
}

/// Processing metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadMetadata {
    /// When the record was produced.
    pub processed_at: DateTime<Utc>,
    /// Total processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Number of characters of document text.
    pub text_length: usize,
}

/// All fields extracted from one lease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseRecord {
    /// Source document, if read from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// How the text was obtained.
    pub source_type: SourceType,
    /// One outcome per field kind, in extraction order.
    pub fields: Vec<FieldOutcome>,
    /// Processing metadata.
    pub metadata: ReadMetadata,
}

impl LeaseRecord {
    /// Outcome for a field kind.
    pub fn get(&self, kind: FieldKind) -> Option<&FieldOutcome> {
        self.fields.iter().find(|o| o.kind() == kind)
    }

    /// Value of a field when it was accepted (valid or flagged).
    pub fn value(&self, kind: FieldKind) -> Option<&str> {
        self.get(kind)
            .and_then(FieldOutcome::field)
            .filter(|f| f.is_accepted())
            .map(|f| f.value.as_str())
    }

    /// Describe every field that is not plainly valid.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for outcome in &self.fields {
            match outcome {
                FieldOutcome::Failed { kind, error } => {
                    issues.push(format!("{}: {}", kind, error));
                }
                FieldOutcome::Extracted { field, .. } => {
                    if let Some(issue) = &field.issue {
                        issues.push(format!("{}: {}", field.kind, issue.label()));
                    }
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::{FieldIssue, FieldStatus};
    use pretty_assertions::assert_eq;

    fn record() -> LeaseRecord {
        LeaseRecord {
            source: None,
            source_type: SourceType::Text,
            fields: vec![
                FieldOutcome::Extracted {
                    answer: RawAnswer::new("Jane Roe", 0.9),
                    field: NormalizedField::valid(FieldKind::TenantName, "Jane Roe"),
                },
                FieldOutcome::Extracted {
                    answer: RawAnswer::new("10 days", 0.8),
                    field: NormalizedField::with_issue(
                        FieldKind::LeaseDuration,
                        "10 days",
                        FieldIssue::ShortDuration,
                    ),
                },
                FieldOutcome::Failed {
                    kind: FieldKind::RentAmount,
                    error: "inference failed: boom".to_string(),
                },
                FieldOutcome::Extracted {
                    answer: RawAnswer::new("Elm", 0.1),
                    field: NormalizedField::with_issue(
                        FieldKind::PropertyAddress,
                        "Elm",
                        FieldIssue::LowConfidence(0.1),
                    ),
                },
            ],
            metadata: ReadMetadata {
                processed_at: Utc::now(),
                processing_time_ms: 3,
                text_length: 120,
            },
        }
    }

    #[test]
    fn test_failed_field_shows_error_marker() {
        let record = record();
        assert_eq!(record.get(FieldKind::RentAmount).unwrap().message(), "Error");
        assert_eq!(
            record.get(FieldKind::LeaseDuration).unwrap().message(),
            "10 days (Unusually short duration)"
        );
    }

    #[test]
    fn test_value_only_for_accepted_fields() {
        let record = record();
        assert_eq!(record.value(FieldKind::TenantName), Some("Jane Roe"));
        assert_eq!(record.value(FieldKind::LeaseDuration), Some("10 days"));
        assert_eq!(record.value(FieldKind::RentAmount), None);
        assert_eq!(record.value(FieldKind::PropertyAddress), None);
    }

    #[test]
    fn test_issues() {
        let issues = record().issues();
        assert_eq!(
            issues,
            vec![
                "Lease Duration: Unusually short duration".to_string(),
                "Rent Amount: inference failed: boom".to_string(),
                "Property Address: Low confidence: 0.10".to_string(),
            ]
        );
    }

    #[test]
    fn test_serialize_outcomes() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["source_type"], "text");
        assert_eq!(json["fields"][0]["outcome"], "extracted");
        assert_eq!(json["fields"][0]["field"]["status"], "valid");
        assert_eq!(json["fields"][2]["outcome"], "failed");
        assert_eq!(json["fields"][2]["kind"], "rent_amount");

        let status = record().fields[3].field().unwrap().status;
        assert_eq!(status, FieldStatus::LowConfidence);
    }
}
