//! Rule-based normalizers for question-answering output on leases.
//!
//! Every normalizer takes `(text, confidence, min_confidence)` and never
//! fails: problems are reported through the [`NormalizedField`] status and
//! issue. The confidence check always runs first.

pub mod address;
pub mod duration;
pub mod patterns;
pub mod rent;
pub mod tenant;

pub use address::clean_property_address;
pub use duration::clean_lease_duration;
pub use rent::{clean_rent_amount, format_currency};
pub use tenant::clean_tenant_name;

use crate::models::field::{FieldIssue, FieldKind, NormalizedField};

/// Returns the low-confidence result when `confidence` is under the threshold.
fn check_confidence(
    kind: FieldKind,
    text: &str,
    confidence: f32,
    min_confidence: f32,
) -> Option<NormalizedField> {
    (confidence < min_confidence)
        .then(|| NormalizedField::with_issue(kind, text, FieldIssue::LowConfidence(confidence)))
}

/// True for a non-empty string made only of digits.
fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_numeric())
}
