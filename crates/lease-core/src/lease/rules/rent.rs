//! Rent amount normalization.

use super::check_confidence;
use super::patterns::RENT_AMOUNT;
use crate::models::field::{FieldIssue, FieldKind, NormalizedField};

/// Clean a rent answer into US currency format (`$1,200.00`).
///
/// The first number in the answer is taken as the amount.
pub fn clean_rent_amount(text: &str, confidence: f32, min_confidence: f32) -> NormalizedField {
    let kind = FieldKind::RentAmount;
    let answer = text.trim();

    if let Some(low) = check_confidence(kind, answer, confidence, min_confidence) {
        return low;
    }

    match parse_rent_amount(answer) {
        Some(amount) => NormalizedField::valid(kind, format_currency(amount)),
        None => NormalizedField::with_issue(kind, answer, FieldIssue::InvalidRentAmount),
    }
}

/// Parse the first amount in the text, ignoring thousands separators.
///
/// Returns `None` when nothing matches, the match has no digits (a lone
/// comma, for instance) or the amount overflows to infinity.
pub fn parse_rent_amount(text: &str) -> Option<f64> {
    let caps = RENT_AMOUNT.captures(text)?;
    let digits = caps[1].replace(',', "");
    digits.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

/// Format as dollars with thousands separators and two decimals.
///
/// Rounding works on the exact binary value, so `2.675` becomes `$2.67`.
pub fn format_currency(amount: f64) -> String {
    let s = format!("{:.2}", amount);
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("${}.{}", grouped, decimal_part)
}
