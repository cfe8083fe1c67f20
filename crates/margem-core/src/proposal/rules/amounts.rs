//! Monetary value normalization.

use crate::models::proposal::FieldKey;

/// Strip currency markers (`R$`) and whitespace from a raw monetary
/// capture, keeping the decimal-comma / thousands-dot text unchanged.
///
/// Missing or empty input normalizes to the monetary sentinel `"0,00"`.
/// The value stays a display string; no numeric reinterpretation happens.
pub fn normalize_currency(raw: Option<&str>) -> String {
    let cleaned: String = raw
        .unwrap_or("")
        .chars()
        .filter(|c| !matches!(c, 'R' | '$') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        FieldKey::LoanValue.default_value().to_string()
    } else {
        cleaned
    }
}
