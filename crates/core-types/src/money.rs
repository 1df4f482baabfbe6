//! Display-formatted currency text to numeric amount conversion.

use thiserror::Error;

/// Comparison tolerance for display-rounded amounts.
pub const DISPLAY_TOLERANCE: f64 = 0.01;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Nothing numeric survived stripping the decoration.
    #[error("no digits in amount text {0:?}")]
    Empty(String),
    /// The stripped text is not a single valid number.
    #[error("malformed amount {stripped:?} (from {raw:?})")]
    Malformed { raw: String, stripped: String },
}

/// Convert display-formatted currency text into a numeric amount.
///
/// Currency symbols, thousands separators, whitespace and surrounding
/// markup are discarded; exactly one decimal separator is expected in what
/// remains. A string with no digits is an error, never a silent zero.
pub fn parse_amount(text: &str) -> Result<f64, AmountError> {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if !stripped.bytes().any(|b| b.is_ascii_digit()) {
        return Err(AmountError::Empty(text.to_string()));
    }
    if stripped.matches('.').count() > 1 {
        return Err(AmountError::Malformed {
            raw: text.to_string(),
            stripped,
        });
    }

    stripped.parse::<f64>().map_err(|_| AmountError::Malformed {
        raw: text.to_string(),
        stripped: stripped.clone(),
    })
}

/// Equality within the display rounding tolerance.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= DISPLAY_TOLERANCE
}
