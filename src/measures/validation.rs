//! measures::validation — shared input guards for the measure formulas.
//!
//! Purpose
//! -------
//! Centralize the emptiness, length and finiteness checks used by trade
//! classification, spreads and volatility so each formula starts from the
//! same preconditions and reports the same [`MeasureError`] variants.
//!
//! Conventions
//! -----------
//! - Helpers are pure and return [`MeasureResult`]; the first violation wins.
use crate::measures::errors::{MeasureError, MeasureResult};

/// Require a non-empty slice of finite values.
///
/// Errors
/// ------
/// - `MeasureError::EmptyInput` for an empty slice.
/// - `MeasureError::NonFiniteInput` at the first NaN/±∞.
pub fn validate_series(data: &[f64]) -> MeasureResult<()> {
    if data.is_empty() {
        return Err(MeasureError::EmptyInput);
    }
    for (index, &value) in data.iter().enumerate() {
        if !value.is_finite() {
            return Err(MeasureError::NonFiniteInput { index, value });
        }
    }
    Ok(())
}

/// Require every slice in `others` to have the length of `reference`.
///
/// Errors
/// ------
/// - `MeasureError::LengthMismatch` naming the first differing length.
pub fn validate_same_length(reference: usize, others: &[usize]) -> MeasureResult<()> {
    match others.iter().find(|&&len| len != reference) {
        Some(&actual) => Err(MeasureError::LengthMismatch { expected: reference, actual }),
        None => Ok(()),
    }
}

/// Require at least `needed` observations.
///
/// Errors
/// ------
/// - `MeasureError::InsufficientData`.
pub fn validate_min_len(data: &[f64], needed: usize) -> MeasureResult<()> {
    if data.len() < needed {
        return Err(MeasureError::InsufficientData { needed, actual: data.len() });
    }
    Ok(())
}
