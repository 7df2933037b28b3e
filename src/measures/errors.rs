//! measures::errors — error type for closed-form market measures.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by trade classification,
//! spread, volatility and investment formulas, together with the conversion
//! to Python exceptions used by the bindings.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of the violated domain constraint.
//! - The Python conversion maps every variant to `ValueError`, keeping the
//!   `Display` text verbatim.
//!
//! Testing notes
//! -------------
//! - Unit tests check that messages embed their payloads.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type MeasureResult<T> = Result<T, MeasureError>;

/// MeasureError — input and domain failures of the measure formulas.
///
/// Variants
/// --------
/// - `EmptyInput`: a required array is empty.
/// - `LengthMismatch { expected, actual }`: parallel arrays differ in length.
/// - `InsufficientData { needed, actual }`: too few observations for the
///   statistic (e.g. Roll needs three prices).
/// - `NonPositiveInput { name, value }`: a value that must be `> 0` is not.
/// - `NonFiniteInput { index, value }`: NaN/±∞ in an input array.
/// - `ZeroCost`: ROI with a zero investment cost.
/// - `ZeroStdDev`: Sharpe ratio of returns with zero dispersion.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureError {
    //------ Input validation errors ------
    EmptyInput,
    LengthMismatch { expected: usize, actual: usize },
    InsufficientData { needed: usize, actual: usize },
    NonPositiveInput { name: &'static str, value: f64 },
    NonFiniteInput { index: usize, value: f64 },

    //------ Domain errors ------
    ZeroCost,
    ZeroStdDev,
}

impl std::error::Error for MeasureError {}

impl std::fmt::Display for MeasureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasureError::EmptyInput => write!(f, "Input arrays cannot be empty."),
            MeasureError::LengthMismatch { expected, actual } => {
                write!(f, "All input arrays must have the same length: expected {expected}, got {actual}")
            }
            MeasureError::InsufficientData { needed, actual } => {
                write!(f, "Need at least {needed} observations; got {actual}")
            }
            MeasureError::NonPositiveInput { name, value } => {
                write!(f, "Invalid {name}: {value}. Must be strictly positive.")
            }
            MeasureError::NonFiniteInput { index, value } => {
                write!(f, "Invalid value {value} at index {index}. Must be a finite number.")
            }
            MeasureError::ZeroCost => write!(f, "Cost of investment cannot be zero."),
            MeasureError::ZeroStdDev => write!(f, "Standard deviation of returns is zero."),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<MeasureError> for PyErr {
    fn from(err: MeasureError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover `Display` formatting and payload embedding.
    //
    // They intentionally DO NOT cover the `PyErr` conversion, which needs the
    // Python C API.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Payload values appear in the messages.
    //
    // Given
    // -----
    // - `LengthMismatch { 5, 4 }` and `NonPositiveInput { "periods", -1 }`.
    //
    // Expect
    // ------
    // - Messages contain "5", "4", "periods" and "-1".
    fn measure_error_messages_embed_payloads() {
        let mismatch = MeasureError::LengthMismatch { expected: 5, actual: 4 }.to_string();
        let non_pos = MeasureError::NonPositiveInput { name: "periods", value: -1.0 }.to_string();

        assert!(mismatch.contains('5') && mismatch.contains('4'));
        assert!(non_pos.contains("periods") && non_pos.contains("-1"));
    }

    #[test]
    // Purpose
    // -------
    // Unit variants still produce readable messages.
    //
    // Given
    // -----
    // - `ZeroCost`, `ZeroStdDev`, `EmptyInput`.
    //
    // Expect
    // ------
    // - Non-empty messages.
    fn unit_variants_have_nonempty_messages() {
        for err in [MeasureError::ZeroCost, MeasureError::ZeroStdDev, MeasureError::EmptyInput] {
            assert!(!err.to_string().trim().is_empty());
        }
    }
}
