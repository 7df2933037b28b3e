//! PIN validation helpers — reusable checks for count series, parameters,
//! and optimizer vectors.
//!
//! Purpose
//! -------
//! Centralize the small validation routines used by the PIN core so that
//! constructors (`VolumeSeries`, `PinParams`) and the EKOP log-likelihood can
//! fail fast with structured [`PinError`] values.
//!
//! Key behaviors
//! -------------
//! - Validate that buy and sell series are non-empty and of equal length.
//! - Validate probability parameters (finite, in `[0, 1]`) and intensity
//!   parameters (finite, `≥ 0`).
//! - Validate unconstrained optimizer vectors θ before mapping to model space.
//!
//! Conventions
//! -----------
//! - Helpers return [`PinResult`] and never panic on invalid inputs.
//! - No I/O, no logging.
//!
//! Testing notes
//! -------------
//! - Unit tests exercise each helper on valid input and on each failure
//!   branch, including the `0` and `1` boundaries which are admissible.
use crate::pin::{
    core::params::NUM_PARAMS,
    errors::{PinError, PinResult},
};
use ndarray::ArrayView1;

/// Validate a pair of buy/sell count series.
///
/// Errors
/// ------
/// - `PinError::LengthMismatch` when the lengths differ (checked first, so a
///   `3`-vs-`0` input reports the mismatch rather than emptiness).
/// - `PinError::EmptySeries` when both are empty.
pub fn validate_counts(buys: &[u64], sells: &[u64]) -> PinResult<()> {
    if buys.len() != sells.len() {
        return Err(PinError::LengthMismatch { buys: buys.len(), sells: sells.len() });
    }
    if buys.is_empty() {
        return Err(PinError::EmptySeries);
    }
    Ok(())
}

/// Validate a probability parameter (α). Must be finite and in `[0, 1]`.
///
/// Errors
/// ------
/// - `PinError::InvalidParam` naming `name`, the value, and the failed rule.
pub fn validate_probability(name: &'static str, value: f64) -> PinResult<f64> {
    if !value.is_finite() {
        return Err(PinError::InvalidParam { name, value, reason: "must be finite" });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(PinError::InvalidParam { name, value, reason: "must lie in [0, 1]" });
    }
    Ok(value)
}

/// Validate an arrival-intensity parameter (μ, εb, εs). Must be finite and `≥ 0`.
///
/// Errors
/// ------
/// - `PinError::InvalidParam` naming `name`, the value, and the failed rule.
pub fn validate_intensity(name: &'static str, value: f64) -> PinResult<f64> {
    if !value.is_finite() {
        return Err(PinError::InvalidParam { name, value, reason: "must be finite" });
    }
    if value < 0.0 {
        return Err(PinError::InvalidParam { name, value, reason: "must be non-negative" });
    }
    Ok(value)
}

/// Validate an unconstrained optimizer vector θ = (θ_α, θ_μ, θ_εb, θ_εs).
///
/// Errors
/// ------
/// - `PinError::ThetaLengthMismatch` if `theta.len() != 4`.
/// - `PinError::NonFiniteTheta` for the first NaN/±∞ entry.
pub fn validate_theta(theta: ArrayView1<'_, f64>) -> PinResult<()> {
    if theta.len() != NUM_PARAMS {
        return Err(PinError::ThetaLengthMismatch { expected: NUM_PARAMS, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(PinError::NonFiniteTheta { index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Length and emptiness checks for count series.
    // - Box checks for probability and intensity parameters, boundaries included.
    // - Length and finiteness checks for θ.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Mismatched lengths are reported before emptiness.
    //
    // Given
    // -----
    // - buys of length 3 and sells of length 2; then two empty slices.
    //
    // Expect
    // ------
    // - `LengthMismatch { buys: 3, sells: 2 }`, then `EmptySeries`.
    fn validate_counts_reports_mismatch_then_empty() {
        assert_eq!(
            validate_counts(&[1, 2, 3], &[1, 2]),
            Err(PinError::LengthMismatch { buys: 3, sells: 2 })
        );
        assert_eq!(validate_counts(&[], &[]), Err(PinError::EmptySeries));
        assert_eq!(validate_counts(&[0], &[0]), Ok(()));
    }

    #[test]
    // Purpose
    // -------
    // Probability bounds are inclusive; values outside or non-finite fail.
    //
    // Given
    // -----
    // - 0, 1, 1.5 and NaN.
    //
    // Expect
    // ------
    // - Ok, Ok, InvalidParam, InvalidParam.
    fn validate_probability_accepts_closed_unit_interval() {
        assert_eq!(validate_probability("alpha", 0.0), Ok(0.0));
        assert_eq!(validate_probability("alpha", 1.0), Ok(1.0));
        assert!(matches!(
            validate_probability("alpha", 1.5),
            Err(PinError::InvalidParam { name: "alpha", .. })
        ));
        assert!(matches!(
            validate_probability("alpha", f64::NAN),
            Err(PinError::InvalidParam { reason: "must be finite", .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Intensities accept zero and reject negatives and infinities.
    //
    // Given
    // -----
    // - 0, 12.5, -1e-12 and +∞.
    //
    // Expect
    // ------
    // - Ok, Ok, InvalidParam, InvalidParam.
    fn validate_intensity_requires_non_negative_finite() {
        assert_eq!(validate_intensity("mu", 0.0), Ok(0.0));
        assert_eq!(validate_intensity("mu", 12.5), Ok(12.5));
        assert!(matches!(
            validate_intensity("eps_b", -1e-12),
            Err(PinError::InvalidParam { reason: "must be non-negative", .. })
        ));
        assert!(validate_intensity("eps_s", f64::INFINITY).is_err());
    }

    #[test]
    // Purpose
    // -------
    // θ must have four finite entries.
    //
    // Given
    // -----
    // - A length-3 vector, then [0, 0, NaN, 0].
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch`, then `NonFiniteTheta { index: 2 }`.
    fn validate_theta_checks_length_and_finiteness() {
        assert_eq!(
            validate_theta(array![0.0, 0.0, 0.0].view()),
            Err(PinError::ThetaLengthMismatch { expected: 4, actual: 3 })
        );
        assert!(matches!(
            validate_theta(array![0.0, 0.0, f64::NAN, 0.0].view()),
            Err(PinError::NonFiniteTheta { index: 2, .. })
        ));
        assert_eq!(validate_theta(array![1.0, -2.0, 3.0, 0.0].view()), Ok(()));
    }
}
