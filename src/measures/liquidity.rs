//! measures::liquidity — quoted and effective bid–ask spreads.
//!
//! Both measures are sample means over trades, computed with
//! `statrs::statistics::Statistics`. Inputs must be non-empty, finite and of
//! equal length.
use crate::measures::{
    errors::MeasureResult,
    trade_direction::TradeDirection,
    validation::{validate_same_length, validate_series},
};
use statrs::statistics::Statistics;

/// Mean quoted spread, `mean(ask − bid)`.
///
/// Errors
/// ------
/// - `MeasureError::EmptyInput`, `LengthMismatch` or `NonFiniteInput`.
pub fn quoted_spread(asks: &[f64], bids: &[f64]) -> MeasureResult<f64> {
    validate_series(asks)?;
    validate_series(bids)?;
    validate_same_length(asks.len(), &[bids.len()])?;
    Ok(asks.iter().zip(bids).map(|(ask, bid)| ask - bid).mean())
}

/// Mean effective spread, `mean(2·sign·(price − mid))` with
/// `mid = (bid + ask) / 2`.
///
/// `Undetermined` trades have sign 0 and contribute zero while still counting
/// towards the mean.
///
/// Errors
/// ------
/// - `MeasureError::EmptyInput`, `LengthMismatch` or `NonFiniteInput`.
///
/// Examples
/// --------
/// ```rust
/// # use rust_microstructure::measures::{liquidity::effective_spread, trade_direction::TradeDirection::*};
/// let s = effective_spread(&[100.2, 99.9], &[99.9, 99.8], &[100.1, 100.0], &[Buy, Sell])?;
/// assert!((s - 0.2).abs() < 1e-9);
/// # Ok::<(), rust_microstructure::measures::errors::MeasureError>(())
/// ```
pub fn effective_spread(
    prices: &[f64], bids: &[f64], asks: &[f64], directions: &[TradeDirection],
) -> MeasureResult<f64> {
    validate_series(prices)?;
    validate_series(bids)?;
    validate_series(asks)?;
    validate_same_length(prices.len(), &[bids.len(), asks.len(), directions.len()])?;
    Ok(prices
        .iter()
        .zip(bids.iter().zip(asks))
        .zip(directions)
        .map(|((&price, (&bid, &ask)), direction)| {
            let mid = (bid + ask) / 2.0;
            2.0 * f64::from(direction.sign()) * (price - mid)
        })
        .mean())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measures::errors::MeasureError;
    use crate::measures::trade_direction::TradeDirection::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover closed-form spread values and input validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Quoted spread is the mean ask–bid gap.
    //
    // Given
    // -----
    // - asks [100.1, 100.0, 100.2], bids [99.9, 99.8, 100.0].
    //
    // Expect
    // ------
    // - 0.2.
    fn quoted_spread_is_mean_gap() {
        let spread = quoted_spread(&[100.1, 100.0, 100.2], &[99.9, 99.8, 100.0]).expect("valid");

        assert_relative_eq!(spread, 0.2, max_relative = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Effective spread signs the distance to the midquote.
    //
    // Given
    // -----
    // - prices [100.2, 99.9, 100.4], quotes as above, directions [Buy, Sell, Buy].
    //
    // Expect
    // ------
    // - mean(0.4, 0.0, 0.6) = 1/3.
    fn effective_spread_matches_closed_form() {
        let spread = effective_spread(
            &[100.2, 99.9, 100.4],
            &[99.9, 99.8, 100.0],
            &[100.1, 100.0, 100.2],
            &[Buy, Sell, Buy],
        )
        .expect("valid");

        assert_relative_eq!(spread, 1.0 / 3.0, max_relative = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Mismatched inputs are rejected.
    //
    // Given
    // -----
    // - Two prices but one direction.
    //
    // Expect
    // ------
    // - `LengthMismatch { expected: 2, actual: 1 }`.
    fn effective_spread_rejects_mismatched_directions() {
        let err = effective_spread(&[1.0, 2.0], &[0.5, 1.5], &[1.5, 2.5], &[Buy]).expect_err("mismatch");

        assert_eq!(err, MeasureError::LengthMismatch { expected: 2, actual: 1 });
    }
}
