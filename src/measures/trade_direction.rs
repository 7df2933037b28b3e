//! measures::trade_direction — trade-sign classification.
//!
//! Purpose
//! -------
//! Infer whether each transaction was buyer- or seller-initiated from prices
//! alone (tick test) or from prices and prevailing quotes (Lee–Ready). The
//! resulting directions feed the effective spread and the per-period buy/sell
//! counts used by PIN estimation.
//!
//! Key behaviors
//! -------------
//! - [`tick_direction`]: uptick → Buy, downtick → Sell. A zero tick takes the
//!   sign of the previous price change when `i ≥ 2`; if that change is also
//!   zero, or if `i == 1`, the previous direction is carried forward. The
//!   first trade is always `Undetermined`.
//! - [`lee_ready_direction`]: above the midquote → Buy, below → Sell, at the
//!   midquote → tick-test direction.
//!
//! Conventions
//! -----------
//! - Directions are [`TradeDirection`] values; [`TradeDirection::sign`]
//!   gives the numeric `{+1, −1, 0}` encoding used by spread formulas.
//! - Price inputs must be finite.
//!
//! Testing notes
//! -------------
//! - Unit tests reproduce reference classifications, including a zero tick
//!   directly after the first trade.
use crate::measures::{
    errors::MeasureResult,
    validation::{validate_same_length, validate_series},
};
use std::cmp::Ordering;

/// Inferred initiator of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TradeDirection {
    Buy,
    Sell,
    #[default]
    Undetermined,
}

impl TradeDirection {
    /// `+1` for `Buy`, `−1` for `Sell`, `0` for `Undetermined`.
    pub fn sign(self) -> i8 {
        match self {
            TradeDirection::Buy => 1,
            TradeDirection::Sell => -1,
            TradeDirection::Undetermined => 0,
        }
    }

    /// Inverse of [`TradeDirection::sign`]: positive → `Buy`, negative →
    /// `Sell`, zero → `Undetermined`.
    pub fn from_sign(sign: i64) -> TradeDirection {
        match sign.cmp(&0) {
            Ordering::Greater => TradeDirection::Buy,
            Ordering::Less => TradeDirection::Sell,
            Ordering::Equal => TradeDirection::Undetermined,
        }
    }

    /// Direction implied by a price change: up → `Buy`, down → `Sell`,
    /// unchanged → `None`.
    fn from_change(current: f64, previous: f64) -> Option<TradeDirection> {
        match current.partial_cmp(&previous) {
            Some(Ordering::Greater) => Some(TradeDirection::Buy),
            Some(Ordering::Less) => Some(TradeDirection::Sell),
            _ => None,
        }
    }
}

/// Classify trades with the tick test.
///
/// Parameters
/// ----------
/// - `prices`: `&[f64]`
///   Transaction prices in time order. Non-empty and finite.
///
/// Returns
/// -------
/// `MeasureResult<Vec<TradeDirection>>` of the same length as `prices`,
/// with `Undetermined` at index 0.
///
/// Errors
/// ------
/// - `MeasureError::EmptyInput` / `MeasureError::NonFiniteInput`.
///
/// Examples
/// --------
/// ```rust
/// # use rust_microstructure::measures::trade_direction::{tick_direction, TradeDirection::*};
/// let dirs = tick_direction(&[100.0, 101.0, 101.0, 100.0])?;
/// assert_eq!(dirs, vec![Undetermined, Buy, Buy, Sell]);
/// # Ok::<(), rust_microstructure::measures::errors::MeasureError>(())
/// ```
pub fn tick_direction(prices: &[f64]) -> MeasureResult<Vec<TradeDirection>> {
    validate_series(prices)?;
    let mut directions = Vec::with_capacity(prices.len());
    directions.push(TradeDirection::Undetermined);
    for i in 1..prices.len() {
        let previous = directions[i - 1];
        let direction = TradeDirection::from_change(prices[i], prices[i - 1])
            .or_else(|| {
                (i >= 2).then(|| TradeDirection::from_change(prices[i - 1], prices[i - 2])).flatten()
            })
            .unwrap_or(previous);
        directions.push(direction);
    }
    Ok(directions)
}

/// Classify trades with the Lee–Ready algorithm.
///
/// Parameters
/// ----------
/// - `prices`, `bids`, `asks`: `&[f64]`
///   Transaction prices and the quotes prevailing at each trade. Equal,
///   non-zero lengths; finite values.
///
/// Returns
/// -------
/// One [`TradeDirection`] per trade: quote rule first, tick test at the
/// midquote.
///
/// Errors
/// ------
/// - `MeasureError::EmptyInput` if any input is empty.
/// - `MeasureError::LengthMismatch` if lengths differ.
/// - `MeasureError::NonFiniteInput` for NaN/±∞ values.
pub fn lee_ready_direction(
    prices: &[f64], bids: &[f64], asks: &[f64],
) -> MeasureResult<Vec<TradeDirection>> {
    validate_series(prices)?;
    validate_series(bids)?;
    validate_series(asks)?;
    validate_same_length(prices.len(), &[bids.len(), asks.len()])?;
    let ticks = tick_direction(prices)?;
    Ok(prices
        .iter()
        .zip(bids.iter().zip(asks))
        .zip(ticks)
        .map(|((&price, (&bid, &ask)), tick)| {
            let mid = (bid + ask) / 2.0;
            TradeDirection::from_change(price, mid).unwrap_or(tick)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::TradeDirection::*;
    use super::*;
    use crate::measures::errors::MeasureError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Tick-test classification including zero-uptick/zero-downtick rules.
    // - Lee–Ready quote rule with tick-test fallback.
    // - Sign encoding and input validation.
    // -------------------------------------------------------------------------

    fn signs(dirs: &[TradeDirection]) -> Vec<i8> {
        dirs.iter().map(|d| d.sign()).collect()
    }

    #[test]
    // Purpose
    // -------
    // The tick test reproduces the reference classification.
    //
    // Given
    // -----
    // - prices = [100, 101, 101, 100, 100, 99, 100].
    //
    // Expect
    // ------
    // - signs = [0, 1, 1, -1, -1, -1, 1].
    fn tick_direction_matches_reference_sequence() {
        let prices = [100.0, 101.0, 101.0, 100.0, 100.0, 99.0, 100.0];

        let dirs = tick_direction(&prices).expect("valid prices");

        assert_eq!(signs(&dirs), vec![0, 1, 1, -1, -1, -1, 1]);
    }

    #[test]
    // Purpose
    // -------
    // Zero ticks carry the previous direction when the prior change is also
    // zero, and at index 1.
    //
    // Given
    // -----
    // - [100, 100, 101, 101, 101].
    //
    // Expect
    // ------
    // - [Undetermined, Undetermined, Buy, Buy, Buy].
    fn tick_direction_propagates_through_repeated_zero_ticks() {
        let dirs = tick_direction(&[100.0, 100.0, 101.0, 101.0, 101.0]).expect("valid prices");

        assert_eq!(dirs, vec![Undetermined, Undetermined, Buy, Buy, Buy]);
    }

    #[test]
    // Purpose
    // -------
    // Lee–Ready uses quotes away from the midquote and the tick test at it.
    //
    // Given
    // -----
    // - prices [100, 101, 100, 99, 100], bids [99.5, 100.5, 99.5, 98.5, 99.5],
    //   asks = bids + 1 (every trade at the midquote).
    //
    // Expect
    // ------
    // - signs = [0, 1, -1, -1, 1].
    fn lee_ready_matches_reference_sequence() {
        let prices = [100.0, 101.0, 100.0, 99.0, 100.0];
        let bids = [99.5, 100.5, 99.5, 98.5, 99.5];
        let asks = [100.5, 101.5, 100.5, 99.5, 100.5];

        let dirs = lee_ready_direction(&prices, &bids, &asks).expect("valid inputs");

        assert_eq!(signs(&dirs), vec![0, 1, -1, -1, 1]);
    }

    #[test]
    // Purpose
    // -------
    // The quote rule overrides the tick test away from the midquote.
    //
    // Given
    // -----
    // - An uptick trade printed at the bid.
    //
    // Expect
    // ------
    // - Sell.
    fn lee_ready_quote_rule_overrides_tick() {
        let dirs = lee_ready_direction(&[100.0, 100.5], &[99.0, 100.5], &[101.0, 101.5])
            .expect("valid inputs");

        assert_eq!(dirs, vec![Undetermined, Sell]);
    }

    #[test]
    // Purpose
    // -------
    // Invalid inputs are rejected.
    //
    // Given
    // -----
    // - Empty prices; mismatched quote lengths.
    //
    // Expect
    // ------
    // - `EmptyInput` and `LengthMismatch`.
    fn classification_rejects_invalid_inputs() {
        assert_eq!(tick_direction(&[]), Err(MeasureError::EmptyInput));
        assert_eq!(
            lee_ready_direction(&[1.0, 2.0], &[1.0], &[2.0, 3.0]),
            Err(MeasureError::LengthMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    // Purpose
    // -------
    // `from_sign` inverts `sign`.
    //
    // Given
    // -----
    // - Signs 3, -1, 0.
    //
    // Expect
    // ------
    // - Buy, Sell, Undetermined.
    fn from_sign_inverts_sign() {
        assert_eq!(TradeDirection::from_sign(3), Buy);
        assert_eq!(TradeDirection::from_sign(-1), Sell);
        assert_eq!(TradeDirection::from_sign(0), Undetermined);
        assert_eq!(TradeDirection::from_sign(Buy.sign() as i64), Buy);
    }
}
