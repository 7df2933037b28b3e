//! Volume data container for EKOP PIN estimation.
//!
//! Purpose
//! -------
//! Provide a small, validated container for per-period buy and sell trade
//! counts consumed by the EKOP likelihood. Validation and the per-count
//! log-factorials are computed once at construction so the likelihood can be
//! evaluated many times by the optimizer without repeating that work.
//!
//! Key behaviors
//! -------------
//! - [`VolumeSeries::new`] enforces equal, non-zero lengths.
//! - [`VolumeSeries::from_classified_trades`] aggregates trade-level
//!   directions into per-period counts, one period per distinct label.
//! - `ln Γ(k + 1)` is cached for every buy and sell count.
//!
//! Invariants & assumptions
//! ------------------------
//! - `buys.len() == sells.len() ≥ 1`.
//! - Counts are non-negative by type (`u64`).
//! - Cached log-factorials are finite and `≥ 0`.
//!
//! Conventions
//! -----------
//! - Index `i` is the trading period (typically one day); 0-based.
//! - Fields are private; the series is immutable after construction.
//!
//! Downstream usage
//! ----------------
//! - `pin::core::likelihood` reads counts and cached log-factorials through
//!   the accessors.
//! - `EKOPModel` uses `VolumeSeries` as its `LogLikelihood::Data`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction failures, the log-factorial cache, and
//!   aggregation from classified trades.
use crate::{
    measures::trade_direction::TradeDirection,
    pin::{
        core::validation::validate_counts,
        errors::{PinError, PinResult},
    },
};
use statrs::function::gamma::ln_gamma;
use std::collections::BTreeMap;

/// `VolumeSeries` — validated per-period buy/sell counts.
///
/// Fields
/// ------
/// - `buys`, `sells`: per-period counts of buyer- and seller-initiated
///   trades.
/// - `ln_fact_buys`, `ln_fact_sells`: `ln(b!)` and `ln(s!)` for every period,
///   computed with `statrs::function::gamma::ln_gamma`.
///
/// Performance
/// -----------
/// - Construction is O(n) with one `ln_gamma` call per count.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSeries {
    buys: Vec<u64>,
    sells: Vec<u64>,
    ln_fact_buys: Vec<f64>,
    ln_fact_sells: Vec<f64>,
}

impl VolumeSeries {
    /// Construct a validated [`VolumeSeries`] from raw counts.
    ///
    /// Parameters
    /// ----------
    /// - `buys`: `Vec<u64>`
    ///   Buyer-initiated trade counts per period.
    /// - `sells`: `Vec<u64>`
    ///   Seller-initiated trade counts per period, same length as `buys`.
    ///
    /// Errors
    /// ------
    /// - `PinError::LengthMismatch` when the lengths differ.
    /// - `PinError::EmptySeries` when both are empty.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_microstructure::pin::core::data::VolumeSeries;
    /// let series = VolumeSeries::new(vec![5, 10, 15], vec![6, 9, 14])?;
    /// assert_eq!(series.len(), 3);
    /// # Ok::<(), rust_microstructure::pin::errors::PinError>(())
    /// ```
    pub fn new(buys: Vec<u64>, sells: Vec<u64>) -> PinResult<Self> {
        validate_counts(&buys, &sells)?;
        let ln_fact_buys = buys.iter().map(|&b| ln_factorial(b)).collect();
        let ln_fact_sells = sells.iter().map(|&s| ln_factorial(s)).collect();
        Ok(VolumeSeries { buys, sells, ln_fact_buys, ln_fact_sells })
    }

    /// Aggregate classified trades into per-period counts.
    ///
    /// Parameters
    /// ----------
    /// - `periods`: `&[usize]`
    ///   Period label of each trade (a day number, a timestamp bucket, …).
    ///   Labels need not be contiguous or start at 0.
    /// - `directions`: `&[TradeDirection]`
    ///   Direction of each trade; `Undetermined` trades are ignored.
    ///
    /// Returns
    /// -------
    /// One period per distinct label, in ascending label order. A label whose
    /// trades are all `Undetermined` yields a zero/zero period; labels that
    /// never occur do not create periods.
    ///
    /// Errors
    /// ------
    /// - `PinError::PeriodIndexLength` when the inputs differ in length.
    /// - `PinError::EmptySeries` when there are no trades.
    pub fn from_classified_trades(
        periods: &[usize], directions: &[TradeDirection],
    ) -> PinResult<Self> {
        if periods.len() != directions.len() {
            return Err(PinError::PeriodIndexLength {
                periods: periods.len(),
                directions: directions.len(),
            });
        }
        // Dense storage is sized by the number of distinct labels, never by
        // the label values themselves.
        let mut counts: BTreeMap<usize, (u64, u64)> = BTreeMap::new();
        for (&period, direction) in periods.iter().zip(directions) {
            let (buys, sells) = counts.entry(period).or_default();
            match direction {
                TradeDirection::Buy => *buys += 1,
                TradeDirection::Sell => *sells += 1,
                TradeDirection::Undetermined => {}
            }
        }
        let (buys, sells) = counts.into_values().unzip();
        VolumeSeries::new(buys, sells)
    }

    /// Number of trading periods.
    pub fn len(&self) -> usize {
        self.buys.len()
    }

    /// Always `false` for a constructed series; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.buys.is_empty()
    }

    pub fn buys(&self) -> &[u64] {
        &self.buys
    }

    pub fn sells(&self) -> &[u64] {
        &self.sells
    }

    /// Cached `ln(b!)` per period.
    pub fn ln_fact_buys(&self) -> &[f64] {
        &self.ln_fact_buys
    }

    /// Cached `ln(s!)` per period.
    pub fn ln_fact_sells(&self) -> &[f64] {
        &self.ln_fact_sells
    }

    /// Iterate periods as `(b, s, ln b!, ln s!)`.
    pub fn periods(&self) -> impl Iterator<Item = (u64, u64, f64, f64)> + '_ {
        self.buys
            .iter()
            .zip(&self.sells)
            .zip(self.ln_fact_buys.iter().zip(&self.ln_fact_sells))
            .map(|((&b, &s), (&lfb, &lfs))| (b, s, lfb, lfs))
    }
}

/// `ln(k!) = ln Γ(k + 1)`.
fn ln_factorial(k: u64) -> f64 {
    ln_gamma(k as f64 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `VolumeSeries::new` happy path and validation failures.
    // - The cached log-factorials.
    // - Aggregation of classified trades into per-period counts.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Valid counts are stored unchanged with matching log-factorials.
    //
    // Given
    // -----
    // - buys = [0, 1, 5], sells = [3, 0, 10].
    //
    // Expect
    // ------
    // - ln(0!) = ln(1!) = 0, ln(5!) = ln 120, ln(10!) = ln 3628800.
    fn new_caches_log_factorials() {
        // Arrange
        let series = VolumeSeries::new(vec![0, 1, 5], vec![3, 0, 10]).expect("valid series");

        // Assert
        assert_eq!(series.len(), 3);
        assert_eq!(series.buys(), &[0, 1, 5]);
        assert_eq!(series.sells(), &[3, 0, 10]);
        assert_relative_eq!(series.ln_fact_buys()[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(series.ln_fact_buys()[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(series.ln_fact_buys()[2], 120.0_f64.ln(), max_relative = 1e-10);
        assert_relative_eq!(series.ln_fact_sells()[0], 6.0_f64.ln(), max_relative = 1e-10);
        assert_relative_eq!(series.ln_fact_sells()[2], 3_628_800.0_f64.ln(), max_relative = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Invalid shapes are rejected at construction.
    //
    // Given
    // -----
    // - Lengths 3 vs 2, then two empty vectors.
    //
    // Expect
    // ------
    // - `LengthMismatch`, then `EmptySeries`.
    fn new_rejects_mismatched_and_empty_inputs() {
        assert_eq!(
            VolumeSeries::new(vec![1, 2, 3], vec![1, 2]),
            Err(PinError::LengthMismatch { buys: 3, sells: 2 })
        );
        assert_eq!(VolumeSeries::new(vec![], vec![]), Err(PinError::EmptySeries));
    }

    #[test]
    // Purpose
    // -------
    // Classified trades are counted per period; undetermined trades drop out.
    //
    // Given
    // -----
    // - Trades in periods [0, 0, 0, 2, 2, 1] with directions
    //   [Buy, Sell, Undetermined, Buy, Buy, Undetermined].
    //
    // Expect
    // ------
    // - Periods ordered by label; period 1 (undetermined only) is zero/zero:
    //   buys = [1, 0, 2], sells = [1, 0, 0].
    fn from_classified_trades_counts_per_period() {
        use TradeDirection::*;
        let periods = [0, 0, 0, 2, 2, 1];
        let directions = [Buy, Sell, Undetermined, Buy, Buy, Undetermined];

        let series =
            VolumeSeries::from_classified_trades(&periods, &directions).expect("valid trades");

        assert_eq!(series.buys(), &[1, 0, 2]);
        assert_eq!(series.sells(), &[1, 0, 0]);
    }

    #[test]
    // Purpose
    // -------
    // Aggregation validates its inputs.
    //
    // Given
    // -----
    // - 2 periods vs 1 direction; then no trades at all.
    //
    // Expect
    // ------
    // - `PeriodIndexLength`, then `EmptySeries`.
    fn from_classified_trades_rejects_bad_inputs() {
        assert_eq!(
            VolumeSeries::from_classified_trades(&[0, 1], &[TradeDirection::Buy]),
            Err(PinError::PeriodIndexLength { periods: 2, directions: 1 })
        );
        assert_eq!(VolumeSeries::from_classified_trades(&[], &[]), Err(PinError::EmptySeries));
    }

    #[test]
    // Purpose
    // -------
    // Sparse and extreme labels are compacted instead of sizing storage by
    // the label value.
    //
    // Given
    // -----
    // - A single buy labelled `usize::MAX`.
    // - Timestamp-like labels [1_000_000_000_000, 7, 1_000_000_000_000] with
    //   directions [Sell, Buy, Buy].
    //
    // Expect
    // ------
    // - One period with buys = [1], sells = [0].
    // - Two periods ordered by label: buys = [1, 1], sells = [0, 1].
    fn from_classified_trades_compacts_sparse_labels() {
        use TradeDirection::*;

        let extreme = VolumeSeries::from_classified_trades(&[usize::MAX], &[Buy])
            .expect("usize::MAX is a valid label");
        let sparse = VolumeSeries::from_classified_trades(
            &[1_000_000_000_000, 7, 1_000_000_000_000],
            &[Sell, Buy, Buy],
        )
        .expect("sparse labels are valid");

        assert_eq!(extreme.buys(), &[1]);
        assert_eq!(extreme.sells(), &[0]);
        assert_eq!(sparse.buys(), &[1, 1]);
        assert_eq!(sparse.sells(), &[0, 1]);
    }
}
