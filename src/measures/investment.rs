//! measures::investment — basic performance metrics.
//!
//! Compound growth, simple return on investment, the Sharpe ratio and the
//! volatility of log returns. Dispersion uses the population standard
//! deviation (`statrs::statistics::Statistics::population_std_dev`).
use crate::measures::{
    errors::{MeasureError, MeasureResult},
    validation::{validate_min_len, validate_series},
};
use statrs::statistics::Statistics;

/// Risk-free rate used when the caller does not supply one.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.01;

/// Compound annual growth rate, `(end / start)^(1 / periods) − 1`.
///
/// Errors
/// ------
/// - `MeasureError::NonPositiveInput` naming the first input that is not
///   strictly positive (or not finite).
///
/// Examples
/// --------
/// ```rust
/// # use rust_microstructure::measures::investment::cagr;
/// let rate = cagr(1000.0, 2000.0, 3.0)?;
/// assert!((rate - 0.259921).abs() < 1e-6);
/// # Ok::<(), rust_microstructure::measures::errors::MeasureError>(())
/// ```
pub fn cagr(start_value: f64, end_value: f64, periods: f64) -> MeasureResult<f64> {
    for (name, value) in [("start_value", start_value), ("end_value", end_value), ("periods", periods)] {
        if !(value > 0.0 && value.is_finite()) {
            return Err(MeasureError::NonPositiveInput { name, value });
        }
    }
    Ok((end_value / start_value).powf(periods.recip()) - 1.0)
}

/// Return on investment, `(gain − cost) / cost`, where `gain` is the final
/// value of the position including gains.
///
/// Errors
/// ------
/// - `MeasureError::ZeroCost` when `cost == 0`.
pub fn roi(gain: f64, cost: f64) -> MeasureResult<f64> {
    if cost == 0.0 {
        return Err(MeasureError::ZeroCost);
    }
    Ok((gain - cost) / cost)
}

/// Sharpe ratio, `mean(r − rf) / pstdev(r)`.
///
/// Errors
/// ------
/// - `MeasureError::EmptyInput` / `NonFiniteInput` for invalid returns.
/// - `MeasureError::ZeroStdDev` when all returns are equal.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> MeasureResult<f64> {
    validate_series(returns)?;
    let std_dev = returns.iter().population_std_dev();
    if std_dev == 0.0 {
        return Err(MeasureError::ZeroStdDev);
    }
    let mean_excess = returns.iter().map(|r| r - risk_free_rate).mean();
    Ok(mean_excess / std_dev)
}

/// Population standard deviation of log returns `ln(pₜ / pₜ₋₁)`.
///
/// Errors
/// ------
/// - `MeasureError::EmptyInput` / `NonFiniteInput` for invalid prices.
/// - `MeasureError::InsufficientData` for fewer than two prices.
/// - `MeasureError::NonPositiveInput` for a price `≤ 0`.
pub fn log_return_volatility(prices: &[f64]) -> MeasureResult<f64> {
    validate_series(prices)?;
    validate_min_len(prices, 2)?;
    if let Some(&value) = prices.iter().find(|&&p| p <= 0.0) {
        return Err(MeasureError::NonPositiveInput { name: "price", value });
    }
    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).population_std_dev())
}
