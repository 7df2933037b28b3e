//! measures::volatility — Roll (1984) decomposition of price changes.
//!
//! Purpose
//! -------
//! Split the variance of transaction-price changes into an efficient-price
//! component and a bid–ask bounce component. Under the Roll model, bounce
//! induces negative first-order autocovariance in `Δp`, so
//! `σ²ᵤ = γ₀ + 2γ₁` estimates the efficient-price variance per trade and
//! `2·sqrt(−γ₁)` the effective spread.
//!
//! Key behaviors
//! -------------
//! - Autocovariances of `Δp` are demeaned and use the `n − k` denominator.
//! - Daily volatility scales the per-trade variance by the number of price
//!   changes; annualization multiplies by `sqrt(252)`; the "log-normal"
//!   figures divide by the average price.
//! - Roll quantities are `None` when `σ²ᵤ ≤ 0`; the spread is `None` when
//!   `γ₁ ≥ 0`. Total-volatility figures use `γ₀` alone and are always set.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least three finite prices are required so that `γ₁` has at least one
//!   pair of changes.
//!
//! Testing notes
//! -------------
//! - Unit tests check autocovariances, the negative-`σ²ᵤ` case and a series
//!   with positive efficient variance against hand-computed values.
use crate::measures::{
    errors::MeasureResult,
    validation::{validate_min_len, validate_series},
};
use statrs::statistics::Statistics;

/// Trading days used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Result of [`roll_model_analysis`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollAnalysis {
    /// Mean transaction price.
    pub average_price: f64,
    /// Variance of price changes, `γ₀`.
    pub gamma0: f64,
    /// First-order autocovariance of price changes, `γ₁`.
    pub gamma1: f64,
    /// Efficient-price variance per trade, `γ₀ + 2γ₁`.
    pub sigma2_u: f64,
    /// Implied spread `2·sqrt(−γ₁)`; `None` when `γ₁ ≥ 0`.
    pub roll_spread: Option<f64>,
    /// `sqrt(σ²ᵤ · n)`; `None` when `σ²ᵤ ≤ 0`.
    pub daily_volatility_roll: Option<f64>,
    /// Daily Roll volatility times `sqrt(252)`.
    pub annualized_volatility_roll: Option<f64>,
    /// Annualized Roll volatility divided by the average price.
    pub log_normal_annualized_volatility_roll: Option<f64>,
    /// `sqrt(γ₀ · n)`.
    pub total_daily_volatility: f64,
    /// Total daily volatility times `sqrt(252)`.
    pub total_annualized_volatility: f64,
    /// Total annualized volatility divided by the average price.
    pub log_normal_total_annualized_volatility: f64,
}

/// Roll-model analysis of a transaction-price series.
///
/// Parameters
/// ----------
/// - `prices`: `&[f64]`
///   Transaction prices in time order; at least three, all finite.
///
/// Returns
/// -------
/// `MeasureResult<RollAnalysis>`
///
/// Notes
/// -----
/// - `gamma0` and `gamma1` are autocovariances in price units squared, not
///   autocorrelations. An ACF-based implementation (e.g. statsmodels
///   `acf(dp, adjusted=True)`) reports `γ₀ = 1` and `γ₁` divided by
///   `Var(Δp)`, so its spread and volatility figures differ from these. The
///   Roll formulas need the unnormalized values.
///
/// Errors
/// ------
/// - `MeasureError::EmptyInput` / `NonFiniteInput` for invalid prices.
/// - `MeasureError::InsufficientData` for fewer than three prices.
pub fn roll_model_analysis(prices: &[f64]) -> MeasureResult<RollAnalysis> {
    validate_series(prices)?;
    validate_min_len(prices, 3)?;
    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let n_changes = changes.len() as f64;
    let mean_change = changes.iter().mean();
    let gamma0 = calc_gamma_j(&changes, 0, mean_change);
    let gamma1 = calc_gamma_j(&changes, 1, mean_change);
    let sigma2_u = gamma0 + 2.0 * gamma1;
    let average_price = prices.iter().mean();
    let annualize = TRADING_DAYS_PER_YEAR.sqrt();

    let daily_volatility_roll = (sigma2_u > 0.0).then(|| (sigma2_u * n_changes).sqrt());
    let annualized_volatility_roll = daily_volatility_roll.map(|v| v * annualize);
    let total_daily_volatility = (gamma0 * n_changes).sqrt();
    let total_annualized_volatility = total_daily_volatility * annualize;

    Ok(RollAnalysis {
        average_price,
        gamma0,
        gamma1,
        sigma2_u,
        roll_spread: (gamma1 < 0.0).then(|| 2.0 * (-gamma1).sqrt()),
        daily_volatility_roll,
        annualized_volatility_roll,
        log_normal_annualized_volatility_roll: annualized_volatility_roll
            .map(|v| v / average_price),
        total_daily_volatility,
        total_annualized_volatility,
        log_normal_total_annualized_volatility: total_annualized_volatility / average_price,
    })
}

/// Autocovariance at lag `j` with the `n − j` denominator:
/// `γ̂ⱼ = (1 / (n − j)) Σₜ (Yₜ − Ȳ)(Yₜ₋ⱼ − Ȳ)` over `t = j, …, n − 1`.
///
/// Callers guarantee `j < data.len()`.
#[inline]
fn calc_gamma_j(data: &[f64], j: usize, mean: f64) -> f64 {
    let n = data.len();
    data[j..].iter().zip(data).map(|(y_t, y_t_min_j)| (y_t - mean) * (y_t_min_j - mean)).sum::<f64>()
        / (n - j) as f64
}
