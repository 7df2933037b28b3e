//! EKOP log-likelihood and its analytic gradient in model space.
//!
//! Purpose
//! -------
//! Evaluate the Easley–Kiefer–O'Hara–Paperman mixture likelihood of
//! per-period buy/sell counts, and its gradient with respect to
//! `(α, μ, εb, εs)`. This is the hot path of PIN estimation: the optimizer
//! calls it once per cost and gradient evaluation.
//!
//! Key behaviors
//! -------------
//! - Each period mixes three branches:
//!   - good news (weight `α`): buys at `μ + εb`, sells at `εs`,
//!   - bad news (weight `α`): buys at `εb`, sells at `μ + εs`,
//!   - no news (weight `1 − α`): buys at `εb`, sells at `εs`.
//! - Poisson terms are evaluated in log space as
//!   `k·ln λ − λ − ln Γ(k + 1)` with the log-factorials cached on
//!   [`VolumeSeries`], and branches are combined with [`log_sum_exp`].
//! - Degenerate parameters are handled by an explicit [`DegeneratePolicy`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters satisfy the [`PinParams`] box.
//! - When no parameter is zero every intensity is strictly positive, so
//!   `ln λ` is finite for every branch; `ln α` or `ln(1 − α)` may be `−∞`
//!   at α ∈ {0, 1}, which `log_sum_exp` absorbs.
//!
//! Conventions
//! -----------
//! - The mixture weight of the two news branches is `α` each, matching the
//!   form `α·(t₁t₂ + t₃t₄) + (1 − α)·t₃t₂`.
//! - Functions return plain `f64`; parameter validation happens upstream.
//!
//! Downstream usage
//! ----------------
//! - `EKOPModel` chains [`log_likelihood_grad`] through the θ-transform
//!   Jacobian to obtain the optimizer gradient.
//! - [`neg_log_likelihood`] is the public objective with the default policy.
//!
//! Testing notes
//! -------------
//! - Unit tests compare the log-space evaluation with the direct product
//!   formula, check the skip policy, monotonicity in α for informed-heavy
//!   data, and the analytic gradient against central differences.
use crate::{
    optimization::numerical_stability::transformations::log_sum_exp,
    pin::core::{data::VolumeSeries, params::PinParams},
};
use ndarray::{Array1, array};

/// How the likelihood treats parameters that sit exactly on the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// If any of α, μ, εb, εs is exactly 0, each period contributes 0 to the
    /// log-likelihood (and to its gradient) instead of raising a domain error.
    #[default]
    SkipDegeneratePeriod,
}

impl DegeneratePolicy {
    /// `true` when a period is skipped under this policy.
    pub fn skips(self, params: &PinParams) -> bool {
        match self {
            DegeneratePolicy::SkipDegeneratePeriod => params.is_degenerate(),
        }
    }
}

/// Log-space pieces of one period's mixture.
struct PeriodTerms {
    /// `ln P(b | μ + εb)`
    lp_b_inf: f64,
    /// `ln P(s | εs)`
    lp_s_un: f64,
    /// `ln P(b | εb)`
    lp_b_un: f64,
    /// `ln P(s | μ + εs)`
    lp_s_inf: f64,
    /// Branch log-weights `[good, bad, none]`.
    branches: [f64; 3],
    /// `ln` of the period's mixture density.
    loglik: f64,
}

impl PeriodTerms {
    fn new(params: &PinParams, b: u64, s: u64, ln_fact_b: f64, ln_fact_s: f64) -> Self {
        let lp_b_inf = ln_poisson(b, params.mu + params.eps_b, ln_fact_b);
        let lp_s_un = ln_poisson(s, params.eps_s, ln_fact_s);
        let lp_b_un = ln_poisson(b, params.eps_b, ln_fact_b);
        let lp_s_inf = ln_poisson(s, params.mu + params.eps_s, ln_fact_s);
        let ln_alpha = params.alpha.ln();
        let ln_no_news = (-params.alpha).ln_1p();
        let branches = [
            ln_alpha + lp_b_inf + lp_s_un,
            ln_alpha + lp_b_un + lp_s_inf,
            ln_no_news + lp_b_un + lp_s_un,
        ];
        let loglik = log_sum_exp(&branches);
        PeriodTerms { lp_b_inf, lp_s_un, lp_b_un, lp_s_inf, branches, loglik }
    }
}

/// Log of the Poisson pmf, `k·ln λ − λ − ln k!`, for `λ > 0`.
#[inline]
fn ln_poisson(k: u64, lambda: f64, ln_fact_k: f64) -> f64 {
    k as f64 * lambda.ln() - lambda - ln_fact_k
}

/// Log-likelihood contribution of a single period.
///
/// Parameters
/// ----------
/// - `params`: model-space parameters.
/// - `policy`: degenerate-parameter policy.
/// - `b`, `s`: buy and sell counts of the period.
/// - `ln_fact_b`, `ln_fact_s`: `ln(b!)` and `ln(s!)`.
///
/// Returns
/// -------
/// `None` when `policy` skips the period, otherwise
/// `Some(ln(α·(t₁t₂ + t₃t₄) + (1 − α)·t₃t₂))`.
pub fn period_log_likelihood(
    params: &PinParams, policy: DegeneratePolicy, b: u64, s: u64, ln_fact_b: f64, ln_fact_s: f64,
) -> Option<f64> {
    if policy.skips(params) {
        return None;
    }
    Some(PeriodTerms::new(params, b, s, ln_fact_b, ln_fact_s).loglik)
}

/// Total log-likelihood over all periods; skipped periods contribute 0.
pub fn log_likelihood(params: &PinParams, data: &VolumeSeries, policy: DegeneratePolicy) -> f64 {
    data.periods()
        .filter_map(|(b, s, lfb, lfs)| period_log_likelihood(params, policy, b, s, lfb, lfs))
        .sum()
}

/// Negative log-likelihood under [`DegeneratePolicy::SkipDegeneratePeriod`].
///
/// Deterministic: identical inputs give bit-identical output.
///
/// Examples
/// --------
/// ```rust
/// # use rust_microstructure::pin::core::{data::VolumeSeries, likelihood::neg_log_likelihood, params::PinParams};
/// let data = VolumeSeries::new(vec![5, 10, 15], vec![6, 9, 14])?;
/// let nll = neg_log_likelihood(&PinParams::default(), &data);
/// assert!(nll.is_finite() && nll > 0.0);
/// # Ok::<(), rust_microstructure::pin::errors::PinError>(())
/// ```
pub fn neg_log_likelihood(params: &PinParams, data: &VolumeSeries) -> f64 {
    -log_likelihood(params, data, DegeneratePolicy::default())
}

/// Gradient of [`log_likelihood`] with respect to `(α, μ, εb, εs)`.
///
/// With branch posteriors `w_X = exp(l_X − ℓ)`, `λ₁ = μ + εb`,
/// `λ₄ = μ + εs`:
///
/// ```text
/// ∂ℓ/∂α  = exp(lp₁ + lp₂ − ℓ) + exp(lp₃ + lp₄ − ℓ) − exp(lp₃ + lp₂ − ℓ)
/// ∂ℓ/∂μ  = w_good·(b/λ₁ − 1) + w_bad·(s/λ₄ − 1)
/// ∂ℓ/∂εb = w_good·(b/λ₁ − 1) + (w_bad + w_none)·(b/εb − 1)
/// ∂ℓ/∂εs = (w_good + w_none)·(s/εs − 1) + w_bad·(s/λ₄ − 1)
/// ```
///
/// Notes
/// -----
/// - The α-derivative avoids dividing by `α` or `1 − α`, so it stays finite
///   on both ends of the unit interval.
/// - Skipped periods contribute a zero gradient.
pub fn log_likelihood_grad(
    params: &PinParams, data: &VolumeSeries, policy: DegeneratePolicy,
) -> Array1<f64> {
    let mut grad = Array1::<f64>::zeros(4);
    if policy.skips(params) {
        return grad;
    }
    let lambda_buy = params.mu + params.eps_b;
    let lambda_sell = params.mu + params.eps_s;
    for (b, s, lfb, lfs) in data.periods() {
        let t = PeriodTerms::new(params, b, s, lfb, lfs);
        let [w_good, w_bad, w_none] = t.branches.map(|l| (l - t.loglik).exp());
        let d_alpha = (t.lp_b_inf + t.lp_s_un - t.loglik).exp()
            + (t.lp_b_un + t.lp_s_inf - t.loglik).exp()
            - (t.lp_b_un + t.lp_s_un - t.loglik).exp();
        let buy_inf = b as f64 / lambda_buy - 1.0;
        let sell_inf = s as f64 / lambda_sell - 1.0;
        let buy_un = b as f64 / params.eps_b - 1.0;
        let sell_un = s as f64 / params.eps_s - 1.0;
        grad += &array![
            d_alpha,
            w_good * buy_inf + w_bad * sell_inf,
            w_good * buy_inf + (w_bad + w_none) * buy_un,
            (w_good + w_none) * sell_un + w_bad * sell_inf,
        ];
    }
    grad
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the log-space evaluation with the direct product formula.
    // - The skip-degenerate-period policy.
    // - Determinism and α-monotonicity on informed-heavy data.
    // - The analytic gradient against central differences.
    // -------------------------------------------------------------------------

    fn poisson(k: u64, lambda: f64) -> f64 {
        let fact: f64 = (1..=k).map(|i| i as f64).product();
        (-lambda).exp() * lambda.powi(k as i32) / fact
    }

    fn sample() -> VolumeSeries {
        VolumeSeries::new(vec![10, 11, 9, 30, 32, 10, 9, 11, 10, 12], vec![
            10, 9, 11, 10, 11, 29, 31, 10, 12, 9,
        ])
        .expect("valid series")
    }

    #[test]
    // Purpose
    // -------
    // The log-space period term equals the direct mixture density.
    //
    // Given
    // -----
    // - Small counts (b = 3, s = 5) and (0.3, 2.5, 1.5, 2.0).
    //
    // Expect
    // ------
    // - ln(α(t₁t₂ + t₃t₄) + (1 − α)t₃t₂) within 1e-12 relative.
    fn period_term_matches_direct_formula() {
        // Arrange
        let p = PinParams::new(0.3, 2.5, 1.5, 2.0).expect("valid params");
        let (b, s) = (3_u64, 5_u64);
        let t1 = poisson(b, p.mu + p.eps_b);
        let t2 = poisson(s, p.eps_s);
        let t3 = poisson(b, p.eps_b);
        let t4 = poisson(s, p.mu + p.eps_s);
        let direct = (p.alpha * (t1 * t2 + t3 * t4) + (1.0 - p.alpha) * t3 * t2).ln();

        // Act
        let value = period_log_likelihood(
            &p,
            DegeneratePolicy::SkipDegeneratePeriod,
            b,
            s,
            6.0_f64.ln(),
            120.0_f64.ln(),
        )
        .expect("not skipped");

        // Assert
        assert_relative_eq!(value, direct, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A zero parameter skips every period instead of producing NaN.
    //
    // Given
    // -----
    // - μ = 0 (others positive), and a series with non-zero counts.
    //
    // Expect
    // ------
    // - Per-period `None`, total log-likelihood 0 and zero gradient.
    fn zero_parameter_skips_periods() {
        let data = sample();
        let p = PinParams::new(0.4, 0.0, 10.0, 10.0).expect("valid params");
        let policy = DegeneratePolicy::SkipDegeneratePeriod;

        assert_eq!(period_log_likelihood(&p, policy, 10, 10, 1.0, 1.0), None);
        assert_eq!(log_likelihood(&p, &data, policy), 0.0);
        assert_eq!(neg_log_likelihood(&p, &data), 0.0);
        assert!(log_likelihood_grad(&p, &data, policy).iter().all(|g| *g == 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Large counts stay finite where the direct product would underflow.
    //
    // Given
    // -----
    // - b = s = 5000 with small intensities.
    //
    // Expect
    // ------
    // - Finite negative log-likelihood.
    fn large_counts_stay_finite() {
        let data = VolumeSeries::new(vec![5000], vec![5000]).expect("valid series");
        let p = PinParams::new(0.2, 1.0, 1.0, 1.0).expect("valid params");

        assert!(neg_log_likelihood(&p, &data).is_finite());
    }

    #[test]
    // Purpose
    // -------
    // Repeated evaluations are bit-identical, and α near 1 beats α = 0 when
    // the counts come from the informed branches.
    //
    // Given
    // -----
    // - Days with heavy buys or heavy sells, μ = 20, εb = εs = 10.
    //
    // Expect
    // ------
    // - `nll(α = 0.999) ≤ nll(α ≈ 0)`; equal values on repeat calls.
    fn deterministic_and_monotone_in_alpha_for_informed_data() {
        let data =
            VolumeSeries::new(vec![30, 10, 31, 9], vec![10, 30, 9, 29]).expect("valid series");
        let informed = PinParams::new(0.999, 20.0, 10.0, 10.0).expect("valid params");
        // α = 0 itself is skipped by the policy; a tiny α isolates the no-news branch.
        let nearly_uninformed = PinParams::new(1e-12, 20.0, 10.0, 10.0).expect("valid params");

        let first = neg_log_likelihood(&informed, &data);
        let second = neg_log_likelihood(&informed, &data);

        assert_eq!(first.to_bits(), second.to_bits());
        assert!(first <= neg_log_likelihood(&nearly_uninformed, &data));
    }

    #[test]
    // Purpose
    // -------
    // The analytic gradient agrees with central differences.
    //
    // Given
    // -----
    // - The ten-day sample and parameters (0.35, 18, 9, 11).
    //
    // Expect
    // ------
    // - Each component within 1e-5 relative (or 1e-6 absolute).
    fn analytic_gradient_matches_central_differences() {
        // Arrange
        let data = sample();
        let policy = DegeneratePolicy::SkipDegeneratePeriod;
        let base = [0.35, 18.0, 9.0, 11.0];
        let h = 1e-6;
        let at = |x: [f64; 4]| {
            let p = PinParams { alpha: x[0], mu: x[1], eps_b: x[2], eps_s: x[3] };
            log_likelihood(&p, &data, policy)
        };

        // Act
        let p = PinParams { alpha: base[0], mu: base[1], eps_b: base[2], eps_s: base[3] };
        let grad = log_likelihood_grad(&p, &data, policy);

        // Assert
        for k in 0..4 {
            let mut up = base;
            let mut down = base;
            up[k] += h;
            down[k] -= h;
            let fd = (at(up) - at(down)) / (2.0 * h);
            assert!(
                (grad[k] - fd).abs() <= 1e-5 * fd.abs().max(0.1),
                "k = {k}: analytic {} vs fd {fd}",
                grad[k]
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // The α-derivative is finite at α = 1.
    //
    // Given
    // -----
    // - α = 1, positive intensities.
    //
    // Expect
    // ------
    // - Finite gradient.
    fn gradient_is_finite_at_alpha_one() {
        let data = sample();
        let p = PinParams::new(1.0, 20.0, 10.0, 10.0).expect("valid params");

        let grad = log_likelihood_grad(&p, &data, DegeneratePolicy::SkipDegeneratePeriod);

        assert!(grad.iter().all(|g| g.is_finite()));
    }
}
