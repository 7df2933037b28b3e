//! Numerical stability utilities.
//!
//! Provides safe implementations of common nonlinear transforms
//! that are prone to overflow/underflow in naïve form.
//! The functions here use explicit cutoffs (`x > 20.0`) to keep `f64`
//! arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`safe_softplus(x)`]: stable version of `ln(1 + exp(x))`,
//!   mapping ℝ → (0, ∞) without overflow.
//! - [`safe_softplus_inv(x)`]: inverse of softplus, mapping
//!   (0, ∞) → ℝ without catastrophic cancellation.
//! - [`safe_logistic(x)`] / [`safe_logit(p)`]: the ℝ ↔ (0, 1) pair used for
//!   probability parameters.
//! - [`log_sum_exp(xs)`]: `ln Σ exp(xᵢ)` with max-shift.
//! - [`EIGEN_EPS`]: relative eigenvalue floor for pseudo-inverses.
//!
//! # Rationale
//! These transforms are building blocks in optimization and
//! probabilistic modeling whenever parameters must be kept
//! strictly positive or inside the unit interval.

/// Relative eigenvalue floor used when pseudo-inverting observed
/// information matrices. Eigenvalues below `EIGEN_EPS · λ_max` are treated
/// as zero.
pub const EIGEN_EPS: f64 = 1e-12;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For sufficiently large `x`, `softplus(x) ≈ x + ln1p(exp(-x)) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
///
/// # Parameters
/// - `x`: real input
///
/// # Returns
/// - `softplus(x)` as `f64`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: solves for `t` in
/// `softplus(t) = x`, returning `t = ln(exp(x) - 1)`.
///
/// - For sufficiently large `x`, `ln(exp(x) - 1) ≈ x`.
/// - Otherwise, it uses `ln(expm1(x))`.
///
/// # Parameters
/// - `x`: a positive real (the softplus output), must be finite and `> 0`.
///
/// # Returns
/// - `t` such that `softplus(t) = x`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic `σ(x) = 1 / (1 + exp(-x))`.
///
/// Evaluates `exp` only on non-positive arguments, so neither branch can
/// overflow. Also the derivative of [`safe_softplus`].
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Inverse of [`safe_logistic`] on `(0, 1)`: `logit(p) = ln(p / (1 - p))`.
///
/// Uses `ln_1p(-p)` for the complement so that probabilities near 0 keep
/// full precision. Callers keep `p` strictly inside the unit interval.
pub fn safe_logit(p: f64) -> f64 {
    p.ln() - (-p).ln_1p()
}

/// Max-shifted `ln Σ exp(xᵢ)`.
///
/// Terms equal to `-∞` contribute nothing. Returns `-∞` for an empty slice
/// or when every term is `-∞`.
pub fn log_sum_exp(xs: &[f64]) -> f64 {
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = xs.iter().map(|&x| (x - max).exp()).sum();
    max + sum.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the guarded transforms with naïve formulas on safe grids.
    // - Round trips softplus ∘ softplus_inv and logistic ∘ logit.
    // - Tail behavior of logistic and log-sum-exp with underflowing terms.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The guarded softplus matches `ln(1 + e^x)` where the naïve form is safe.
    //
    // Given
    // -----
    // - A grid of x in [-10, 10].
    //
    // Expect
    // ------
    // - Relative agreement to 1e-12.
    fn softplus_matches_naive_formula() {
        for i in -20..=20 {
            let x = i as f64 * 0.5;
            assert_relative_eq!(safe_softplus(x), (1.0 + x.exp()).ln(), max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // softplus_inv inverts softplus across small, unit and large scales.
    //
    // Given
    // -----
    // - Targets {1e-6, 0.5, 1, 20, 35}.
    //
    // Expect
    // ------
    // - softplus(softplus_inv(x)) == x within 1e-10 relative error.
    fn softplus_inverse_round_trips() {
        for &x in &[1e-6, 0.5, 1.0, 20.0, 35.0] {
            assert_relative_eq!(safe_softplus(safe_softplus_inv(x)), x, max_relative = 1e-10);
        }
    }

    #[test]
    // Purpose
    // -------
    // logistic and logit are inverse on the open unit interval and the
    // logistic saturates without producing NaN.
    //
    // Given
    // -----
    // - p in {1e-8, 0.2, 0.5, 0.9}; x = ±800.
    //
    // Expect
    // ------
    // - logistic(logit(p)) ≈ p; logistic(800) == 1, logistic(-800) == 0.
    fn logistic_logit_pair_round_trips_and_saturates() {
        for &p in &[1e-8, 0.2, 0.5, 0.9] {
            assert_relative_eq!(safe_logistic(safe_logit(p)), p, max_relative = 1e-10);
        }
        assert_eq!(safe_logistic(800.0), 1.0);
        assert_eq!(safe_logistic(-800.0), 0.0);
        assert_relative_eq!(safe_logistic(0.0), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // log-sum-exp stays finite when every exponent would underflow and
    // ignores `-∞` terms.
    //
    // Given
    // -----
    // - [-1000, -1000] and [ln 2, -∞].
    //
    // Expect
    // ------
    // - -1000 + ln 2 and ln 2 respectively; empty slice gives -∞.
    fn log_sum_exp_handles_underflow_and_neg_infinity() {
        assert_relative_eq!(
            log_sum_exp(&[-1000.0, -1000.0]),
            -1000.0 + 2f64.ln(),
            max_relative = 1e-14
        );
        assert_relative_eq!(log_sum_exp(&[2f64.ln(), f64::NEG_INFINITY]), 2f64.ln());
        assert_eq!(log_sum_exp(&[]), f64::NEG_INFINITY);
    }
}
