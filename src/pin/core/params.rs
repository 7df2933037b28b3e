//! EKOP parameterization and the optimizer-space mapping.
//!
//! This module provides the **model-space** parameter container [`PinParams`]
//! for the Easley–Kiefer–O'Hara–Paperman mixture and a **numerically stable
//! mapping** to and from the unconstrained optimizer vector θ (as
//! `ndarray::Array1<f64>`).
//!
//! ## Parameters
//! - `α ∈ [0, 1]`: probability that an information event occurs in a period.
//! - `μ ≥ 0`: arrival intensity of informed traders on event days.
//! - `εb, εs ≥ 0`: arrival intensities of uninformed buyers and sellers.
//!
//! ## Mapping conventions
//! - `θ = (θ_α, θ_μ, θ_εb, θ_εs)` with `α = logistic(θ_α)` and
//!   `μ, εb, εs = softplus(θ_·)`. Every θ ∈ ℝ⁴ maps into the parameter box,
//!   so the optimizer runs unconstrained.
//! - The inverse map [`PinParams::to_theta`] first nudges boundary values
//!   inward by [`BOUNDARY_NUDGE`]: α into `[ν, 1 − ν]`, intensities to `≥ ν`.
//!   Interior values map exactly.
//! - Far in the tails the forward map can round to the boundary itself
//!   (`softplus(θ) == 0` for `θ ≲ −745`); such parameters are admissible and
//!   handled by the likelihood's degenerate-period policy.
//!
//! ## Invariants validated by constructors
//! - all four values finite,
//! - `0 ≤ α ≤ 1`,
//! - `μ, εb, εs ≥ 0`.
use crate::{
    optimization::numerical_stability::transformations::{
        safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
    },
    pin::{
        core::validation::{validate_intensity, validate_probability, validate_theta},
        errors::{PinError, PinResult},
    },
};
use ndarray::{Array1, ArrayView1, array};

/// Number of free EKOP parameters (and the length of θ).
pub const NUM_PARAMS: usize = 4;

/// Distance by which boundary values are pulled inside the box before being
/// mapped to θ.
pub const BOUNDARY_NUDGE: f64 = 1e-8;

/// Constrained **model-space** parameters of the EKOP model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinParams {
    /// Probability of an information event, `0 ≤ α ≤ 1`.
    pub alpha: f64,
    /// Informed arrival rate, `μ ≥ 0`.
    pub mu: f64,
    /// Uninformed buy intensity, `εb ≥ 0`.
    pub eps_b: f64,
    /// Uninformed sell intensity, `εs ≥ 0`.
    pub eps_s: f64,
}

impl PinParams {
    /// Starting point used when no initial guess is configured:
    /// `α = 0.2`, `μ = εb = εs = 1`.
    pub const DEFAULT_INITIAL_GUESS: PinParams =
        PinParams { alpha: 0.2, mu: 1.0, eps_b: 1.0, eps_s: 1.0 };

    /// Create validated model-space parameters.
    ///
    /// Errors
    /// ------
    /// - `PinError::InvalidParam` for the first value that is non-finite or
    ///   outside its box, in the order α, μ, εb, εs.
    pub fn new(alpha: f64, mu: f64, eps_b: f64, eps_s: f64) -> PinResult<Self> {
        validate_probability("alpha", alpha)?;
        validate_intensity("mu", mu)?;
        validate_intensity("eps_b", eps_b)?;
        validate_intensity("eps_s", eps_s)?;
        Ok(PinParams { alpha, mu, eps_b, eps_s })
    }

    /// Re-run the constructor checks on an existing value.
    ///
    /// Fields are public, so a value built with a struct literal may violate
    /// the box; the estimator calls this on the configured initial guess.
    pub fn validate(&self) -> PinResult<()> {
        PinParams::new(self.alpha, self.mu, self.eps_b, self.eps_s).map(|_| ())
    }

    /// Build parameters from an optimizer-space vector θ.
    ///
    /// Errors
    /// ------
    /// - `PinError::ThetaLengthMismatch` / `PinError::NonFiniteTheta` from θ
    ///   validation.
    pub fn from_theta(theta: ArrayView1<'_, f64>) -> PinResult<Self> {
        validate_theta(theta)?;
        Ok(PinParams {
            alpha: safe_logistic(theta[0]),
            mu: safe_softplus(theta[1]),
            eps_b: safe_softplus(theta[2]),
            eps_s: safe_softplus(theta[3]),
        })
    }

    /// Map to **optimizer-space** θ, nudging boundary values inward first.
    ///
    /// Assumes this instance satisfies the model-space invariants.
    pub fn to_theta(&self) -> Array1<f64> {
        let alpha = self.alpha.clamp(BOUNDARY_NUDGE, 1.0 - BOUNDARY_NUDGE);
        array![
            safe_logit(alpha),
            safe_softplus_inv(self.mu.max(BOUNDARY_NUDGE)),
            safe_softplus_inv(self.eps_b.max(BOUNDARY_NUDGE)),
            safe_softplus_inv(self.eps_s.max(BOUNDARY_NUDGE)),
        ]
    }

    /// Diagonal of the Jacobian `∂(α, μ, εb, εs) / ∂θ` at `theta`.
    ///
    /// `∂α/∂θ_α = σ(θ_α)·σ(−θ_α)` and `∂softplus(θ)/∂θ = σ(θ)`; the map acts
    /// componentwise so the off-diagonal entries are zero. The product form
    /// keeps `α(1 − α)` accurate when α rounds to 1.
    pub fn theta_jacobian_diag(theta: ArrayView1<'_, f64>) -> Array1<f64> {
        array![
            safe_logistic(theta[0]) * safe_logistic(-theta[0]),
            safe_logistic(theta[1]),
            safe_logistic(theta[2]),
            safe_logistic(theta[3]),
        ]
    }

    /// `true` when any parameter is exactly zero.
    ///
    /// Under `DegeneratePolicy::SkipDegeneratePeriod` every period is then
    /// skipped by the likelihood.
    pub fn is_degenerate(&self) -> bool {
        self.alpha == 0.0 || self.mu == 0.0 || self.eps_b == 0.0 || self.eps_s == 0.0
    }

    /// Probability of informed trading, `α·μ / (α·μ + εb + εs)`.
    ///
    /// The ratio is returned as computed, without clamping.
    ///
    /// Errors
    /// ------
    /// - `PinError::EstimationDegenerate` when the denominator is exactly 0.
    pub fn pin(&self) -> PinResult<f64> {
        let informed = self.alpha * self.mu;
        let denom = informed + self.eps_b + self.eps_s;
        if denom == 0.0 {
            return Err(PinError::EstimationDegenerate {
                alpha: self.alpha,
                mu: self.mu,
                eps_b: self.eps_b,
                eps_s: self.eps_s,
            });
        }
        Ok(informed / denom)
    }

    /// Parameters as `[α, μ, εb, εs]`, the order used by standard errors.
    pub fn to_array(&self) -> Array1<f64> {
        array![self.alpha, self.mu, self.eps_b, self.eps_s]
    }
}

impl Default for PinParams {
    fn default() -> Self {
        PinParams::DEFAULT_INITIAL_GUESS
    }
}
