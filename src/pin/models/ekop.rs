//! EKOP model: maximum-likelihood PIN estimation.
//!
//! This module wires the EKOP mixture likelihood to the `LogLikelihood`
//! trait and drives the generic L-BFGS maximizer over it. Optimization runs
//! in unconstrained θ-space (`α = logistic(θ₀)`, `μ, εb, εs = softplus(θ₁..₃)`),
//! so the parameter box holds at every iterate without a bounded solver.
//!
//! Key ideas:
//! - `value` maps θ to [`PinParams`] and evaluates the log-likelihood with the
//!   configured `DegeneratePolicy`.
//! - `grad` evaluates the analytic model-space gradient and multiplies it by
//!   the diagonal transform Jacobian.
//! - A fit that stops without meeting a convergence criterion is still
//!   returned, flagged `converged = false`, with a `tracing::warn!` event.
//!   [`PinEstimate::ensure_converged`] turns it into an error.
//! - [`EKOPModel::standard_errors`] derives classical standard errors from the
//!   observed information in θ-space and maps them to model space with the
//!   delta method.
use crate::{
    inference::hessian::calc_standard_errors,
    optimization::{
        errors::OptResult,
        loglik_optimizer::{FnEvalMap, Grad, LogLikelihood, OptimOutcome, Theta, maximize},
    },
    pin::{
        core::{
            data::VolumeSeries,
            likelihood::{log_likelihood, log_likelihood_grad},
            options::PinOptions,
            params::PinParams,
            validation::validate_theta,
        },
        errors::{PinError, PinResult},
    },
};
use ndarray::Array1;
use tracing::{debug, warn};

/// EKOP model with analytic log-likelihood and gradient.
///
/// The model holds only its options and is never mutated by a fit, so one
/// instance can estimate many series, including from several threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EKOPModel {
    /// Initial guess, optimizer options and degenerate-parameter policy.
    pub options: PinOptions,
}

/// Outcome of a single EKOP fit.
///
/// Fields
/// ------
/// - `params`: fitted `(α̂, μ̂, ε̂b, ε̂s)`.
/// - `theta_hat`: the optimizer-space point the parameters were mapped from.
/// - `neg_log_likelihood`: `−ℓ` at `theta_hat`.
/// - `converged`: `true` only if a gradient/cost tolerance was met.
/// - `status`: Argmin termination text.
/// - `iterations`, `fn_evals`: solver counters.
/// - `grad_norm`: L2 norm of the final θ-space cost gradient, when available.
#[derive(Debug, Clone, PartialEq)]
pub struct PinFit {
    pub params: PinParams,
    pub theta_hat: Theta,
    pub neg_log_likelihood: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl PinFit {
    fn from_outcome(outcome: OptimOutcome) -> PinResult<Self> {
        let params = PinParams::from_theta(outcome.theta_hat.view())?;
        Ok(PinFit {
            params,
            theta_hat: outcome.theta_hat,
            neg_log_likelihood: -outcome.value,
            converged: outcome.converged,
            status: outcome.status,
            iterations: outcome.iterations,
            fn_evals: outcome.fn_evals,
            grad_norm: outcome.grad_norm,
        })
    }
}

/// PIN derived from a fit: `α̂·μ̂ / (α̂·μ̂ + ε̂b + ε̂s)`.
///
/// The value is the raw ratio; it is not clamped to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PinEstimate {
    pub pin: f64,
    pub fit: PinFit,
}

impl PinEstimate {
    /// Return `self` if the fit converged.
    ///
    /// Errors
    /// ------
    /// - `PinError::OptimizationFailure` carrying the termination status and
    ///   iteration count when `fit.converged` is `false`.
    pub fn ensure_converged(self) -> PinResult<Self> {
        if !self.fit.converged {
            return Err(PinError::OptimizationFailure {
                status: self.fit.status,
                iterations: self.fit.iterations,
            });
        }
        Ok(self)
    }
}

impl EKOPModel {
    pub fn new(options: PinOptions) -> EKOPModel {
        EKOPModel { options }
    }

    /// Fit the EKOP model to `data` and derive the PIN.
    ///
    /// ## Steps
    /// 1. Validate the configured initial guess and map it to θ (boundary
    ///    values nudged inward).
    /// 2. Run L-BFGS per `options.mle_opts` on the analytic likelihood and
    ///    gradient.
    /// 3. Map θ̂ back to model space and compute the PIN.
    ///
    /// ## Errors
    /// - `PinError::InvalidParam` for an initial guess outside the box.
    /// - `PinError::Optimization` for solver or backend failures.
    /// - `PinError::EstimationDegenerate` when `α̂·μ̂ + ε̂b + ε̂s == 0`.
    ///
    /// ## Notes
    /// - No retries and no multi-start: one local run from the initial guess.
    /// - Non-converged runs are returned as values; see
    ///   [`PinEstimate::ensure_converged`].
    pub fn estimate(&self, data: &VolumeSeries) -> PinResult<PinEstimate> {
        self.options.initial_guess.validate()?;
        let theta0 = self.options.initial_guess.to_theta();
        let outcome = maximize(self, theta0, data, &self.options.mle_opts)?;
        let fit = PinFit::from_outcome(outcome)?;
        if !fit.converged {
            warn!(
                status = %fit.status,
                iterations = fit.iterations,
                grad_norm = ?fit.grad_norm,
                "EKOP fit stopped without convergence; returning best parameters found"
            );
        }
        let pin = fit.params.pin()?;
        debug!(
            pin,
            alpha = fit.params.alpha,
            mu = fit.params.mu,
            eps_b = fit.params.eps_b,
            eps_s = fit.params.eps_s,
            nll = fit.neg_log_likelihood,
            iterations = fit.iterations,
            converged = fit.converged,
            "EKOP fit finished"
        );
        Ok(PinEstimate { pin, fit })
    }

    /// Classical standard errors of `(α̂, μ̂, ε̂b, ε̂s)`.
    ///
    /// Parameters
    /// ----------
    /// - `fit`: a fit produced by [`EKOPModel::estimate`] on `data`.
    /// - `data`: the series the fit was computed on.
    ///
    /// Returns
    /// -------
    /// Length-4 array in the order `(α, μ, εb, εs)`.
    ///
    /// Notes
    /// -----
    /// - The observed information is the finite-difference Jacobian of the
    ///   analytic θ-gradient of `−ℓ`; it is pseudo-inverted with an eigenvalue
    ///   floor, so weakly identified directions yield large (or zero) entries
    ///   instead of an error.
    /// - The transform is componentwise, so the delta method reduces to
    ///   `se_k = |∂param_k/∂θ_k| · se_θk`.
    ///
    /// Errors
    /// ------
    /// - `PinError::Optimization` if the Hessian is not finite.
    pub fn standard_errors(&self, fit: &PinFit, data: &VolumeSeries) -> PinResult<Array1<f64>> {
        let neg_grad = |theta: &Theta| -> OptResult<Grad> { Ok(-self.grad(theta, data)?) };
        let se_theta = calc_standard_errors(&neg_grad, &fit.theta_hat)?;
        let jac = PinParams::theta_jacobian_diag(fit.theta_hat.view());
        Ok(se_theta * jac.mapv(f64::abs))
    }
}

impl LogLikelihood for EKOPModel {
    type Data = VolumeSeries;

    /// Log-likelihood `ℓ(θ)` of the EKOP mixture.
    ///
    /// # Errors
    /// - Length or finiteness violations of θ.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = PinParams::from_theta(theta.view())?;
        Ok(log_likelihood(&params, data, self.options.policy))
    }

    /// Validate θ: length 4, finite entries.
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view())?;
        Ok(())
    }

    /// Analytic gradient `∇_θ ℓ`.
    ///
    /// Chains the model-space gradient through `diag(α(1 − α), σ(θ₁), σ(θ₂), σ(θ₃))`.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let params = PinParams::from_theta(theta.view())?;
        let grad = log_likelihood_grad(&params, data, self.options.policy);
        Ok(grad * PinParams::theta_jacobian_diag(theta.view()))
    }
}

/// Estimate the PIN of a buy/sell count series with default options.
///
/// Examples
/// --------
/// ```rust
/// # use rust_microstructure::pin::models::ekop::estimate_pin;
/// let estimate = estimate_pin(&[5, 10, 15], &[6, 9, 14])?;
/// assert!(estimate.pin > 0.0 && estimate.pin < 1.0);
/// # Ok::<(), rust_microstructure::pin::errors::PinError>(())
/// ```
///
/// Errors
/// ------
/// - `PinError::LengthMismatch` / `PinError::EmptySeries` before any
///   optimization work.
/// - See [`EKOPModel::estimate`] for the remaining failure modes.
pub fn estimate_pin(buys: &[u64], sells: &[u64]) -> PinResult<PinEstimate> {
    let data = VolumeSeries::new(buys.to_vec(), sells.to_vec())?;
    EKOPModel::default().estimate(&data)
}
