//! inference::hessian — Hessian-based variance and standard error utilities.
//!
//! Purpose
//! -------
//! Provide a thin wrapper around finite-difference Hessians that converts
//! them into numerically stable standard errors. This module handles
//! conversion between `ndarray` and `nalgebra` types and computes classical
//! standard errors from the observed information.
//!
//! Key behaviors
//! -------------
//! - Differentiate a **negative** log-likelihood gradient with
//!   [`hessian_of_fallible_grad`] to obtain the observed information
//!   matrix `J(θ̂)`.
//! - Copy the resulting `ndarray` Hessian into a `nalgebra::DMatrix`
//!   (`fill_dmatrix`) for eigen-based linear algebra.
//! - Compute standard errors from the Moore–Penrose pseudoinverse of
//!   `J(θ̂)` without forming an explicit inverse.
//!
//! Invariants & assumptions
//! ------------------------
//! - The Hessian is finite, square and already symmetrized upstream; this
//!   module does **not** re-symmetrize.
//! - Eigenvalues at most `EIGEN_EPS · λ_max` are treated as zero when
//!   forming pseudoinverse directions, inflating SEs along weakly
//!   identified directions instead of dividing by noise.
//!
//! Conventions
//! -----------
//! - The Hessian is on the **summed** log-likelihood scale, so the
//!   resulting SEs are the usual MLE standard errors for the sample at hand.
//! - Errors are reported via [`OptResult<T>`].
//!
//! Downstream usage
//! ----------------
//! - `pin::models::ekop::EKOPModel::standard_errors` calls
//!   [`calc_standard_errors`] at θ̂ and maps the θ-space result to
//!   (α, μ, εb, εs) with the delta method.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the `ndarray` → `DMatrix` copy, agreement with the
//!   analytic inverse for a correlated quadratic, and eigenvalue truncation on
//!   a singular information matrix.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{Grad, Theta, finite_diff::hessian_of_fallible_grad},
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// calc_standard_errors — classical standard errors from observed information.
///
/// Parameters
/// ----------
/// - `neg_grad`: gradient of the **negative** log-likelihood, `θ ↦ -∇ℓ(θ)`.
///   Its Jacobian at `theta_hat` is the observed information.
/// - `theta_hat`: point at which the information is evaluated.
///
/// Returns
/// -------
/// `OptResult<Array1<f64>>`
///   Length-`n` vector of standard errors in θ-space.
///
/// Errors
/// ------
/// - Any error raised by `neg_grad` during differencing.
/// - `HessianDimMismatch` / `InvalidHessian` from Hessian validation.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_microstructure::inference::hessian::calc_standard_errors;
/// # use rust_microstructure::optimization::{errors::OptResult, loglik_optimizer::{Grad, Theta}};
/// let a = array![[4.0, 0.0], [0.0, 1.0]];
/// let neg_grad = |theta: &Theta| -> OptResult<Grad> { Ok(a.dot(theta)) };
/// let se = calc_standard_errors(&neg_grad, &array![1.0, -1.0])?;
/// assert!((se[0] - 0.5).abs() < 1e-6);
/// assert!((se[1] - 1.0).abs() < 1e-6);
/// # Ok::<(), rust_microstructure::optimization::errors::OptError>(())
/// ```
pub fn calc_standard_errors<F>(neg_grad: &F, theta_hat: &Theta) -> OptResult<Array1<f64>>
where
    F: Fn(&Theta) -> OptResult<Grad>,
{
    let obs_info = hessian_of_fallible_grad(neg_grad, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(obs_info.nrows(), obs_info.ncols());
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    Ok(solve_for_se(obs_info_nalg, theta_hat.len()))
}

// ---- Helper methods ----

/// Copy a square `ndarray` matrix into a preallocated `DMatrix` of the same
/// shape, column by column.
fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    for ((i, j), &value) in obs_info.indexed_iter() {
        obs_info_nalg[(i, j)] = value;
    }
}

/// Square roots of the diagonal of `J⁺`.
///
/// `Var(θ̂_i) = Σ_{k: λ_k > EIGEN_EPS·λ_max} Q[i,k]² / λ_k` with `J = Q Λ Qᵀ`.
/// A matrix with no positive eigenvalue yields `NaN` for every entry, since
/// no direction is identified.
fn solve_for_se(obs_info_nalg: DMatrix<f64>, n: usize) -> Array1<f64> {
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    let lambda_max = eigenvals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lambda_max <= 0.0 {
        return Array1::from_elem(n, f64::NAN);
    }
    let floor = EIGEN_EPS * lambda_max;
    Array1::from_shape_fn(n, |i| {
        eigenvals
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > floor)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum::<f64>()
            .sqrt()
    })
}
