//! loglik_optimizer::finite_diff — finite-difference gradient and Hessian helpers.
//!
//! Purpose
//! -------
//! Provide finite-difference gradient and Hessian approximations around a
//! parameter vector, together with validation and symmetry cleanup, so that
//! the rest of the crate can request derivatives without depending directly
//! on the `finitediff` API.
//!
//! Key behaviors
//! -------------
//! - Forward-difference gradients with error capture and post-hoc
//!   validation via [`run_fd_diff`].
//! - Central-difference Hessians of a gradient function, falling back to
//!   forward differences when validation fails, via [`compute_hessian`].
//! - [`hessian_of_fallible_grad`] does the same for a gradient that can
//!   fail, surfacing the first evaluation error instead of a NaN matrix.
//!
//! Invariants & assumptions
//! ------------------------
//! - Any error raised by a user-supplied closure during finite differencing
//!   is parked in a shared `RefCell` and treated as a hard failure.
//! - Returned gradients and Hessians satisfy [`validate_grad`] and
//!   [`validate_hessian`].
//!
//! Conventions
//! -----------
//! - Differences are taken in the unconstrained θ-space; reparameterization
//!   is handled by the model layer.
//! - Hessians are symmetrized after validation so `InvalidHessian` reports
//!   the raw offending entry.
//!
//! Downstream usage
//! ----------------
//! - `adapter::ArgMinAdapter` calls [`run_fd_diff`] when central
//!   differences of the cost fail.
//! - `pin::models::ekop` calls [`hessian_of_fallible_grad`] on the analytic
//!   θ-gradient to build the observed information for standard errors.
//!
//! Testing notes
//! -------------
//! - Unit tests cover success and failure paths for gradients and Hessians,
//!   including closure-error capture and symmetrization.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient with error capture and validation.
///
/// Parameters
/// ----------
/// - `theta`: point at which the gradient is approximated.
/// - `func`: scalar objective. Routes evaluation errors into `closure_err`
///   and returns `NaN` in that case.
/// - `closure_err`: cleared on entry and inspected after differencing.
///
/// Errors
/// ------
/// - The captured closure error, converted through `From<Error> for OptError`.
/// - `GradientDimMismatch` / `InvalidGradient` from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of a gradient function, validated and symmetrized.
///
/// Central differences are attempted first; any validation failure on the
/// central approximation falls back to forward differences, and only the
/// forward-difference validation result is surfaced.
///
/// Errors
/// ------
/// - `HessianDimMismatch` / `InvalidHessian` from the forward path.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_microstructure::optimization::loglik_optimizer::Theta;
/// # use rust_microstructure::optimization::loglik_optimizer::finite_diff::compute_hessian;
/// let grad_fn = |theta: &Theta| theta.mapv(|x| 2.0 * x);
/// let hess = compute_hessian(&grad_fn, &array![1.0, 2.0])?;
/// assert_eq!(hess.shape(), &[2, 2]);
/// # Ok::<(), rust_microstructure::optimization::errors::OptError>(())
/// ```
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut cent_hess = theta.central_hessian(f);
    if validate_hessian(&cent_hess, dim).is_ok() {
        symmetrize_hess(&mut cent_hess);
        return Ok(cent_hess);
    }
    let mut forward_hess = theta.forward_hessian(f);
    validate_hessian(&forward_hess, dim)?;
    symmetrize_hess(&mut forward_hess);
    Ok(forward_hess)
}

/// [`compute_hessian`] for a gradient that returns `OptResult`.
///
/// The first gradient error raised at any stencil point is returned in
/// place of the matrix. Failing evaluations yield a NaN-filled vector to
/// the differencing routine.
///
/// Errors
/// ------
/// - The first `OptError` raised by `grad`.
/// - Validation errors from [`compute_hessian`].
pub fn hessian_of_fallible_grad<F>(grad: &F, theta: &Theta) -> OptResult<Hessian>
where
    F: Fn(&Theta) -> OptResult<Grad>,
{
    let closure_err: RefCell<Option<OptError>> = RefCell::new(None);
    let dim = theta.len();
    let wrapped = |t: &Theta| -> Grad {
        match grad(t) {
            Ok(g) => g,
            Err(e) => {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                Grad::from_elem(dim, f64::NAN)
            }
        }
    };
    let hess = compute_hessian(&wrapped, theta);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    hess
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place; the diagonal is untouched.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
