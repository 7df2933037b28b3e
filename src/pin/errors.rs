//! Errors for PIN estimation (input validation, parameter boxes, optimizer
//! vectors, degenerate fits, and optimizer failures).
//!
//! This module defines [`PinError`] and the [`PinResult`] alias used across the
//! PIN core, the EKOP estimator and the Python-facing API. The type implements
//! `Display`/`Error` and converts to `PyErr` when the `python-bindings`
//! feature is enabled.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Input errors are raised before any optimization work.
//! - `OptimizationFailure` is advisory: the estimator returns non-converged
//!   fits as values and only [`PinEstimate::ensure_converged`] produces it.
//!
//! [`PinEstimate::ensure_converged`]: crate::pin::models::ekop::PinEstimate::ensure_converged
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

use crate::optimization::errors::OptError;

/// Result alias for PIN operations that may produce [`PinError`].
pub type PinResult<T> = Result<T, PinError>;

/// Unified error type for PIN estimation.
#[derive(Debug, Clone, PartialEq)]
pub enum PinError {
    // ---- Input/data validation ----
    /// Buy and sell series are empty.
    EmptySeries,

    /// Buy and sell series have different lengths.
    LengthMismatch { buys: usize, sells: usize },

    /// Classified-trade inputs (period indices and directions) differ in length.
    PeriodIndexLength { periods: usize, directions: usize },

    // ---- Parameters ----
    /// A model-space parameter is non-finite or outside its box.
    InvalidParam { name: &'static str, value: f64, reason: &'static str },

    /// Optimizer vector has the wrong length.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Optimizer vector entry is NaN/±inf.
    NonFiniteTheta { index: usize, value: f64 },

    // ---- Estimation ----
    /// Fitted parameters give `α·μ + εb + εs == 0`, so PIN is undefined.
    EstimationDegenerate { alpha: f64, mu: f64, eps_b: f64, eps_s: f64 },

    /// The solver stopped without meeting a convergence criterion.
    OptimizationFailure { status: String, iterations: usize },

    /// Solver or backend failure.
    Optimization(OptError),
}

impl std::error::Error for PinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PinError::Optimization(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for PinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            PinError::EmptySeries => {
                write!(f, "Buy/sell series are empty.")
            }
            PinError::LengthMismatch { buys, sells } => {
                write!(f, "Buy and sell series must have equal length: {buys} buys vs {sells} sells")
            }
            PinError::PeriodIndexLength { periods, directions } => {
                write!(
                    f,
                    "Period indices ({periods}) and trade directions ({directions}) must have equal length"
                )
            }
            // ---- Parameters ----
            PinError::InvalidParam { name, value, reason } => {
                write!(f, "Invalid parameter {name} = {value}: {reason}")
            }
            PinError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Optimizer vector must have length {expected}; got {actual}")
            }
            PinError::NonFiniteTheta { index, value } => {
                write!(f, "Optimizer vector entry at index {index} is non-finite: {value}")
            }
            // ---- Estimation ----
            PinError::EstimationDegenerate { alpha, mu, eps_b, eps_s } => {
                write!(
                    f,
                    "PIN is undefined for fitted parameters alpha={alpha}, mu={mu}, eps_b={eps_b}, eps_s={eps_s}: alpha*mu + eps_b + eps_s == 0"
                )
            }
            PinError::OptimizationFailure { status, iterations } => {
                write!(f, "Optimizer did not converge after {iterations} iterations: {status}")
            }
            PinError::Optimization(err) => {
                write!(f, "Optimization error: {err}")
            }
        }
    }
}

impl From<OptError> for PinError {
    fn from(err: OptError) -> PinError {
        match err {
            OptError::ThetaLengthMismatch { expected, actual } => {
                PinError::ThetaLengthMismatch { expected, actual }
            }
            OptError::InvalidThetaInput { index, value } => {
                PinError::NonFiniteTheta { index, value }
            }
            other => PinError::Optimization(other),
        }
    }
}

/// Convert a [`PinError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<PinError> for PyErr {
    fn from(err: PinError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
