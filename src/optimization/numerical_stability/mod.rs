//! numerical_stability — numerically robust transforms for bounded parameters.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar transforms used to map unconstrained
//! optimizer coordinates θ into box-constrained model parameters, plus the
//! log-space reduction used by mixture likelihoods. Centralizing them lets
//! the rest of the crate assume well-conditioned `f64` arithmetic.
//!
//! Key behaviors
//! -------------
//! - `safe_softplus` / `safe_softplus_inv`: ℝ ↔ (0, ∞) for intensities.
//! - `safe_logistic` / `safe_logit`: ℝ ↔ (0, 1) for probabilities.
//! - `log_sum_exp`: stable `ln Σ exp(xᵢ)` for mixture likelihoods.
//! - `EIGEN_EPS`: shared eigenvalue floor for pseudo-inverting Hessians.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite `f64`. Inverse transforms expect their argument in
//!   the open image of the forward map; callers nudge boundary values inward
//!   before inverting.
//!
//! Conventions
//! -----------
//! - Pure functions, no logging, no I/O, no global state.
//!
//! Downstream usage
//! ----------------
//! - `pin::core::params` maps (α, μ, εb, εs) to and from θ-space with these
//!   transforms; the likelihood uses `log_sum_exp` per period.
//! - `inference::hessian` uses `EIGEN_EPS` to truncate small eigenvalues.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] check agreement with naïve formulas on
//!   safe grids, round trips, and tail behavior.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, log_sum_exp, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_microstructure::optimization::numerical_stability::prelude::*;
//
// to import the main numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, log_sum_exp, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
    };
}
