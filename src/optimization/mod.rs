//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting, combining an
//! Argmin-backed log-likelihood optimizer, numerically stable parameter
//! transforms, and a single error/result surface. Callers implement a
//! log-likelihood, choose tolerances, and obtain fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`), including solver, line-search, iteration-cap and
//!   timeout configuration.
//! - Supply shared numerical primitives (`numerical_stability`) for mapping
//!   unconstrained parameters into bounded model space.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in an unconstrained parameter space `θ`; box
//!   constraints are expressed by the model through smooth transforms.
//! - Log-likelihood implementations report domain violations as recoverable
//!   errors, never panics.
//!
//! Conventions
//! -----------
//! - All solvers maximize `ℓ(θ)` by minimizing an internal cost
//!   `c(θ) = -ℓ(θ)`; user-facing outcomes are expressed in terms of `ℓ`.
//! - Parameters, gradients, and Hessians use `ndarray`-based aliases
//!   (`Theta`, `Grad`, `Hessian`).
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors.
//! - The only logging is a `tracing::debug!` event at solver start and the
//!   optional slog observer behind the `obs_slog` feature.
//!
//! Downstream usage
//! ----------------
//! - `pin::models::ekop::EKOPModel` implements `LogLikelihood` and calls
//!   `maximize` to fit the EKOP mixture.
//! - Front-ends import the curated surface via `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - `loglik_optimizer`: solver wiring, tolerance handling, finite-difference
//!   fallback, and MLE behavior on toy models.
//! - `numerical_stability`: agreement with naïve formulas and tail behavior.
//! - `errors`: conversions from backend/model errors into `OptError`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_microstructure::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
