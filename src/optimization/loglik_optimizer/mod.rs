//! loglik_optimizer — Argmin L-BFGS driver for log-likelihood maximization.
//!
//! Purpose
//! -------
//! Let a model describe `ℓ(θ)` (and optionally `∇ℓ(θ)`) through the
//! [`LogLikelihood`] trait and obtain the maximizer from [`maximize`]. The
//! EKOP estimator is the main client: it supplies the mixture likelihood in
//! an unconstrained θ-space and an analytic gradient.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] flips `ℓ` into the cost `c = −ℓ` that Argmin
//!   minimizes, falling back to central differences from [`finite_diff`]
//!   when the model has no analytic gradient.
//! - [`builders`] construct L-BFGS with the Moré–Thuente or Hager–Zhang line
//!   search selected by [`LineSearcher`]; [`run::run_lbfgs`] executes it
//!   under the iteration cap and optional timeout.
//! - Results come back as an [`OptimOutcome`] expressed in `ℓ`, with
//!   `converged == false` whenever the run stopped on the iteration cap, the
//!   timeout or an interrupt.
//!
//! Invariants & assumptions
//! ------------------------
//! - Models report domain problems as `OptError` values from `check`,
//!   `value` and `grad`; nothing here panics on bad input.
//! - [`Tolerances`] and [`MLEOptions`] are validated when built.
//!
//! Testing notes
//! -------------
//! - Submodule tests cover the sign flip in [`adapter`], solver wiring in
//!   [`builders`], finite differences in [`finite_diff`], state checks in
//!   [`validation`] and option invariants in [`traits`].
//! - [`api`] tests maximize a shifted quadratic with both line searches.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_microstructure::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
