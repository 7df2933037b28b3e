//! models — the EKOP PIN estimator.
//!
//! Purpose
//! -------
//! Expose the user-facing estimator built on `pin::core`: [`EKOPModel`]
//! implements [`LogLikelihood`] over a [`VolumeSeries`] and drives the
//! generic L-BFGS maximizer; [`estimate_pin`] is the one-call entry point
//! with default options.
//!
//! Conventions
//! -----------
//! - Optimization happens in unconstrained θ-space; fitted values are
//!   reported in model space through [`PinFit`].
//! - Fit summaries are emitted as `tracing` events (`debug` on completion,
//!   `warn` when the solver stops without convergence). No subscriber is
//!   installed here.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`ekop`] cover `LogLikelihood` conformance, recovery of a
//!   known information structure, the non-converged path and standard errors.
//!
//! [`LogLikelihood`]: crate::optimization::loglik_optimizer::LogLikelihood
//! [`VolumeSeries`]: crate::pin::core::VolumeSeries

pub mod ekop;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::ekop::{EKOPModel, PinEstimate, PinFit, estimate_pin};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::ekop::{EKOPModel, PinEstimate, PinFit, estimate_pin};
}
