//! inference — standard errors for fitted models.
//!
//! Purpose
//! -------
//! Post-estimation uncertainty quantification on top of a fitted model:
//! classical (observed-information) standard errors in the unconstrained
//! optimizer space `θ`.
//!
//! Conventions
//! -----------
//! - Parameters `θ` live in **unconstrained optimizer space**. Mapping the
//!   standard errors back to model parameters is the model layer's job.
//! - Failures surface as `OptError`; no logging, no I/O.
//!
//! Downstream usage
//! ----------------
//! - The EKOP estimator calls [`calc_standard_errors`] with its negative
//!   log-likelihood gradient at θ̂.

pub mod hessian;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::hessian::calc_standard_errors;
