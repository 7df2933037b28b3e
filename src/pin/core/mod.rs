//! core — EKOP data, parameters, likelihood and options.
//!
//! Purpose
//! -------
//! Collect the building blocks of PIN estimation: the validated volume
//! series, the model-space parameters with their optimizer-space mapping,
//! the mixture log-likelihood with its analytic gradient, and the
//! estimation options. The estimator in `pin::models` wires these into the
//! generic log-likelihood optimizer.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`VolumeSeries`] holds equal-length, non-empty count series.
//! - [`PinParams`] satisfy `0 ≤ α ≤ 1` and `μ, εb, εs ≥ 0`, all finite.
//! - θ vectors have length 4 with finite entries.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; period `i` pairs `buys[i]` with `sells[i]`.
//! - No I/O and no logging in this layer. Errors are [`PinResult`] values.
//!
//! Testing notes
//! -------------
//! - Each submodule carries its own unit tests; full fits are exercised by
//!   `pin::models::ekop` and the integration tests.
//!
//! [`PinResult`]: crate::pin::errors::PinResult

pub mod data;
pub mod likelihood;
pub mod options;
pub mod params;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::VolumeSeries;
pub use self::likelihood::{
    DegeneratePolicy, log_likelihood, log_likelihood_grad, neg_log_likelihood,
    period_log_likelihood,
};
pub use self::options::PinOptions;
pub use self::params::{BOUNDARY_NUDGE, NUM_PARAMS, PinParams};
pub use self::validation::{
    validate_counts, validate_intensity, validate_probability, validate_theta,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_microstructure::pin::core::prelude::*;
//
// to import the main PIN core surface in a single line.

pub mod prelude {
    pub use super::data::VolumeSeries;
    pub use super::likelihood::{DegeneratePolicy, neg_log_likelihood};
    pub use super::options::PinOptions;
    pub use super::params::PinParams;
}
