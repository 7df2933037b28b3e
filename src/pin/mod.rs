//! pin — probability of informed trading under the EKOP model.
//!
//! Purpose
//! -------
//! Estimate the Easley–Kiefer–O'Hara–Paperman mixture from per-period buy
//! and sell counts and derive the probability of informed trading,
//! `PIN = α·μ / (α·μ + εb + εs)`.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds the validated data container, parameters with their
//!   optimizer-space mapping, the log-space likelihood with analytic
//!   gradient, and estimation options.
//! - [`models`] exposes [`EKOPModel`] and [`estimate_pin`].
//! - [`errors`] defines [`PinError`] and [`PinResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Input validation (`LengthMismatch`, `EmptySeries`) happens before any
//!   optimization work.
//! - Parameters with an exact zero are handled by
//!   `DegeneratePolicy::SkipDegeneratePeriod`, never by a panic.
//! - The PIN is reported unclamped.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Build a [`VolumeSeries`] from counts or from classified trades.
//!   2. Construct an [`EKOPModel`] with [`PinOptions`] (or the default).
//!   3. Call `estimate(&series)`; optionally `ensure_converged()` and
//!      `standard_errors(&fit, &series)`.
//! - Python bindings wrap this flow in the `PinEKOP` class.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; end-to-end fits are also
//!   exercised in `tests/integration_pin_pipeline.rs`.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{DegeneratePolicy, PinOptions, PinParams, VolumeSeries, neg_log_likelihood};
pub use self::errors::{PinError, PinResult};
pub use self::models::{EKOPModel, PinEstimate, PinFit, estimate_pin};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_microstructure::pin::prelude::*;
//
// to import the main PIN surface in a single line.

pub mod prelude {
    pub use super::{
        DegeneratePolicy, EKOPModel, PinError, PinEstimate, PinFit, PinOptions, PinParams,
        PinResult, VolumeSeries, estimate_pin, neg_log_likelihood,
    };
}
