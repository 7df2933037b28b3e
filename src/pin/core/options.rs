//! PIN options — configuration for EKOP estimation.
//!
//! Purpose
//! -------
//! Collect the knobs of a PIN fit in one place: where the optimizer starts,
//! how it runs, and how the likelihood treats boundary parameters.
//!
//! Key behaviors
//! -------------
//! - [`PinOptions::new`] validates the initial guess against the parameter
//!   box; optimizer options are validated by their own builders.
//! - [`PinOptions::default`] starts at
//!   [`PinParams::DEFAULT_INITIAL_GUESS`] with default [`MLEOptions`] and
//!   [`DegeneratePolicy::SkipDegeneratePeriod`].
//!
//! Testing notes
//! -------------
//! - Unit tests check the default values and the initial-guess validation.
use crate::{
    optimization::loglik_optimizer::MLEOptions,
    pin::{
        core::{likelihood::DegeneratePolicy, params::PinParams},
        errors::PinResult,
    },
};

/// PinOptions — estimation-time configuration for the EKOP model.
///
/// Fields
/// ------
/// - `initial_guess`: [`PinParams`]
///   Starting point in model space. Boundary values are nudged inward when
///   mapped to optimizer space.
/// - `mle_opts`: [`MLEOptions`]
///   Tolerances, iteration cap, line search, L-BFGS memory and timeout.
/// - `policy`: [`DegeneratePolicy`]
///   Treatment of parameters that sit exactly on zero.
///
/// Notes
/// -----
/// - Public APIs accept `PinOptions` rather than separate start values and
///   optimizer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PinOptions {
    pub initial_guess: PinParams,
    pub mle_opts: MLEOptions,
    pub policy: DegeneratePolicy,
}

impl PinOptions {
    /// Construct options from an initial guess and validated optimizer options.
    ///
    /// Errors
    /// ------
    /// - `PinError::InvalidParam` if `initial_guess` lies outside the box or
    ///   is non-finite.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_microstructure::pin::core::{likelihood::DegeneratePolicy, options::PinOptions, params::PinParams};
    /// # use rust_microstructure::optimization::loglik_optimizer::{LineSearcher, MLEOptions, Tolerances};
    /// let tols = Tolerances::new(Some(1e-8), None, Some(500))?;
    /// let mle_opts = MLEOptions::new(tols, LineSearcher::HagerZhang, false, None, None)?;
    /// let guess = PinParams::new(0.3, 5.0, 2.0, 2.0)?;
    /// let opts = PinOptions::new(guess, mle_opts, DegeneratePolicy::SkipDegeneratePeriod)?;
    /// assert_eq!(opts.initial_guess.alpha, 0.3);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(
        initial_guess: PinParams, mle_opts: MLEOptions, policy: DegeneratePolicy,
    ) -> PinResult<Self> {
        initial_guess.validate()?;
        Ok(PinOptions { initial_guess, mle_opts, policy })
    }
}

impl Default for PinOptions {
    fn default() -> Self {
        PinOptions {
            initial_guess: PinParams::DEFAULT_INITIAL_GUESS,
            mle_opts: MLEOptions::default(),
            policy: DegeneratePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::errors::PinError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the documented defaults and the validation of the
    // initial guess.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Defaults match the documented configuration.
    //
    // Given
    // -----
    // - `PinOptions::default()`.
    //
    // Expect
    // ------
    // - Initial guess (0.2, 1, 1, 1), default MLE options, skip policy.
    fn default_options_match_documentation() {
        let opts = PinOptions::default();

        assert_eq!(opts.initial_guess, PinParams { alpha: 0.2, mu: 1.0, eps_b: 1.0, eps_s: 1.0 });
        assert_eq!(opts.mle_opts, MLEOptions::default());
        assert_eq!(opts.policy, DegeneratePolicy::SkipDegeneratePeriod);
    }

    #[test]
    // Purpose
    // -------
    // A struct-literal guess outside the box is caught by `new`.
    //
    // Given
    // -----
    // - εs = -2 built without the validated constructor.
    //
    // Expect
    // ------
    // - `InvalidParam { name: "eps_s" }`.
    fn new_rejects_invalid_initial_guess() {
        let guess = PinParams { alpha: 0.5, mu: 1.0, eps_b: 1.0, eps_s: -2.0 };

        let err = PinOptions::new(guess, MLEOptions::default(), DegeneratePolicy::default())
            .expect_err("guess outside box");

        assert!(matches!(err, PinError::InvalidParam { name: "eps_s", .. }));
    }
}
