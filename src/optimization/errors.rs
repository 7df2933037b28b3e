//! optimization::errors — unified error surface for the optimizer stack.
//!
//! Every failure inside the optimization layer (configuration, derivative
//! validation, non-finite objectives, Argmin backend errors, and model-level
//! errors raised from inside a log-likelihood) is normalized into
//! [`OptError`]. Model crates convert their own error enums into `OptError`
//! so that a `LogLikelihood` implementation can use `?` freely.
use argmin::core::{ArgminError, Error};

use crate::pin::errors::PinError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MLEOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad { tol: f64, reason: &'static str },

    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost { tol: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch { name: String, reason: &'static str },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    /// Wall-clock budget must be non-zero.
    InvalidTimeout { millis: u128, reason: &'static str },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost { value: f64 },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    /// Theta hat is missing
    MissingThetaHat,

    // ---- Argmin ----
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated { text: String },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound { text: String },
    /// Wrapper for argmin::PotentialBug
    PotentialBug { text: String },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError { text: String },
    /// Wrapper for other argmin::Error types
    BackendError { text: String },

    // ---- Finite Diffs ----
    /// Hessian matrix dimensions do not match parameter dimensions.
    HessianDimMismatch { expected: usize, found: (usize, usize) },

    /// Hessian values need to be finite.
    InvalidHessian { row: usize, col: usize, value: f64 },

    // ---- Model errors raised inside a log-likelihood ----
    /// Unconstrained optimizer vector has the wrong length for the model.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },

    /// Model-space parameter left its admissible box.
    InvalidModelParam { name: &'static str, value: f64 },

    /// Any other model-level failure, carried as text.
    ModelError { text: String },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }
            OptError::InvalidTimeout { millis, reason } => {
                write!(f, "Invalid timeout of {millis} ms: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Finite Diffs ----
            OptError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }

            // ---- Model errors ----
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            OptError::InvalidModelParam { name, value } => {
                write!(f, "Model parameter {name} = {value} is outside its admissible range")
            }
            OptError::ModelError { text } => {
                write!(f, "Model error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

/// Recover an [`OptError`] from an Argmin error.
///
/// Errors raised by our own `CostFunction`/`Gradient` impls travel through
/// Argmin as `anyhow`-style boxed errors; they are downcast back to the
/// original `OptError` first. Genuine Argmin errors map onto the wrapper
/// variants, anything else becomes [`OptError::BackendError`].
impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<PinError> for OptError {
    fn from(err: PinError) -> Self {
        match err {
            PinError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            PinError::NonFiniteTheta { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
            PinError::InvalidParam { name, value, .. } => {
                OptError::InvalidModelParam { name, value }
            }
            PinError::Optimization(inner) => inner,
            other => OptError::ModelError { text: other.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Round-tripping an `OptError` through Argmin's boxed error type.
    // - Mapping of genuine `ArgminError` values onto wrapper variants.
    // - Conversion of PIN model errors into optimizer errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // An `OptError` raised inside a cost function must come back out of
    // Argmin unchanged rather than collapsing into `BackendError`.
    //
    // Given
    // -----
    // - `OptError::NonFiniteCost { value: NaN-free sentinel }` boxed into
    //   `argmin::core::Error`.
    //
    // Expect
    // ------
    // - `OptError::from` yields the identical variant and payload.
    fn opt_error_survives_argmin_round_trip() {
        let original = OptError::NonFiniteCost { value: f64::INFINITY };
        let boxed: Error = original.clone().into();

        let recovered = OptError::from(boxed);

        assert_eq!(recovered, original);
    }

    #[test]
    // Purpose
    // -------
    // Genuine Argmin errors map onto the matching wrapper variant.
    //
    // Given
    // -----
    // - `ArgminError::ConditionViolated` boxed into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - `OptError::ConditionViolated` with the same text.
    fn argmin_error_maps_to_wrapper_variant() {
        let boxed: Error =
            ArgminError::ConditionViolated { text: "descent direction".to_string() }.into();

        let mapped = OptError::from(boxed);

        assert_eq!(mapped, OptError::ConditionViolated { text: "descent direction".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // PIN parameter errors keep their structure when crossing into the
    // optimizer layer.
    //
    // Given
    // -----
    // - `PinError::ThetaLengthMismatch { expected: 4, actual: 3 }`.
    //
    // Expect
    // ------
    // - `OptError::ThetaLengthMismatch { expected: 4, actual: 3 }`.
    fn pin_error_converts_structurally() {
        let err = PinError::ThetaLengthMismatch { expected: 4, actual: 3 };

        assert_eq!(OptError::from(err), OptError::ThetaLengthMismatch { expected: 4, actual: 3 });
    }
}
