//! loglik_optimizer::types — numeric aliases and concrete L-BFGS types.
//!
//! Every optimizer vector is an `ndarray` container over `f64`. The EKOP
//! estimator works with four-element `Theta`/`Grad` values; the aliases are
//! dimension-agnostic so the finite-difference Hessian and the toy models in
//! the `api` tests can reuse them.
//!
//! The solver aliases pin Argmin's `(Param, Gradient, Float)` generics once,
//! so `builders` and `run` name a concrete L-BFGS type per line search.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Unconstrained parameter vector `θ`.
pub type Theta = Array1<f64>;

/// Gradient of `ℓ` (model side) or of `c = −ℓ` (solver side); same length as
/// [`Theta`].
pub type Grad = Array1<f64>;

/// Dense `n × n` second-derivative matrix.
pub type Hessian = Array2<f64>;

/// Solver objective `c(θ) = −ℓ(θ)`.
pub type Cost = f64;

/// Argmin counters keyed by name, e.g. `"cost_count"`, `"gradient_count"`.
pub type FnEvalMap = HashMap<String, u64>;

/// L-BFGS history length used when `MLEOptions::lbfgs_mem` is `None`.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
