//! rust_microstructure — market-microstructure estimators with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! PIN estimation and the closed-form microstructure measures to Python via
//! the `_rust_microstructure` extension module. When the `python-bindings`
//! feature is enabled, this module defines the Python-facing classes,
//! functions and submodules used by the `rust_microstructure` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`pin`, `measures`, `optimization`,
//!   `inference`) as the public crate surface.
//! - Define `#[pyclass]`/`#[pyfunction]` wrappers and the `#[pymodule]`
//!   initializer for the `_rust_microstructure` Python extension.
//! - Create and register Python submodules (`pin_measure`, `trade_direction`,
//!   `liquidity_measures`, `volatility_measures`, `investment_metrics`) so
//!   that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - Trade directions cross the boundary as `+1` (buy), `−1` (sell) and `0`
//!   (undetermined).
//! - Errors from core Rust code ([`pin::PinError`], [`measures::MeasureError`])
//!   are converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_rust_microstructure` and wraps its
//!   classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by the integration tests under `tests/`.

pub mod inference;
pub mod measures;
pub mod optimization;
pub mod pin;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    measures::{
        investment, liquidity,
        trade_direction as direction,
        volatility::{RollAnalysis, roll_model_analysis},
    },
    pin::{
        core::data::VolumeSeries,
        models::ekop::{EKOPModel, PinEstimate},
    },
    utils::{
        build_pin_options, directions_to_signs, extract_counts, extract_directions,
        extract_f64_vec,
    },
};

/// PinEKOP — Python-facing wrapper for the EKOP PIN estimator.
///
/// Purpose
/// -------
/// Expose [`EKOPModel`] to Python callers while preserving the core Rust
/// validation and error handling.
///
/// Key behaviors
/// -------------
/// - Build [`pin::PinOptions`] from Python keyword arguments (initial guess,
///   optimizer tolerances, line search, L-BFGS memory).
/// - `fit(buys, sells)` converts integer array-likes into a [`VolumeSeries`],
///   runs the estimator and caches the result.
/// - Property getters expose the PIN, the fitted parameters and the optimizer
///   diagnostics; `standard_errors()` evaluates the delta-method errors at
///   the cached fit.
///
/// Parameters
/// ----------
/// Constructed from Python via `PinEKOP(initial_guess=None, tol_grad=None,
/// tol_cost=None, max_iter=None, line_searcher=None, lbfgs_mem=None)`:
/// - `initial_guess`: `Option<(f64, f64, f64, f64)>`
///   Starting `(α, μ, εb, εs)`; defaults to `(0.2, 1, 1, 1)`.
/// - `tol_grad`, `tol_cost`, `max_iter`, `line_searcher`, `lbfgs_mem`
///   Optimizer configuration used to build [`optimization::loglik_optimizer::MLEOptions`].
///
/// Notes
/// -----
/// - Getters raise `ValueError` until `fit` has been called.
/// - Non-converged fits are returned with `converged == False`; pass
///   `require_convergence=True` to `fit` to raise instead.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_microstructure.pin_measure")]
pub struct PinEKOP {
    /// Underlying Rust EKOPModel.
    pub inner: EKOPModel,
    fitted: Option<(PinEstimate, VolumeSeries)>,
}

#[cfg(feature = "python-bindings")]
impl PinEKOP {
    fn fitted(&self) -> PyResult<&(PinEstimate, VolumeSeries)> {
        self.fitted.as_ref().ok_or_else(|| {
            pyo3::exceptions::PyValueError::new_err("PinEKOP has not been fitted; call fit() first")
        })
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PinEKOP {
    #[new]
    #[pyo3(
        signature = (
            initial_guess = None,
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            line_searcher = None,
            lbfgs_mem = None,
        ),
        text_signature = "(initial_guess=None, tol_grad=None, tol_cost=None, max_iter=None, \
                          line_searcher=None, lbfgs_mem=None)"
    )]
    pub fn new(
        initial_guess: Option<(f64, f64, f64, f64)>, tol_grad: Option<f64>, tol_cost: Option<f64>,
        max_iter: Option<usize>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
    ) -> PyResult<Self> {
        let options =
            build_pin_options(initial_guess, tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem)?;
        Ok(PinEKOP { inner: EKOPModel::new(options), fitted: None })
    }

    #[pyo3(
        signature = (buys, sells, require_convergence = false),
        text_signature = "(self, buys, sells, /, require_convergence=False)"
    )]
    pub fn fit<'py>(
        &mut self, buys: &Bound<'py, PyAny>, sells: &Bound<'py, PyAny>, require_convergence: bool,
    ) -> PyResult<f64> {
        let series = VolumeSeries::new(extract_counts(buys, "buys")?, extract_counts(sells, "sells")?)?;
        let mut estimate = self.inner.estimate(&series)?;
        if require_convergence {
            estimate = estimate.ensure_converged()?;
        }
        let pin = estimate.pin;
        self.fitted = Some((estimate, series));
        Ok(pin)
    }

    /// Standard errors of `(α, μ, εb, εs)` at the cached fit.
    pub fn standard_errors(&self) -> PyResult<Vec<f64>> {
        let (estimate, series) = self.fitted()?;
        Ok(self.inner.standard_errors(&estimate.fit, series)?.to_vec())
    }

    #[getter]
    pub fn pin(&self) -> PyResult<f64> {
        Ok(self.fitted()?.0.pin)
    }

    /// Fitted `(α, μ, εb, εs)`.
    #[getter]
    pub fn params(&self) -> PyResult<(f64, f64, f64, f64)> {
        let p = self.fitted()?.0.fit.params;
        Ok((p.alpha, p.mu, p.eps_b, p.eps_s))
    }

    #[getter]
    pub fn neg_log_likelihood(&self) -> PyResult<f64> {
        Ok(self.fitted()?.0.fit.neg_log_likelihood)
    }

    #[getter]
    pub fn converged(&self) -> PyResult<bool> {
        Ok(self.fitted()?.0.fit.converged)
    }

    #[getter]
    pub fn status(&self) -> PyResult<String> {
        Ok(self.fitted()?.0.fit.status.clone())
    }

    #[getter]
    pub fn iterations(&self) -> PyResult<usize> {
        Ok(self.fitted()?.0.fit.iterations)
    }

    #[getter]
    pub fn grad_norm(&self) -> PyResult<Option<f64>> {
        Ok(self.fitted()?.0.fit.grad_norm)
    }

    #[getter]
    pub fn fn_evals(&self) -> PyResult<Vec<(String, u64)>> {
        Ok(self.fitted()?.0.fit.fn_evals.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }
}

/// Probability of informed trading with default options.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(buys, sells, /)")]
fn estimate_pin<'py>(buys: &Bound<'py, PyAny>, sells: &Bound<'py, PyAny>) -> PyResult<f64> {
    let buys = extract_counts(buys, "buys")?;
    let sells = extract_counts(sells, "sells")?;
    Ok(pin::models::ekop::estimate_pin(&buys, &sells)?.pin)
}

/// Tick-test directions as `+1 / −1 / 0`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(prices, /)")]
fn tick_direction<'py>(py: Python<'py>, prices: &Bound<'py, PyAny>) -> PyResult<Vec<i8>> {
    let prices = extract_f64_vec(py, prices, "prices")?;
    Ok(directions_to_signs(&direction::tick_direction(&prices)?))
}

/// Lee–Ready directions as `+1 / −1 / 0`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(prices, bids, asks, /)")]
fn lee_ready_direction<'py>(
    py: Python<'py>, prices: &Bound<'py, PyAny>, bids: &Bound<'py, PyAny>,
    asks: &Bound<'py, PyAny>,
) -> PyResult<Vec<i8>> {
    let prices = extract_f64_vec(py, prices, "prices")?;
    let bids = extract_f64_vec(py, bids, "bids")?;
    let asks = extract_f64_vec(py, asks, "asks")?;
    Ok(directions_to_signs(&direction::lee_ready_direction(&prices, &bids, &asks)?))
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(asks, bids, /)")]
fn quoted_spread<'py>(
    py: Python<'py>, asks: &Bound<'py, PyAny>, bids: &Bound<'py, PyAny>,
) -> PyResult<f64> {
    let asks = extract_f64_vec(py, asks, "asks")?;
    let bids = extract_f64_vec(py, bids, "bids")?;
    Ok(liquidity::quoted_spread(&asks, &bids)?)
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(prices, bids, asks, directions, /)")]
fn effective_spread<'py>(
    py: Python<'py>, prices: &Bound<'py, PyAny>, bids: &Bound<'py, PyAny>,
    asks: &Bound<'py, PyAny>, directions: &Bound<'py, PyAny>,
) -> PyResult<f64> {
    let prices = extract_f64_vec(py, prices, "prices")?;
    let bids = extract_f64_vec(py, bids, "bids")?;
    let asks = extract_f64_vec(py, asks, "asks")?;
    let directions = extract_directions(directions)?;
    Ok(liquidity::effective_spread(&prices, &bids, &asks, &directions)?)
}

/// RollModel — read-only view of a [`RollAnalysis`] for Python.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_microstructure.volatility_measures")]
pub struct RollModel {
    pub inner: RollAnalysis,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl RollModel {
    #[new]
    #[pyo3(text_signature = "(prices, /)")]
    pub fn new<'py>(py: Python<'py>, prices: &Bound<'py, PyAny>) -> PyResult<Self> {
        let prices = extract_f64_vec(py, prices, "prices")?;
        Ok(RollModel { inner: roll_model_analysis(&prices)? })
    }

    #[getter]
    pub fn average_price(&self) -> f64 {
        self.inner.average_price
    }

    #[getter]
    pub fn gamma0(&self) -> f64 {
        self.inner.gamma0
    }

    #[getter]
    pub fn gamma1(&self) -> f64 {
        self.inner.gamma1
    }

    #[getter]
    pub fn sigma2_u(&self) -> f64 {
        self.inner.sigma2_u
    }

    #[getter]
    pub fn roll_spread(&self) -> Option<f64> {
        self.inner.roll_spread
    }

    #[getter]
    pub fn daily_volatility_roll(&self) -> Option<f64> {
        self.inner.daily_volatility_roll
    }

    #[getter]
    pub fn annualized_volatility_roll(&self) -> Option<f64> {
        self.inner.annualized_volatility_roll
    }

    #[getter]
    pub fn log_normal_annualized_volatility_roll(&self) -> Option<f64> {
        self.inner.log_normal_annualized_volatility_roll
    }

    #[getter]
    pub fn total_daily_volatility(&self) -> f64 {
        self.inner.total_daily_volatility
    }

    #[getter]
    pub fn total_annualized_volatility(&self) -> f64 {
        self.inner.total_annualized_volatility
    }

    #[getter]
    pub fn log_normal_total_annualized_volatility(&self) -> f64 {
        self.inner.log_normal_total_annualized_volatility
    }
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(start_value, end_value, periods, /)")]
fn cagr(start_value: f64, end_value: f64, periods: f64) -> PyResult<f64> {
    Ok(investment::cagr(start_value, end_value, periods)?)
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(gain, cost, /)")]
fn roi(gain: f64, cost: f64) -> PyResult<f64> {
    Ok(investment::roi(gain, cost)?)
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (returns, risk_free_rate = investment::DEFAULT_RISK_FREE_RATE),
       text_signature = "(returns, /, risk_free_rate=0.01)")]
fn sharpe_ratio<'py>(
    py: Python<'py>, returns: &Bound<'py, PyAny>, risk_free_rate: f64,
) -> PyResult<f64> {
    let returns = extract_f64_vec(py, returns, "returns")?;
    Ok(investment::sharpe_ratio(&returns, risk_free_rate)?)
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(prices, /)")]
fn log_return_volatility<'py>(py: Python<'py>, prices: &Bound<'py, PyAny>) -> PyResult<f64> {
    let prices = extract_f64_vec(py, prices, "prices")?;
    Ok(investment::log_return_volatility(&prices)?)
}

/// _rust_microstructure — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_microstructure` Python module and register its
/// submodules used by the public `rust_microstructure` package.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating submodules or manipulating `sys.modules` fails.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_microstructure<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let submodules = [
        ("pin_measure", pin_measure as SubmoduleInit),
        ("trade_direction", trade_direction),
        ("liquidity_measures", liquidity_measures),
        ("volatility_measures", volatility_measures),
        ("investment_metrics", investment_metrics),
    ];
    let sys_modules = py.import("sys")?.getattr("modules")?;
    for (name, init) in submodules {
        let sub = PyModule::new(py, name)?;
        init(&sub)?;
        m.add_submodule(&sub)?;
        // Manually add submodules into sys.modules to allow for dot notation.
        sys_modules.set_item(format!("rust_microstructure.{name}"), sub)?;
    }
    Ok(())
}

#[cfg(feature = "python-bindings")]
type SubmoduleInit = for<'py> fn(&Bound<'py, PyModule>) -> PyResult<()>;

#[cfg(feature = "python-bindings")]
fn pin_measure(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PinEKOP>()?;
    m.add_function(wrap_pyfunction!(estimate_pin, m)?)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn trade_direction(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(tick_direction, m)?)?;
    m.add_function(wrap_pyfunction!(lee_ready_direction, m)?)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn liquidity_measures(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(quoted_spread, m)?)?;
    m.add_function(wrap_pyfunction!(effective_spread, m)?)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn volatility_measures(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<RollModel>()?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn investment_metrics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(cagr, m)?)?;
    m.add_function(wrap_pyfunction!(roi, m)?)?;
    m.add_function(wrap_pyfunction!(sharpe_ratio, m)?)?;
    m.add_function(wrap_pyfunction!(log_return_volatility, m)?)?;
    Ok(())
}
