//! Python-boundary helpers: array extraction and option builders used by the
//! `#[pyclass]`/`#[pyfunction]` wrappers in `lib.rs`.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    measures::trade_direction::TradeDirection,
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, Tolerances},
    pin::{
        core::{likelihood::DegeneratePolicy, options::PinOptions, params::PinParams},
        errors::PinError,
    },
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a float array-like into an owned buffer, naming the argument in the
/// error when the data is not contiguous.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(slice.to_vec())
}

/// Extract non-negative integer counts from an int64 array, a pandas Series,
/// or any sequence of Python ints.
#[cfg(feature = "python-bindings")]
pub fn extract_counts(raw_data: &Bound<'_, PyAny>, name: &str) -> PyResult<Vec<u64>> {
    let signed: Vec<i64> = if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<i64>>() {
        arr_ro.as_array().to_vec()
    } else if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        obj.extract::<Vec<i64>>().map_err(|_| {
            pyo3::exceptions::PyTypeError::new_err(format!("{name} must contain integers"))
        })?
    } else {
        raw_data.extract().map_err(|_| {
            pyo3::exceptions::PyTypeError::new_err(format!(
                "{name} must be a 1-D integer array or sequence of ints"
            ))
        })?
    };

    signed
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            u64::try_from(v).map_err(|_| {
                PyValueError::new_err(format!("{name}[{i}] = {v} is negative; counts must be ≥ 0"))
            })
        })
        .collect()
}

/// Map `{+1, −1, 0}` signs to [`TradeDirection`] values.
#[cfg(feature = "python-bindings")]
pub fn extract_directions(raw_data: &Bound<'_, PyAny>) -> PyResult<Vec<TradeDirection>> {
    let signs: Vec<i64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err("directions must be a sequence of ints (+1, -1, 0)")
    })?;
    Ok(signs.into_iter().map(TradeDirection::from_sign).collect())
}

#[cfg(feature = "python-bindings")]
pub fn directions_to_signs(directions: &[TradeDirection]) -> Vec<i8> {
    directions.iter().map(|d| d.sign()).collect()
}

/// Build validated [`PinOptions`] from optional Python keyword arguments.
///
/// Unset initial-guess entries fall back to `PinParams::DEFAULT_INITIAL_GUESS`;
/// when no tolerance is given the optimizer defaults apply.
#[cfg(feature = "python-bindings")]
pub fn build_pin_options(
    initial_guess: Option<(f64, f64, f64, f64)>, tol_grad: Option<f64>, tol_cost: Option<f64>,
    max_iter: Option<usize>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<PinOptions> {
    let guess = match initial_guess {
        Some((alpha, mu, eps_b, eps_s)) => PinParams::new(alpha, mu, eps_b, eps_s)?,
        None => PinParams::DEFAULT_INITIAL_GUESS,
    };
    let mle_opts = extract_mle_opts(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem)?;
    Ok(PinOptions::new(guess, mle_opts, DegeneratePolicy::SkipDegeneratePeriod)?)
}

#[cfg(feature = "python-bindings")]
fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<MLEOptions> {
    use std::str::FromStr;

    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        Tolerances::default()
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter).map_err(PinError::from)?
    };

    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(PinError::from)?,
        None => LineSearcher::MoreThuente,
    };

    let opts = MLEOptions::new(tols, ls, false, lbfgs_mem, None).map_err(PinError::from)?;

    Ok(opts)
}
