//! prophet_params — parameter shape normalization and warm starts for
//! Prophet-style forecasting fits, with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the normalizer and warm-start extractor to Python via the
//! `_prophet_params` extension module. When the `python-bindings` feature is
//! enabled, this module defines the Python-facing functions and submodule.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`params`) as the public crate surface.
//! - Define `#[pyfunction]` wrappers and the `#[pymodule]` initializer for
//!   the `_prophet_params` Python extension.
//! - Register the `params` submodule under `prophet_params` so that
//!   dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All shape logic lives in [`params`]; this file performs only FFI glue,
//!   input conversion, and error mapping.
//! - Python callers receive plain `float` objects for scalar warm-start
//!   values and 1-D `numpy.ndarray` objects for vector values.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are propagated as [`params::ShapeError`] /
//!   [`params::ExtractError`] internally and converted to `ValueError` /
//!   `KeyError` at the PyO3 boundary.
//! - The library emits `log` records at debug level and never installs a
//!   logger; binaries and test harnesses choose the backend.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`params`] (or [`params::prelude`])
//!   and ignore the items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_prophet_params.params` and calls
//!   `warm_start_params(model.params, model.mcmc_samples)`.
//!
//! Testing notes
//! -------------
//! - Behavior is covered by unit tests in the inner modules and by the
//!   integration tests under `tests/`.

pub mod params;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayDyn};

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    params::{core::normalize::normalize_dyn, warm_start::warm_start_params_with, WarmStartValue},
    utils::{extract_f64_dyn_array, extract_fitted_params, extract_warm_start_options},
};

/// normalize_param — rank-normalize one backend parameter array.
///
/// Parameters
/// ----------
/// - `name`: `str`
///   Parameter name, used in error messages.
/// - `array`: array-like
///   Float64 array of rank 0, 1, or 2 (or a float / sequence of floats).
///
/// Returns
/// -------
/// `numpy.ndarray` of rank 1 or 2. A 0-d input becomes a length-1 array.
///
/// Errors
/// ------
/// - `ValueError` if the array's rank is above 2.
/// - `TypeError` if the input is not numeric.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "normalize_param")]
#[pyo3(text_signature = "(name, array, /)")]
pub fn py_normalize_param<'py>(
    py: Python<'py>, name: &str, array: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let array = extract_f64_dyn_array(array)?;
    let normalized = normalize_dyn(name, array)?;
    Ok(normalized.into_dyn().into_pyarray(py))
}

/// warm_start_params — initial values for a new fit from fitted parameters.
///
/// Parameters
/// ----------
/// - `params`: `dict[str, numpy.ndarray]`
///   A fitted model's `params` mapping.
/// - `mcmc_samples`: `int`
///   `0` for an optimized (MAP) fit, otherwise the MCMC sample setting. The
///   draw count itself is read from the arrays.
/// - `selection`: `str`
///   `"last"` (final draw, default) or `"mean"` (posterior mean); ignored
///   for optimized fits.
///
/// Returns
/// -------
/// `dict` with keys `k`, `m`, `sigma_obs` (Python `float`) and `delta`,
/// `beta` (1-D `numpy.ndarray`).
///
/// Errors
/// ------
/// - `KeyError` if a required parameter is missing.
/// - `ValueError` for unsupported ranks, empty draws, or an unknown
///   selection policy.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "warm_start_params")]
#[pyo3(
    text_signature = "(params, /, mcmc_samples=0, selection='last')",
    signature = (params, mcmc_samples = 0, selection = None)
)]
pub fn py_warm_start_params<'py>(
    py: Python<'py>, params: &Bound<'py, PyDict>, mcmc_samples: usize, selection: Option<&str>,
) -> PyResult<Bound<'py, PyDict>> {
    let fitted = extract_fitted_params(params, mcmc_samples)?;
    let options = extract_warm_start_options(selection)?;
    let warm_start = warm_start_params_with(&fitted, &options)?;

    let out = PyDict::new(py);
    for (name, value) in warm_start {
        match value {
            WarmStartValue::Scalar(v) => out.set_item(name, v)?,
            WarmStartValue::Vector(v) => out.set_item(name, v.into_pyarray(py))?,
        }
    }
    Ok(out)
}

/// _prophet_params — PyO3 module initializer for the Python extension.
///
/// Creates the `params` submodule, attaches it to `_prophet_params`, and
/// registers it in `sys.modules` as `prophet_params.params` so it is
/// importable via a dotted path.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _prophet_params<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let params_mod = PyModule::new(_py, "params")?;
    params(_py, m, &params_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("prophet_params.params", params_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn params<'py>(
    _py: Python, prophet_params: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_normalize_param, m)?)?;
    m.add_function(wrap_pyfunction!(py_warm_start_params, m)?)?;
    prophet_params.add_submodule(m)?;
    Ok(())
}
