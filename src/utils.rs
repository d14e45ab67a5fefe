//! Python-side input conversion helpers for the PyO3 bindings.
#[cfg(feature = "python-bindings")]
use ndarray::{arr0, Array1, ArrayD};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArrayDyn;

#[cfg(feature = "python-bindings")]
use crate::params::{
    fitted::{FitMode, FittedParams},
    DrawSelection, RawParam, RawParamMap, WarmStartOptions,
};

/// Copy a Python array-like of any rank into an owned `ArrayD<f64>`.
///
/// Accepts float64 NumPy arrays (including 0-d), Python/NumPy floats, and
/// flat sequences of floats.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_dyn_array<'py>(raw: &Bound<'py, PyAny>) -> PyResult<ArrayD<f64>> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArrayDyn<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(value) = raw.extract::<f64>() {
        return Ok(arr0(value).into_dyn());
    }

    let vec: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a float64 numpy.ndarray, a float, or a sequence of float64")
    })?;
    Ok(Array1::from(vec).into_dyn())
}

/// Build [`FittedParams`] from a Python `dict[str, array-like]` as stored on
/// a fitted model's `params`.
///
/// `mcmc_samples` only selects the fit mode; the draw count of a sampled fit
/// is read from the arrays (see [`FitMode::infer`]).
#[cfg(feature = "python-bindings")]
pub fn extract_fitted_params<'py>(
    params: &Bound<'py, PyDict>, mcmc_samples: usize,
) -> PyResult<FittedParams> {
    let mut raw = RawParamMap::new();
    for (key, value) in params.iter() {
        let name: String = key
            .extract()
            .map_err(|_| PyTypeError::new_err("parameter names must be str"))?;
        let array = extract_f64_dyn_array(&value)?;
        let param = RawParam::from_dyn(&name, array)?;
        raw.insert(name, param);
    }
    let mode = FitMode::infer(mcmc_samples, &raw);
    Ok(FittedParams::from_raw(raw, mode)?)
}

#[cfg(feature = "python-bindings")]
pub fn extract_warm_start_options(selection: Option<&str>) -> PyResult<WarmStartOptions> {
    let selection = match selection {
        Some(name) => name.parse::<DrawSelection>().map_err(PyValueError::new_err)?,
        None => DrawSelection::default(),
    };
    Ok(WarmStartOptions::new(selection))
}
