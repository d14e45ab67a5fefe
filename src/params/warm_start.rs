//! warm_start — reduce fitted parameters to initial values for a new fit.
//!
//! Purpose
//! -------
//! Turn a fitted model's [`FittedParams`] into a [`WarmStart`]: a mapping
//! that a subsequent fit can use as its initialization, so it converges from
//! the previous solution instead of from scratch.
//!
//! Key behaviors
//! -------------
//! - The output has exactly the keys of [`WARM_START_PARAMS`]
//!   (`k`, `m`, `sigma_obs`, `delta`, `beta`), no more, no fewer.
//! - Scalar parameters become [`WarmStartValue::Scalar`] holding a plain
//!   `f64`, never a length-1 array.
//! - Vector parameters become [`WarmStartValue::Vector`] holding a rank-1
//!   array whose length is the parameter's internal dimensionality.
//! - Sampled fits are reduced over draws according to [`DrawSelection`]
//!   (the last draw by default, or the posterior mean).
//!
//! Invariants & assumptions
//! ------------------------
//! - The scalar/vector split comes from the static [`ParamKind`] table, not
//!   from runtime shapes.
//! - For optimized fits the single MAP point is used regardless of the
//!   selection policy.
//! - Sampled rank-1 values of a vector parameter are read as `draws × 1`
//!   when their length equals the draw count, and as a single draw's vector
//!   otherwise.
//!
//! Conventions
//! -----------
//! - Draws live on axis 0; the last draw is the last row and the posterior
//!   mean is taken over axis 0.
//! - Extraction is pure; the input is only borrowed.
//!
//! Testing notes
//! -------------
//! - Unit tests cover both fit modes, both selection policies, missing
//!   parameters, zero-draw fits, single-draw vector parameters, and scalar
//!   parameters that carry more than one component.
use crate::params::{
    core::{
        kinds::{ParamKind, WARM_START_PARAMS},
        normalize::NormalizedParam,
    },
    errors::{ExtractError, ExtractResult, ShapeError},
    fitted::{FitMode, FittedParams},
};
use ndarray::{Array1, ArrayView1, Axis};
use std::collections::BTreeMap;
use std::str::FromStr;

/// How to reduce MCMC draws to a single initial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawSelection {
    /// The final draw.
    #[default]
    LastDraw,
    /// Arithmetic mean over all draws.
    PosteriorMean,
}

impl FromStr for DrawSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" | "posterior_mean" => Ok(DrawSelection::PosteriorMean),
            "last" | "last_draw" => Ok(DrawSelection::LastDraw),
            other => Err(format!(
                "invalid draw selection {other:?} (expected 'mean' or 'last')"
            )),
        }
    }
}

/// Options controlling warm-start extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WarmStartOptions {
    pub selection: DrawSelection,
}

impl WarmStartOptions {
    pub fn new(selection: DrawSelection) -> Self {
        WarmStartOptions { selection }
    }
}

/// A single warm-start value.
#[derive(Debug, Clone, PartialEq)]
pub enum WarmStartValue {
    Scalar(f64),
    Vector(Array1<f64>),
}

impl WarmStartValue {
    /// The value if it is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            WarmStartValue::Scalar(value) => Some(*value),
            WarmStartValue::Vector(_) => None,
        }
    }

    /// The values if they form a vector.
    pub fn as_vector(&self) -> Option<&Array1<f64>> {
        match self {
            WarmStartValue::Scalar(_) => None,
            WarmStartValue::Vector(values) => Some(values),
        }
    }
}

/// Initial values for a subsequent fit, keyed by parameter name.
#[derive(Debug, Clone, PartialEq)]
pub struct WarmStart {
    values: BTreeMap<String, WarmStartValue>,
}

impl WarmStart {
    pub fn get(&self, name: &str) -> Option<&WarmStartValue> {
        self.values.get(name)
    }

    /// Scalar value of `name`, if present and scalar.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(WarmStartValue::as_scalar)
    }

    /// Vector value of `name`, if present and a vector.
    pub fn vector(&self, name: &str) -> Option<&Array1<f64>> {
        self.get(name).and_then(WarmStartValue::as_vector)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WarmStartValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl IntoIterator for WarmStart {
    type Item = (String, WarmStartValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, WarmStartValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Extract warm-start values with default options (last draw).
///
/// # Errors
/// - [`ExtractError::MissingParameter`] if a recognized name is absent.
/// - [`ExtractError::EmptyDraws`] if a sampled parameter has no draws.
/// - [`ExtractError::Shape`] if a scalar parameter carries more than one
///   value per draw.
pub fn warm_start_params(fitted: &FittedParams) -> ExtractResult<WarmStart> {
    warm_start_params_with(fitted, &WarmStartOptions::default())
}

/// Extract warm-start values using `options`.
///
/// See [`warm_start_params`] for the error conditions.
pub fn warm_start_params_with(
    fitted: &FittedParams, options: &WarmStartOptions,
) -> ExtractResult<WarmStart> {
    let mode = fitted.mode();
    let mut values = BTreeMap::new();

    for (name, kind) in WARM_START_PARAMS {
        let param = fitted
            .get(name)
            .ok_or_else(|| ExtractError::MissingParameter { name: name.to_string() })?;
        let value = match kind {
            ParamKind::Scalar => {
                WarmStartValue::Scalar(extract_scalar(name, param, mode, options.selection)?)
            }
            ParamKind::Vector => {
                WarmStartValue::Vector(extract_vector(name, param, mode, options.selection)?)
            }
        };
        values.insert(name.to_string(), value);
    }

    log::debug!("extracted warm start ({mode:?}, {:?})", options.selection);
    Ok(WarmStart { values })
}

fn extract_scalar(
    name: &str, param: &NormalizedParam, mode: FitMode, selection: DrawSelection,
) -> ExtractResult<f64> {
    let width_error = |width| ShapeError::ScalarWidth { name: name.to_string(), width };

    match mode {
        FitMode::Optimized => {
            let first = match param {
                NormalizedParam::Vector(v) => v.iter().next().copied(),
                NormalizedParam::Matrix(m) => m.iter().next().copied(),
            };
            match (first, param.len()) {
                (Some(value), 1) => Ok(value),
                (None, _) => Err(ExtractError::EmptyDraws { name: name.to_string() }),
                (_, width) => Err(width_error(width).into()),
            }
        }
        FitMode::Sampled { .. } => {
            let draws = match param {
                NormalizedParam::Vector(v) => v.view(),
                NormalizedParam::Matrix(m) if m.ncols() == 1 => m.column(0),
                NormalizedParam::Matrix(m) => return Err(width_error(m.ncols()).into()),
            };
            reduce_scalar_draws(name, draws, selection)
        }
    }
}

fn reduce_scalar_draws(
    name: &str, draws: ArrayView1<f64>, selection: DrawSelection,
) -> ExtractResult<f64> {
    let n = draws.len();
    if n == 0 {
        return Err(ExtractError::EmptyDraws { name: name.to_string() });
    }
    Ok(match selection {
        DrawSelection::PosteriorMean => draws.sum() / n as f64,
        DrawSelection::LastDraw => draws[n - 1],
    })
}

fn extract_vector(
    name: &str, param: &NormalizedParam, mode: FitMode, selection: DrawSelection,
) -> ExtractResult<Array1<f64>> {
    let empty = || ExtractError::EmptyDraws { name: name.to_string() };

    match (mode, param) {
        (FitMode::Optimized, NormalizedParam::Vector(v)) => Ok(v.clone()),
        (FitMode::Optimized, NormalizedParam::Matrix(m)) => {
            if m.nrows() == 0 {
                return Err(empty());
            }
            Ok(m.row(0).to_owned())
        }
        (FitMode::Sampled { draws }, NormalizedParam::Vector(v)) if v.len() == draws => {
            let value = reduce_scalar_draws(name, v.view(), selection)?;
            Ok(Array1::from_elem(1, value))
        }
        (FitMode::Sampled { .. }, NormalizedParam::Vector(v)) => Ok(v.clone()),
        (FitMode::Sampled { .. }, NormalizedParam::Matrix(m)) => {
            if m.nrows() == 0 {
                return Err(empty());
            }
            match selection {
                DrawSelection::PosteriorMean => m.mean_axis(Axis(0)).ok_or_else(empty),
                DrawSelection::LastDraw => Ok(m.row(m.nrows() - 1).to_owned()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::core::{
        normalize::{normalize_params, ParamMap, RawParamMap},
        rank::RawParam,
    };
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Key set and value typing of extracted warm starts.
    // - Optimized vs sampled fits and both draw-selection policies.
    // - Error paths: missing parameters, zero draws, wide scalar params.
    //
    // They intentionally DO NOT cover:
    // - How `FittedParams` are assembled from backend columns (see `fitted`).
    // -------------------------------------------------------------------------

    fn sampled_params() -> FittedParams {
        let mut params = ParamMap::new();
        params.insert("k".into(), NormalizedParam::Vector(array![1.0, 2.0, 3.0]));
        params.insert("m".into(), NormalizedParam::Matrix(array![[0.1], [0.2], [0.3]]));
        params.insert("sigma_obs".into(), NormalizedParam::Vector(array![0.5, 0.5, 0.5]));
        params.insert(
            "delta".into(),
            NormalizedParam::Matrix(array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]]),
        );
        params.insert("beta".into(), NormalizedParam::Matrix(array![[1.0], [2.0], [6.0]]));
        params.insert("trend".into(), NormalizedParam::Matrix(Array2::zeros((3, 4))));
        FittedParams::from_normalized(params, FitMode::Sampled { draws: 3 })
    }

    fn optimized_params() -> FittedParams {
        let mut params = ParamMap::new();
        params.insert("k".into(), NormalizedParam::Matrix(array![[0.4]]));
        params.insert("m".into(), NormalizedParam::Vector(array![0.2]));
        params.insert("sigma_obs".into(), NormalizedParam::Matrix(array![[0.05]]));
        params.insert("delta".into(), NormalizedParam::Matrix(array![[0.01, -0.02, 0.03]]));
        params.insert("beta".into(), NormalizedParam::Vector(array![0.7, 0.8]));
        FittedParams::from_normalized(params, FitMode::Optimized)
    }

    #[test]
    // Purpose
    // -------
    // Verify that the output holds exactly the recognized names, scalars as
    // plain `f64`, vectors as rank-1 arrays of the internal dimensionality.
    //
    // Given
    // -----
    // - A sampled fit that also carries an auxiliary `trend` parameter.
    //
    // Expect
    // ------
    // - Keys are exactly `{beta, delta, k, m, sigma_obs}`.
    // - `delta` has length 2, `beta` has length 1.
    fn warm_start_params_has_exact_keys_and_types() {
        // Act
        let ws = warm_start_params(&sampled_params()).unwrap();

        // Assert
        let names: Vec<&str> = ws.names().collect();
        assert_eq!(names, vec!["beta", "delta", "k", "m", "sigma_obs"]);
        for name in ["k", "m", "sigma_obs"] {
            assert!(matches!(ws.get(name), Some(WarmStartValue::Scalar(_))), "{name}");
        }
        assert_eq!(ws.vector("delta").map(|v| v.len()), Some(2));
        assert_eq!(ws.vector("beta").map(|v| v.len()), Some(1));
        assert!(ws.get("trend").is_none());
    }

    #[test]
    // Purpose
    // -------
    // Verify the default last-draw reduction for sampled fits.
    fn warm_start_params_uses_last_draw_by_default() {
        let ws = warm_start_params(&sampled_params()).unwrap();

        assert_eq!(ws.scalar("k"), Some(3.0));
        assert_eq!(ws.scalar("m"), Some(0.3));
        assert_eq!(ws.vector("delta"), Some(&array![4.0, 5.0]));
        assert_eq!(ws.vector("beta"), Some(&array![6.0]));
    }

    #[test]
    // Purpose
    // -------
    // Verify the opt-in posterior-mean reduction for sampled fits.
    fn warm_start_params_with_posterior_mean() {
        let options = WarmStartOptions::new(DrawSelection::PosteriorMean);

        let ws = warm_start_params_with(&sampled_params(), &options).unwrap();

        assert_relative_eq!(ws.scalar("k").unwrap(), 2.0);
        assert_relative_eq!(ws.scalar("m").unwrap(), 0.2, epsilon = 1e-12);
        assert_eq!(ws.vector("delta"), Some(&array![2.0, 3.0]));
        assert_eq!(ws.vector("beta"), Some(&array![3.0]));
    }

    #[test]
    // Purpose
    // -------
    // Regression guard for single-draw sampled fits whose vector parameters
    // are bare rank-1 arrays: the warm start keeps their full length.
    //
    // Given
    // -----
    // - `Sampled { draws: 1 }` with `delta` of length 3 and `beta` of
    //   length 2, both as `NormalizedParam::Vector`.
    //
    // Expect
    // ------
    // - `delta == [0.01, 0.02, 0.03]` and `beta == [0.7, 0.8]` under either
    //   selection policy.
    fn warm_start_params_single_draw_keeps_vector_length() {
        // Arrange
        let mut params = ParamMap::new();
        params.insert("k".into(), NormalizedParam::Vector(array![0.5]));
        params.insert("m".into(), NormalizedParam::Vector(array![0.1]));
        params.insert("sigma_obs".into(), NormalizedParam::Vector(array![0.05]));
        params.insert("delta".into(), NormalizedParam::Vector(array![0.01, 0.02, 0.03]));
        params.insert("beta".into(), NormalizedParam::Vector(array![0.7, 0.8]));
        let fitted = FittedParams::from_normalized(params, FitMode::Sampled { draws: 1 });

        for selection in [DrawSelection::LastDraw, DrawSelection::PosteriorMean] {
            // Act
            let ws = warm_start_params_with(&fitted, &WarmStartOptions::new(selection)).unwrap();

            // Assert
            assert_eq!(ws.vector("delta"), Some(&array![0.01, 0.02, 0.03]), "{selection:?}");
            assert_eq!(ws.vector("beta"), Some(&array![0.7, 0.8]), "{selection:?}");
            assert_eq!(ws.scalar("k"), Some(0.5));
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that optimized fits unwrap the MAP point from either rank.
    fn warm_start_params_unwraps_optimized_point() {
        let ws = warm_start_params(&optimized_params()).unwrap();

        assert_eq!(ws.scalar("k"), Some(0.4));
        assert_eq!(ws.scalar("m"), Some(0.2));
        assert_eq!(ws.scalar("sigma_obs"), Some(0.05));
        assert_eq!(ws.vector("delta"), Some(&array![0.01, -0.02, 0.03]));
        assert_eq!(ws.vector("beta"), Some(&array![0.7, 0.8]));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a multi-row optimized matrix yields the same warm start whether
    // it is settled by `from_raw` or wrapped as-is by `from_normalized`.
    //
    // Expect
    // ------
    // - `delta` is the first row, `[0.01, 0.02]`, on both paths.
    fn warm_start_params_optimized_multi_row_matches_across_constructors() {
        // Arrange
        let mut raw = RawParamMap::new();
        raw.insert("k".into(), RawParam::Scalar(0.4));
        raw.insert("m".into(), RawParam::Vector(array![0.2]));
        raw.insert("sigma_obs".into(), RawParam::Matrix(array![[0.05]]));
        raw.insert("delta".into(), RawParam::Matrix(array![[0.01, 0.02], [0.03, 0.04]]));
        raw.insert("beta".into(), RawParam::Vector(array![0.7, 0.8]));
        let normalized = normalize_params(raw.clone()).unwrap();

        // Act
        let settled = warm_start_params(&FittedParams::from_raw(raw, FitMode::Optimized).unwrap());
        let wrapped =
            warm_start_params(&FittedParams::from_normalized(normalized, FitMode::Optimized));

        // Assert
        assert_eq!(settled.unwrap(), wrapped.clone().unwrap());
        assert_eq!(wrapped.unwrap().vector("delta"), Some(&array![0.01, 0.02]));
    }

    #[test]
    fn warm_start_params_reports_missing_parameter() {
        let mut params = optimized_params().into_inner();
        params.remove("sigma_obs");
        let fitted = FittedParams::from_normalized(params, FitMode::Optimized);

        let err = warm_start_params(&fitted).unwrap_err();

        assert_eq!(err, ExtractError::MissingParameter { name: "sigma_obs".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // Ensure zero-draw sampled fits fail instead of producing NaN.
    fn warm_start_params_rejects_empty_draws() {
        let mut params = sampled_params().into_inner();
        params.insert("k".into(), NormalizedParam::Vector(Array1::zeros(0)));
        let fitted = FittedParams::from_normalized(params, FitMode::Sampled { draws: 0 });

        let err = warm_start_params(&fitted).unwrap_err();

        assert_eq!(err, ExtractError::EmptyDraws { name: "k".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // Ensure a scalar parameter with several components per draw is a shape
    // error rather than silently truncated.
    fn warm_start_params_rejects_wide_scalar() {
        let mut params = sampled_params().into_inner();
        params.insert("m".into(), NormalizedParam::Matrix(Array2::zeros((3, 2))));
        let fitted = FittedParams::from_normalized(params, FitMode::Sampled { draws: 3 });

        let err = warm_start_params(&fitted).unwrap_err();

        assert_eq!(
            err,
            ExtractError::Shape(ShapeError::ScalarWidth { name: "m".to_string(), width: 2 })
        );
    }

    #[test]
    fn draw_selection_parses_names() {
        assert_eq!("mean".parse::<DrawSelection>(), Ok(DrawSelection::PosteriorMean));
        assert_eq!("LAST".parse::<DrawSelection>(), Ok(DrawSelection::LastDraw));
        assert!("median".parse::<DrawSelection>().is_err());
    }
}
