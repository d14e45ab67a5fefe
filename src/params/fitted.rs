//! fitted — a fitted model's normalized parameters and fit mode.
//!
//! Purpose
//! -------
//! Hold the `params` of a fitted model: the normalized parameter mapping
//! together with the [`FitMode`] that explains how to read it (a single MAP
//! point or `n` MCMC draws).
//!
//! Key behaviors
//! -------------
//! - [`FittedParams::from_optimizing`] assembles a MAP point from backend
//!   columns, normalizes it, and stores every parameter as a `1 × n` matrix.
//! - [`FittedParams::from_sampling`] assembles a draws matrix, normalizes it,
//!   and settles shapes per parameter:
//!   - `Matrix(draws, 1)` collapses to `Vector(draws)`;
//!   - a rank-1 `delta`/`beta` of length `draws` is lifted to
//!     `Matrix(draws, 1)`; any other length is one draw's vector and is
//!     lifted to `Matrix(1, dim)`.
//! - [`FittedParams::from_raw`] accepts an already assembled raw mapping from
//!   any backend and runs the same normalize-then-settle pipeline.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every stored value has rank 1 or 2; `shape().len() >= 1` always holds.
//! - Settling dispatches on the [`NormalizedParam`] tag. A rank-1 value never
//!   has its second dimension read, so single-draw and degenerate sampler
//!   configurations cannot trigger out-of-bounds indexing.
//! - Instances are immutable after construction and are `Send + Sync`.
//!
//! Conventions
//! -----------
//! - Axis 0 of a matrix indexes draws (one row for a MAP point); axis 1
//!   indexes the parameter's internal components.
//! - An optimized matrix with several rows keeps only its first row.
use crate::params::{
    core::{
        columns::{raw_params_from_draws, raw_params_from_point},
        kinds::{ParamKind, WARM_START_PARAMS},
        normalize::{normalize_params, NormalizedParam, ParamMap, RawParamMap},
        rank::RawParam,
    },
    errors::ShapeResult,
};
use ndarray::{s, ArrayView1, ArrayView2, Axis};

/// How the model was fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// MAP optimization: one point.
    #[default]
    Optimized,
    /// MCMC sampling with `draws` draws (chains flattened).
    Sampled { draws: usize },
}

impl FitMode {
    /// Fit mode matching a `mcmc_samples` setting (`0` means optimization).
    pub fn from_mcmc_samples(mcmc_samples: usize) -> FitMode {
        if mcmc_samples == 0 { FitMode::Optimized } else { FitMode::Sampled { draws: mcmc_samples } }
    }

    /// Fit mode for a `mcmc_samples` setting, with the draw count read from
    /// the leading axis of the first scalar parameter present in `raw`.
    ///
    /// Backends flatten chains into the draw axis, so the stored draw count
    /// generally differs from `mcmc_samples`. The setting is only used as the
    /// count when `raw` carries no scalar parameter.
    pub fn infer(mcmc_samples: usize, raw: &RawParamMap) -> FitMode {
        match FitMode::from_mcmc_samples(mcmc_samples) {
            FitMode::Optimized => FitMode::Optimized,
            FitMode::Sampled { draws } => {
                FitMode::Sampled { draws: scalar_draw_count(raw).unwrap_or(draws) }
            }
        }
    }
}

fn scalar_draw_count(raw: &RawParamMap) -> Option<usize> {
    WARM_START_PARAMS
        .iter()
        .filter(|(_, kind)| *kind == ParamKind::Scalar)
        .find_map(|(name, _)| raw.get(*name))
        .map(|param| match param {
            RawParam::Scalar(_) => 1,
            RawParam::Vector(v) => v.len(),
            RawParam::Matrix(m) => m.nrows(),
        })
}

/// Normalized parameters of a fitted model.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedParams {
    params: ParamMap,
    mode: FitMode,
}

impl FittedParams {
    /// Build from a single optimized point and its backend column names.
    ///
    /// # Errors
    /// - Column assembly errors (`ColumnCountMismatch`, `RepeatedColumn`,
    ///   `MalformedColumnName`, `NonContiguousIndex`).
    pub fn from_optimizing<S: AsRef<str>>(
        columns: &[S], point: ArrayView1<f64>,
    ) -> ShapeResult<Self> {
        let raw = raw_params_from_point(columns, point)?;
        FittedParams::from_raw(raw, FitMode::Optimized)
    }

    /// Build from a `draws × columns` matrix and its backend column names.
    ///
    /// # Errors
    /// - Column assembly errors, as for [`FittedParams::from_optimizing`].
    pub fn from_sampling<S: AsRef<str>>(
        columns: &[S], draws: ArrayView2<f64>,
    ) -> ShapeResult<Self> {
        let raw = raw_params_from_draws(columns, draws)?;
        FittedParams::from_raw(raw, FitMode::Sampled { draws: draws.nrows() })
    }

    /// Normalize an assembled raw mapping and settle shapes for `mode`.
    pub fn from_raw(raw: RawParamMap, mode: FitMode) -> ShapeResult<Self> {
        let params = normalize_params(raw)?
            .into_iter()
            .map(|(name, param)| {
                let settled = match mode {
                    FitMode::Optimized => settle_optimized(&name, param),
                    FitMode::Sampled { draws } => settle_sampled(&name, param, draws),
                };
                (name, settled)
            })
            .collect();
        Ok(FittedParams { params, mode })
    }

    /// Wrap an already normalized mapping without reshaping it.
    pub fn from_normalized(params: ParamMap, mode: FitMode) -> Self {
        FittedParams { params, mode }
    }

    pub fn get(&self, name: &str) -> Option<&NormalizedParam> {
        self.params.get(name)
    }

    pub fn mode(&self) -> FitMode {
        self.mode
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NormalizedParam)> {
        self.params.iter().map(|(name, param)| (name.as_str(), param))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn into_inner(self) -> ParamMap {
        self.params
    }
}

/// MAP points are stored as one row: `(1, n)`.
fn settle_optimized(name: &str, param: NormalizedParam) -> NormalizedParam {
    match param {
        NormalizedParam::Vector(v) => NormalizedParam::Matrix(v.insert_axis(Axis(0))),
        NormalizedParam::Matrix(m) if m.nrows() > 1 => {
            log::debug!("keeping the first of {} rows of optimized parameter '{name}'", m.nrows());
            NormalizedParam::Matrix(m.slice(s![..1, ..]).to_owned())
        }
        other => other,
    }
}

/// Collapse single-column draws of non-vector parameters and lift rank-1
/// values of vector parameters to `(draws, 1)` or `(1, dim)`.
fn settle_sampled(name: &str, param: NormalizedParam, draws: usize) -> NormalizedParam {
    let kind = ParamKind::of(name);
    match param {
        NormalizedParam::Matrix(m) if m.ncols() == 1 && kind != Some(ParamKind::Vector) => {
            log::debug!("collapsing single-column draws of '{name}' to rank 1");
            NormalizedParam::Vector(m.column(0).to_owned())
        }
        NormalizedParam::Vector(v) if kind == Some(ParamKind::Vector) => {
            if v.len() == draws {
                log::debug!("lifting rank-1 draws of vector parameter '{name}' to a column");
                NormalizedParam::Matrix(v.insert_axis(Axis(1)))
            } else {
                log::debug!("lifting single-draw vector parameter '{name}' to a row");
                NormalizedParam::Matrix(v.insert_axis(Axis(0)))
            }
        }
        other => other,
    }
}
