//! Parameter shape normalizer: raw backend arrays to rank 1 or 2.
//!
//! Purpose
//! -------
//! Turn each [`RawParam`] reported by a fitting backend into a
//! [`NormalizedParam`] whose rank is exactly 1 or 2, so every consumer of a
//! fitted model's parameters can rely on `shape().len() >= 1`.
//!
//! Key behaviors
//! -------------
//! - Rank 0 is promoted to a length-1 vector holding the scalar.
//! - Rank 1 passes through unchanged. No second-axis check is attempted; a
//!   rank-1 array has no second axis to inspect.
//! - Rank 2 passes through unchanged. A second axis of size 1 marks a
//!   semantically scalar parameter, but collapsing it is left to the
//!   fit-mode logic in [`crate::params::fitted`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Rank 0 cannot be represented by [`NormalizedParam`].
//! - Ranks above 2 never reach this module: they are rejected by
//!   [`RawParam::from_dyn`] with
//!   [`ShapeError::UnsupportedRank`](crate::params::errors::ShapeError::UnsupportedRank).
//!   [`normalize_dyn`] exposes that check for dynamic-rank callers.
//!
//! Testing notes
//! -------------
//! - Unit tests cover promotion of scalars, pass-through of rank-1 arrays of
//!   every length (including 0 and 1), pass-through of `(n, 1)` matrices and
//!   rejection of rank 3 through the dynamic entry point.
use crate::params::{core::rank::RawParam, errors::ShapeResult};
use ndarray::{Array1, Array2, ArrayD};
use std::collections::BTreeMap;

/// Mapping from parameter name to raw backend array.
pub type RawParamMap = BTreeMap<String, RawParam>;

/// Mapping from parameter name to normalized array.
pub type ParamMap = BTreeMap<String, NormalizedParam>;

/// Parameter array of rank exactly 1 or 2.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedParam {
    /// Rank-1 array.
    Vector(Array1<f64>),
    /// Rank-2 array, `(draws, components)`.
    Matrix(Array2<f64>),
}

impl NormalizedParam {
    /// Array shape; always of length 1 or 2.
    pub fn shape(&self) -> &[usize] {
        match self {
            NormalizedParam::Vector(v) => v.shape(),
            NormalizedParam::Matrix(m) => m.shape(),
        }
    }

    /// Number of dimensions (1 or 2).
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of stored values.
    pub fn len(&self) -> usize {
        match self {
            NormalizedParam::Vector(v) => v.len(),
            NormalizedParam::Matrix(m) => m.len(),
        }
    }

    /// Whether no values are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert into a dynamic-rank array (e.g. for handing back to NumPy).
    pub fn into_dyn(self) -> ArrayD<f64> {
        match self {
            NormalizedParam::Vector(v) => v.into_dyn(),
            NormalizedParam::Matrix(m) => m.into_dyn(),
        }
    }
}

/// Normalize a single raw parameter to rank 1 or 2.
///
/// `name` is only used for diagnostics; every [`RawParam`] variant is
/// representable, so this never fails for tagged input. The `Result` keeps
/// the signature aligned with [`normalize_dyn`] and [`normalize_params`].
pub fn normalize_param(name: &str, raw: RawParam) -> ShapeResult<NormalizedParam> {
    let normalized = match raw {
        RawParam::Scalar(value) => {
            log::debug!("promoting rank-0 parameter '{name}' to a length-1 vector");
            NormalizedParam::Vector(Array1::from_elem(1, value))
        }
        RawParam::Vector(v) => NormalizedParam::Vector(v),
        RawParam::Matrix(m) => NormalizedParam::Matrix(m),
    };
    Ok(normalized)
}

/// Normalize a dynamic-rank array.
///
/// # Errors
/// - [`ShapeError::UnsupportedRank`](crate::params::errors::ShapeError::UnsupportedRank)
///   if the array's rank is not 0, 1, or 2.
pub fn normalize_dyn(name: &str, array: ArrayD<f64>) -> ShapeResult<NormalizedParam> {
    let raw = RawParam::from_dyn(name, array)?;
    normalize_param(name, raw)
}

/// Normalize every entry of a raw parameter mapping.
///
/// Fails on the first entry that cannot be normalized; the partially built
/// mapping is discarded.
pub fn normalize_params(raw: RawParamMap) -> ShapeResult<ParamMap> {
    raw.into_iter()
        .map(|(name, param)| {
            let normalized = normalize_param(&name, param)?;
            Ok((name, normalized))
        })
        .collect()
}

/// Normalize every entry of a dynamic-rank mapping.
///
/// # Errors
/// - `ShapeError::UnsupportedRank` for the first entry of rank above 2.
pub fn normalize_dyn_params<I>(raw: I) -> ShapeResult<ParamMap>
where
    I: IntoIterator<Item = (String, ArrayD<f64>)>,
{
    raw.into_iter()
        .map(|(name, array)| {
            let normalized = normalize_dyn(&name, array)?;
            Ok((name, normalized))
        })
        .collect()
}
