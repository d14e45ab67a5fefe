//! Raw parameter arrays as tagged rank variants.
//!
//! Purpose
//! -------
//! Give the backend's dynamic-rank output an explicit rank tag as soon as it
//! is retrieved, so later stages dispatch with `match` instead of probing
//! `shape()[1]` on arrays that may not have a second axis.
//!
//! Key behaviors
//! -------------
//! - [`RawParam::from_dyn`] checks `ndim()` first and only then converts the
//!   array into a fixed-rank `ndarray` container.
//! - Ranks above 2 are rejected with [`ShapeError::UnsupportedRank`].
//!
//! Conventions
//! -----------
//! - For rank 2, axis 0 indexes draws and axis 1 the parameter's internal
//!   components.
use crate::params::errors::{ShapeError, ShapeResult};
use ndarray::{Array1, Array2, ArrayD, Ix1, Ix2};

/// Backend parameter array of rank 0, 1, or 2.
#[derive(Debug, Clone, PartialEq)]
pub enum RawParam {
    /// Bare scalar (rank 0).
    Scalar(f64),
    /// Rank-1 array: a single draw's vector or one scalar over draws.
    Vector(Array1<f64>),
    /// Rank-2 array: `(draws, components)`.
    Matrix(Array2<f64>),
}

impl RawParam {
    /// Tag a dynamic-rank array with its rank.
    ///
    /// # Errors
    /// - [`ShapeError::UnsupportedRank`] if `array.ndim() > 2`.
    pub fn from_dyn(name: &str, array: ArrayD<f64>) -> ShapeResult<Self> {
        let ndim = array.ndim();
        let unsupported = || ShapeError::UnsupportedRank { name: name.to_string(), ndim };
        match ndim {
            0 => array.iter().next().copied().map(RawParam::Scalar).ok_or_else(unsupported),
            1 => array.into_dimensionality::<Ix1>().map(RawParam::Vector).map_err(|_| unsupported()),
            2 => array.into_dimensionality::<Ix2>().map(RawParam::Matrix).map_err(|_| unsupported()),
            _ => Err(unsupported()),
        }
    }

    /// Number of dimensions of the underlying array.
    pub fn ndim(&self) -> usize {
        match self {
            RawParam::Scalar(_) => 0,
            RawParam::Vector(_) => 1,
            RawParam::Matrix(_) => 2,
        }
    }
}

impl From<f64> for RawParam {
    fn from(value: f64) -> Self {
        RawParam::Scalar(value)
    }
}

impl From<Array1<f64>> for RawParam {
    fn from(value: Array1<f64>) -> Self {
        RawParam::Vector(value)
    }
}

impl From<Array2<f64>> for RawParam {
    fn from(value: Array2<f64>) -> Self {
        RawParam::Matrix(value)
    }
}
