//! Errors for parameter shape normalization, backend column assembly, and
//! warm-start extraction.
//!
//! This module defines a shape error type, [`ShapeError`], raised whenever a
//! parameter array (or the flat backend output it is assembled from) has a
//! layout the crate cannot interpret, and an extraction error type,
//! [`ExtractError`], raised while reducing fitted parameters to a warm start.
//! Both implement `Display`/`Error` and, with the `python-bindings` feature,
//! convert to `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Ranks** follow NumPy: 0 = scalar, 1 = vector, 2 = matrix.
//! - **Column indices** in backend names are 1-based (`delta[1]`), as the
//!   backend reports them; every other index in this crate is 0-based.
//! - Neither error is retried or recovered locally; both indicate an
//!   incompatible backend or a corrupted fit.
#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyKeyError, PyValueError},
    prelude::*,
};

/// Result alias for normalization and column-assembly paths that may produce
/// [`ShapeError`].
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Result alias for warm-start extraction paths that may produce
/// [`ExtractError`].
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors describing parameter arrays with an unusable layout.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    // ---- Rank checks ----
    /// Parameter array has a rank other than 0, 1, or 2.
    UnsupportedRank { name: String, ndim: usize },

    /// Semantically scalar parameter carries more than one value per draw
    /// (or a MAP point with more than one value).
    ScalarWidth { name: String, width: usize },

    // ---- Backend column assembly ----
    /// Number of column names differs from the width of the data.
    ColumnCountMismatch { expected: usize, actual: usize },

    /// Base name reappears after columns of a different parameter.
    RepeatedColumn { name: String },

    /// Column name could not be parsed as `name`, `name[i]`, or `name.i`.
    MalformedColumnName { column: String },

    /// Column indices of one parameter are not `1..=n` in order.
    NonContiguousIndex { name: String, expected: usize, actual: usize },
}

impl std::error::Error for ShapeError {}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Rank checks ----
            ShapeError::UnsupportedRank { name, ndim } => {
                write!(f, "Parameter '{name}' has unsupported rank {ndim} (expected 0, 1, or 2).")
            }
            ShapeError::ScalarWidth { name, width } => {
                write!(
                    f,
                    "Scalar parameter '{name}' must hold one value per draw; got width {width}."
                )
            }
            // ---- Backend column assembly ----
            ShapeError::ColumnCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Column name count mismatch: data has {expected} columns, got {actual} names."
                )
            }
            ShapeError::RepeatedColumn { name } => {
                write!(f, "Found repeated column name '{name}'.")
            }
            ShapeError::MalformedColumnName { column } => {
                write!(f, "Malformed column name '{column}'.")
            }
            ShapeError::NonContiguousIndex { name, expected, actual } => {
                write!(
                    f,
                    "Columns of '{name}' are not contiguous: expected index {expected}, got {actual}."
                )
            }
        }
    }
}

/// Convert a [`ShapeError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<ShapeError> for PyErr {
    fn from(err: ShapeError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Errors raised while extracting warm-start values from fitted parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// A parameter required for warm starting is absent from the fit.
    MissingParameter { name: String },

    /// A sampled fit reported zero draws for a parameter.
    EmptyDraws { name: String },

    /// Wrapper for a [`ShapeError`] met during extraction.
    Shape(ShapeError),
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Shape(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::MissingParameter { name } => {
                write!(f, "Fitted model is missing required parameter '{name}'.")
            }
            ExtractError::EmptyDraws { name } => {
                write!(f, "Parameter '{name}' has no draws to extract a warm start from.")
            }
            ExtractError::Shape(err) => write!(f, "{err}"),
        }
    }
}

impl From<ShapeError> for ExtractError {
    fn from(err: ShapeError) -> ExtractError {
        ExtractError::Shape(err)
    }
}

/// Convert an [`ExtractError`] into a Python exception.
///
/// Missing parameters surface as `KeyError` (the Python caller indexed a
/// mapping that lacks the name); everything else is a `ValueError`.
#[cfg(feature = "python-bindings")]
impl std::convert::From<ExtractError> for PyErr {
    fn from(err: ExtractError) -> PyErr {
        match err {
            ExtractError::MissingParameter { .. } => PyKeyError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}
