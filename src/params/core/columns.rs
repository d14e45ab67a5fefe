//! Backend column assembly: flat, column-named output to raw parameters.
//!
//! Purpose
//! -------
//! Sampling/optimization backends report every parameter component as its
//! own named column (`k`, `delta[1]`, `delta[2]`, …). This module groups the
//! columns back into one [`RawParam`] per parameter.
//!
//! Key behaviors
//! -------------
//! - Column names are `name`, `name[i]`, or `name.i` with 1-based `i`;
//!   consecutive columns with the same base name form one parameter.
//! - [`raw_params_from_point`] (single optimized point) yields
//!   `RawParam::Vector` per parameter.
//! - [`raw_params_from_draws`] (`draws × columns` matrix) yields
//!   `RawParam::Matrix` per parameter, so scalars arrive as `(draws, 1)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A parameter's columns are contiguous and ordered `1..=n`.
//! - Chains are already flattened into the draw axis by the backend.
//! - Only one index level is supported; `a[1,2]` is rejected.
use crate::params::{
    core::{normalize::RawParamMap, rank::RawParam},
    errors::{ShapeError, ShapeResult},
};
use ndarray::{s, ArrayView1, ArrayView2};
use std::ops::Range;

/// Parsed column name: base name plus optional 1-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnName<'a> {
    base: &'a str,
    index: Option<usize>,
}

fn parse_column(column: &str) -> ShapeResult<ColumnName<'_>> {
    let malformed = || ShapeError::MalformedColumnName { column: column.to_string() };

    let (base, index) = if let Some((base, rest)) = column.split_once('[') {
        let idx = rest.strip_suffix(']').ok_or_else(malformed)?;
        (base, Some(idx))
    } else if let Some((base, idx)) = column.split_once('.') {
        (base, Some(idx))
    } else {
        (column, None)
    };

    if base.is_empty() {
        return Err(malformed());
    }
    let index = match index {
        Some(idx) => match idx.parse::<usize>() {
            Ok(i) if i >= 1 => Some(i),
            _ => return Err(malformed()),
        },
        None => None,
    };
    Ok(ColumnName { base, index })
}

/// Group column names into `(base name, column range)` blocks.
fn group_columns<S: AsRef<str>>(columns: &[S]) -> ShapeResult<Vec<(String, Range<usize>)>> {
    let mut groups: Vec<(String, Range<usize>)> = Vec::new();

    for (col, raw_name) in columns.iter().enumerate() {
        let parsed = parse_column(raw_name.as_ref())?;

        let continues = matches!(groups.last(), Some((base, _)) if base == parsed.base);
        if continues {
            if let Some((_, range)) = groups.last_mut() {
                range.end = col + 1;
            }
        } else {
            if groups.iter().any(|(base, _)| base == parsed.base) {
                return Err(ShapeError::RepeatedColumn { name: parsed.base.to_string() });
            }
            groups.push((parsed.base.to_string(), col..col + 1));
        }

        // Position of this column within its group, 1-based.
        let position = groups.last().map_or(1, |(_, range)| range.len());
        match parsed.index {
            Some(i) if i != position => {
                return Err(ShapeError::NonContiguousIndex {
                    name: parsed.base.to_string(),
                    expected: position,
                    actual: i,
                });
            }
            None if position > 1 => {
                return Err(ShapeError::RepeatedColumn { name: parsed.base.to_string() });
            }
            _ => {}
        }
    }
    Ok(groups)
}

/// Assemble raw parameters from a single optimized point.
///
/// # Errors
/// - [`ShapeError::ColumnCountMismatch`] if `columns.len() != point.len()`.
/// - Column-name errors from the grouping step (see module docs).
pub fn raw_params_from_point<S: AsRef<str>>(
    columns: &[S], point: ArrayView1<f64>,
) -> ShapeResult<RawParamMap> {
    if columns.len() != point.len() {
        return Err(ShapeError::ColumnCountMismatch {
            expected: point.len(),
            actual: columns.len(),
        });
    }
    let groups = group_columns(columns)?;
    Ok(groups
        .into_iter()
        .map(|(name, range)| (name, RawParam::Vector(point.slice(s![range]).to_owned())))
        .collect())
}

/// Assemble raw parameters from a `draws × columns` matrix.
///
/// # Errors
/// - [`ShapeError::ColumnCountMismatch`] if `columns.len() != draws.ncols()`.
/// - Column-name errors from the grouping step (see module docs).
pub fn raw_params_from_draws<S: AsRef<str>>(
    columns: &[S], draws: ArrayView2<f64>,
) -> ShapeResult<RawParamMap> {
    if columns.len() != draws.ncols() {
        return Err(ShapeError::ColumnCountMismatch {
            expected: draws.ncols(),
            actual: columns.len(),
        });
    }
    let groups = group_columns(columns)?;
    log::debug!("assembled {} parameters from {} draws", groups.len(), draws.nrows());
    Ok(groups
        .into_iter()
        .map(|(name, range)| (name, RawParam::Matrix(draws.slice(s![.., range]).to_owned())))
        .collect())
}
