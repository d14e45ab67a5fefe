//! core — rank tagging, normalization, and backend column assembly.
//!
//! Purpose
//! -------
//! Collect the building blocks that turn a fitting backend's output into
//! rank-1/rank-2 parameter arrays: tagged raw arrays ([`RawParam`]), the
//! shape normalizer ([`normalize_param`] and friends), the static
//! scalar/vector classification ([`ParamKind`]), and grouping of column-named
//! backend output into parameters.
//!
//! Invariants & assumptions
//! ------------------------
//! - Rank is decided once, when a dynamic array is tagged; after that every
//!   stage matches on the tag.
//! - Everything here is pure and operates on owned `ndarray` containers or
//!   borrowed views. Nothing performs I/O.

pub mod columns;
pub mod kinds;
pub mod normalize;
pub mod rank;

pub use self::columns::{raw_params_from_draws, raw_params_from_point};
pub use self::kinds::{ParamKind, BETA, DELTA, K, M, SIGMA_OBS, WARM_START_PARAMS};
pub use self::normalize::{
    normalize_dyn, normalize_dyn_params, normalize_param, normalize_params, NormalizedParam,
    ParamMap, RawParamMap,
};
pub use self::rank::RawParam;
