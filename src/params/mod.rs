//! params — fitted-parameter shape handling and warm starts.
//!
//! Purpose
//! -------
//! Take the parameters a Prophet-style fitting backend reports (a MAP point
//! or a matrix of MCMC draws, with arrays of backend-dependent rank), bring
//! them to a predictable rank-1/rank-2 form, and reduce them to warm-start
//! values for a subsequent fit.
//!
//! Key behaviors
//! -------------
//! - [`core`]: tag raw arrays by rank, normalize them, and assemble them from
//!   column-named backend output.
//! - [`fitted`]: the fitted model's `params` ([`FittedParams`]) with
//!   fit-mode-specific shape settling.
//! - [`warm_start`]: [`warm_start_params`] / [`warm_start_params_with`]
//!   returning a typed [`WarmStart`].
//! - [`errors`]: [`ShapeError`] and [`ExtractError`] with `Result` aliases.
//!
//! Downstream usage
//! ----------------
//! 1. Build [`FittedParams`] via `from_optimizing`, `from_sampling`, or
//!    `from_raw` with the backend's output.
//! 2. Inspect `params.get(name)`; every value has `shape().len() >= 1`.
//! 3. Call [`warm_start_params`] and feed the result into the next fit.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; `tests/integration_warm_start.rs`
//!   runs the end-to-end pipeline on synthetic backend output.

pub mod core;
pub mod errors;
pub mod fitted;
pub mod warm_start;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{NormalizedParam, ParamKind, ParamMap, RawParam, RawParamMap};
pub use self::errors::{ExtractError, ExtractResult, ShapeError, ShapeResult};
pub use self::fitted::{FitMode, FittedParams};
pub use self::warm_start::{
    warm_start_params, warm_start_params_with, DrawSelection, WarmStart, WarmStartOptions,
    WarmStartValue,
};

pub mod prelude {
    pub use super::{
        warm_start_params, warm_start_params_with, DrawSelection, ExtractError, ExtractResult,
        FitMode, FittedParams, NormalizedParam, ParamKind, ParamMap, RawParam, RawParamMap,
        ShapeError, ShapeResult, WarmStart, WarmStartOptions, WarmStartValue,
    };
}
