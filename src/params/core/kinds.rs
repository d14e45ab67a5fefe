//! Static scalar/vector classification of the model's warm-startable
//! parameters.
//!
//! The classification is fixed by the model definition, never inferred from
//! runtime shapes: a `(draws, 1)` array of `delta` (one changepoint) is still
//! a vector, and a length-1 array of `k` is still a scalar.

/// Semantic kind of a model parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// One value per draw (`k`, `m`, `sigma_obs`).
    Scalar,
    /// A vector of components per draw (`delta`, `beta`).
    Vector,
}

/// Base trend growth rate.
pub const K: &str = "k";
/// Trend offset.
pub const M: &str = "m";
/// Observation noise scale.
pub const SIGMA_OBS: &str = "sigma_obs";
/// Trend rate adjustments at each changepoint.
pub const DELTA: &str = "delta";
/// Seasonality and regressor coefficients.
pub const BETA: &str = "beta";

/// Parameters carried into a warm start, in output order.
pub const WARM_START_PARAMS: [(&str, ParamKind); 5] = [
    (K, ParamKind::Scalar),
    (M, ParamKind::Scalar),
    (SIGMA_OBS, ParamKind::Scalar),
    (DELTA, ParamKind::Vector),
    (BETA, ParamKind::Vector),
];

impl ParamKind {
    /// Look up the kind of a recognized parameter; `None` for auxiliary
    /// backend outputs such as `trend` or `lp__`.
    pub fn of(name: &str) -> Option<ParamKind> {
        WARM_START_PARAMS.iter().find(|(pname, _)| *pname == name).map(|&(_, kind)| kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_classifies_known_names() {
        assert_eq!(ParamKind::of("k"), Some(ParamKind::Scalar));
        assert_eq!(ParamKind::of("sigma_obs"), Some(ParamKind::Scalar));
        assert_eq!(ParamKind::of("beta"), Some(ParamKind::Vector));
        assert_eq!(ParamKind::of("trend"), None);
    }
}
