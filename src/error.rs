//! Error types.
//!
//! Three failure families are kept apart so callers can tell them apart:
//!
//! - [`ParamError`]: a distribution was built with parameters outside its
//!   domain. Raised before any entropy is consumed.
//! - [`NumericError`]: a special-function evaluator could not produce a
//!   trustworthy value (iteration cap reached, argument outside domain).
//! - [`DistError`]: the umbrella returned by the distribution contract. It
//!   also carries [`DistError::Indeterminate`] for moments that do not exist
//!   and [`DistError::RejectionLimit`] for samplers that hit their cap.

use thiserror::Error;

/// A distribution parameter violates its family's constraint.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {family} parameter `{parameter}`: {reason}")]
pub struct ParamError {
    /// Distribution family, e.g. `"gamma"`.
    pub family: &'static str,
    /// Canonical field name of the offending parameter.
    pub parameter: &'static str,
    /// Human-readable constraint description including the offending value.
    pub reason: String,
}

impl ParamError {
    pub fn new(family: &'static str, parameter: &'static str, reason: impl Into<String>) -> Self {
        Self {
            family,
            parameter,
            reason: reason.into(),
        }
    }

    /// `Err` describing `constraint` unless `ok` holds.
    pub(crate) fn check(
        ok: bool,
        family: &'static str,
        parameter: &'static str,
        constraint: &str,
        value: f64,
    ) -> Result<(), ParamError> {
        if ok {
            Ok(())
        } else {
            Err(Self::new(family, parameter, format!("{constraint}, got {value}")))
        }
    }

    pub(crate) fn finite(family: &'static str, parameter: &'static str, value: f64) -> Result<(), ParamError> {
        Self::check(value.is_finite(), family, parameter, "must be finite", value)
    }

    pub(crate) fn positive(family: &'static str, parameter: &'static str, value: f64) -> Result<(), ParamError> {
        Self::check(value > 0.0 && value.is_finite(), family, parameter, "must be finite and > 0", value)
    }

    /// Probabilities in `(0, 1]`.
    pub(crate) fn probability(family: &'static str, parameter: &'static str, value: f64) -> Result<(), ParamError> {
        Self::check(value > 0.0 && value <= 1.0, family, parameter, "must lie in (0, 1]", value)
    }
}

/// Failure of a special-function evaluator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    /// An iterative evaluator exhausted its iteration budget.
    #[error("{routine} did not converge within {iterations} iterations")]
    NonConvergence {
        routine: &'static str,
        iterations: usize,
    },

    /// The arguments lie outside the function's domain.
    #[error("{routine}: argument outside domain ({detail})")]
    Domain {
        routine: &'static str,
        detail: String,
    },
}

/// Error returned by every [`Distribution`](crate::distributions::Distribution)
/// operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistError {
    #[error(transparent)]
    InvalidParameter(#[from] ParamError),

    /// The moment is mathematically undefined for these (valid) parameters.
    #[error("{moment} is undefined for this {family} distribution")]
    Indeterminate {
        family: &'static str,
        moment: &'static str,
    },

    #[error(transparent)]
    Numeric(#[from] NumericError),

    /// A rejection sampler exceeded the configured attempt budget.
    #[error("{sampler} sampler rejected {attempts} candidates without acceptance")]
    RejectionLimit {
        sampler: &'static str,
        attempts: u64,
    },
}

impl DistError {
    pub(crate) fn indeterminate(family: &'static str, moment: &'static str) -> Self {
        DistError::Indeterminate { family, moment }
    }

    /// Returns `true` for [`DistError::InvalidParameter`].
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, DistError::InvalidParameter(_))
    }

    /// Returns `true` for [`DistError::Indeterminate`].
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, DistError::Indeterminate { .. })
    }
}

/// Crate-wide result alias.
pub type Result<T, E = DistError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_error_display() {
        let err = ParamError::new("gamma", "shape", "must be > 0, got -1");
        assert_eq!(
            err.to_string(),
            "invalid gamma parameter `shape`: must be > 0, got -1"
        );
    }

    #[test]
    fn test_param_error_checks() {
        assert!(ParamError::positive("gamma", "rate", 2.0).is_ok());
        assert!(ParamError::positive("gamma", "rate", f64::INFINITY).is_err());
        assert!(ParamError::finite("normal", "mu", f64::NAN).is_err());
        assert!(ParamError::probability("binomial", "prob", 1.0).is_ok());
        let err = ParamError::probability("binomial", "prob", 0.0).unwrap_err();
        assert_eq!(err.parameter, "prob");
        assert_eq!(err.reason, "must lie in (0, 1], got 0");
    }

    #[test]
    fn test_param_error_converts_to_dist_error() {
        let err: DistError = ParamError::new("beta", "alpha", "must be > 0, got 0").into();
        assert!(err.is_invalid_parameter());
        assert!(!err.is_indeterminate());
        assert!(err.to_string().contains("beta"));
    }

    #[test]
    fn test_numeric_error_display() {
        let err = NumericError::NonConvergence {
            routine: "incomplete beta continued fraction",
            iterations: 10,
        };
        assert_eq!(
            err.to_string(),
            "incomplete beta continued fraction did not converge within 10 iterations"
        );
        let dist: DistError = err.into();
        assert!(matches!(dist, DistError::Numeric(_)));
    }

    #[test]
    fn test_indeterminate_display() {
        let err = DistError::indeterminate("cauchy", "mean");
        assert!(err.is_indeterminate());
        assert_eq!(err.to_string(), "mean is undefined for this cauchy distribution");
    }
}
