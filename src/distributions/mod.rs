//! Probability distributions.
//!
//! Every family implements the same [`Distribution`] contract: descriptive
//! moments, density, cumulative distribution and random-variate generation.
//! [`AnyDistribution`] closes over the fixed set of families for callers that
//! pick a family at runtime or load it from a parameter record.
//!
//! # Supported Distributions
//!
//! | Family | Parameters | Support | Sampler |
//! |---|---|---|---|
//! | [`Normal`] | mu, sigma | ℝ | Box–Muller |
//! | [`LogNormal`] | mu, sigma | (0, ∞) | exp of a normal draw |
//! | [`Gamma`] | shape, rate | [0, ∞) | Marsaglia–Tsang |
//! | [`Beta`] | alpha, beta | [0, 1] | Gamma ratio |
//! | [`ChiSquared`] | degrees | [0, ∞) | 2 · Gamma(k/2) |
//! | [`StudentsT`] | degrees | ℝ | Marsaglia (1980) rejection |
//! | [`Binomial`] | trials, prob | {0, …, n} | inversion / BTPE |
//! | [`Poisson`] | mu | ℕ | Gamma decomposition + multiplication |
//! | [`NegativeBinomial`] | failures, prob | ℕ | Gamma–Poisson mixture |
//! | [`Geometric`] | prob | ℕ | inversion |
//! | [`Uniform`] | min, max | [min, max] | inversion |
//! | [`Exponential`] | rate | [0, ∞) | inversion |
//! | [`Cauchy`] | location, scale | ℝ | inversion |
//! | [`Logistic`] | location, scale | ℝ | inversion |
//! | [`Weibull`] | scale, shape | [0, ∞) | inversion |
//! | [`Pareto`] | scale, shape | [scale, ∞) | inversion |
//!
//! # Conventions
//!
//! - Parameter structs have public fields so they can be written as
//!   literals or deserialized. Validation is repeated at the top of every
//!   contract method, so an invalid record yields
//!   [`DistError::InvalidParameter`] from all of them and never consumes
//!   entropy.
//! - [`Distribution::kurtosis`] is the **excess** kurtosis (normal = 0).
//! - A moment that diverges returns `Ok(f64::INFINITY)`. A moment that does
//!   not exist returns [`DistError::Indeterminate`].
//! - For discrete families `pdf(x)` is the mass at `⌊x⌋` inside the
//!   support, so the density integrates to one over the real line.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DistError, ParamError, Result};
use crate::random::RandomSource;

mod beta;
mod binomial;
mod cauchy;
mod chi_squared;
mod exponential;
mod gamma;
mod geometric;
mod logistic;
mod lognormal;
mod negative_binomial;
mod normal;
mod pareto;
mod poisson;
mod students_t;
mod uniform;
mod weibull;

pub use beta::Beta;
pub use binomial::Binomial;
pub use cauchy::Cauchy;
pub use chi_squared::ChiSquared;
pub use exponential::Exponential;
pub use gamma::Gamma;
pub use geometric::Geometric;
pub use logistic::Logistic;
pub use lognormal::LogNormal;
pub use negative_binomial::NegativeBinomial;
pub use normal::Normal;
pub use pareto::Pareto;
pub use poisson::Poisson;
pub use students_t::StudentsT;
pub use uniform::Uniform;
pub use weibull::Weibull;

/// Closed interval containing all probability mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    pub lower: f64,
    pub upper: f64,
    /// Whether the mass sits on the integers of `[lower, upper]`.
    pub discrete: bool,
}

impl Support {
    pub(crate) fn continuous(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            discrete: false,
        }
    }

    pub(crate) fn integers(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            discrete: true,
        }
    }
}

/// The operation set shared by every distribution family.
pub trait Distribution {
    /// Canonical family name, matching the `family` tag of [`AnyDistribution`].
    fn family(&self) -> &'static str;

    /// Checks the family's parameter constraints.
    fn validate(&self) -> std::result::Result<(), ParamError>;

    fn support(&self) -> Result<Support>;

    fn mean(&self) -> Result<f64>;

    fn variance(&self) -> Result<f64>;

    fn skewness(&self) -> Result<f64>;

    /// Excess kurtosis (fourth standardized moment minus 3).
    fn kurtosis(&self) -> Result<f64>;

    fn std_dev(&self) -> Result<f64> {
        Ok(self.variance()?.sqrt())
    }

    /// Coefficient of variation `σ / μ`.
    ///
    /// Indeterminate when the mean is zero or not finite.
    fn rel_std_dev(&self) -> Result<f64> {
        let mean = self.mean()?;
        if mean == 0.0 || !mean.is_finite() {
            return Err(DistError::indeterminate(self.family(), "relative standard deviation"));
        }
        Ok(self.std_dev()? / mean)
    }

    /// Density for continuous families, probability mass at `⌊x⌋` for
    /// discrete ones.
    fn pdf(&self, x: f64) -> Result<f64>;

    /// `P(X ≤ x)`.
    fn cdf(&self, x: f64) -> Result<f64>;

    /// One random draw.
    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64>;

    /// `n` independent draws. Parameters are checked once up front, so an
    /// invalid distribution fails even for `n == 0`.
    fn sample<R: Rng>(&self, source: &mut RandomSource<R>, n: usize) -> Result<Vec<f64>> {
        self.validate()?;
        (0..n).map(|_| self.random(source)).collect()
    }
}

/// Standardized moment that needs a non-zero variance.
pub(crate) fn standardized(
    family: &'static str,
    moment: &'static str,
    variance: f64,
    value: impl FnOnce() -> f64,
) -> Result<f64> {
    if variance == 0.0 {
        Err(DistError::indeterminate(family, moment))
    } else {
        Ok(value())
    }
}

// ============================================================================
// Closed set of families
// ============================================================================

/// Any supported distribution, serialized as a flat record tagged by family:
///
/// ```
/// use u_distributions::distributions::{AnyDistribution, Distribution, Gamma};
/// let d: AnyDistribution = serde_json::from_str(r#"{"family":"gamma","shape":2.0,"rate":4.0}"#).unwrap();
/// assert_eq!(d, AnyDistribution::Gamma(Gamma { shape: 2.0, rate: 4.0 }));
/// assert_eq!(d.mean().unwrap(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum AnyDistribution {
    Normal(Normal),
    LogNormal(LogNormal),
    Gamma(Gamma),
    Beta(Beta),
    ChiSquared(ChiSquared),
    StudentsT(StudentsT),
    Binomial(Binomial),
    Poisson(Poisson),
    NegativeBinomial(NegativeBinomial),
    Geometric(Geometric),
    Uniform(Uniform),
    Exponential(Exponential),
    Cauchy(Cauchy),
    Logistic(Logistic),
    Weibull(Weibull),
    Pareto(Pareto),
}

macro_rules! dispatch {
    ($value:expr, $d:ident => $body:expr) => {
        match $value {
            AnyDistribution::Normal($d) => $body,
            AnyDistribution::LogNormal($d) => $body,
            AnyDistribution::Gamma($d) => $body,
            AnyDistribution::Beta($d) => $body,
            AnyDistribution::ChiSquared($d) => $body,
            AnyDistribution::StudentsT($d) => $body,
            AnyDistribution::Binomial($d) => $body,
            AnyDistribution::Poisson($d) => $body,
            AnyDistribution::NegativeBinomial($d) => $body,
            AnyDistribution::Geometric($d) => $body,
            AnyDistribution::Uniform($d) => $body,
            AnyDistribution::Exponential($d) => $body,
            AnyDistribution::Cauchy($d) => $body,
            AnyDistribution::Logistic($d) => $body,
            AnyDistribution::Weibull($d) => $body,
            AnyDistribution::Pareto($d) => $body,
        }
    };
}

macro_rules! impl_from_family {
    ($($family:ident),* $(,)?) => {
        $(
            impl From<$family> for AnyDistribution {
                fn from(d: $family) -> Self {
                    AnyDistribution::$family(d)
                }
            }
        )*
    };
}

impl_from_family!(
    Normal,
    LogNormal,
    Gamma,
    Beta,
    ChiSquared,
    StudentsT,
    Binomial,
    Poisson,
    NegativeBinomial,
    Geometric,
    Uniform,
    Exponential,
    Cauchy,
    Logistic,
    Weibull,
    Pareto,
);

impl Distribution for AnyDistribution {
    fn family(&self) -> &'static str {
        dispatch!(self, d => d.family())
    }

    fn validate(&self) -> std::result::Result<(), ParamError> {
        dispatch!(self, d => d.validate())
    }

    fn support(&self) -> Result<Support> {
        dispatch!(self, d => d.support())
    }

    fn mean(&self) -> Result<f64> {
        dispatch!(self, d => d.mean())
    }

    fn variance(&self) -> Result<f64> {
        dispatch!(self, d => d.variance())
    }

    fn skewness(&self) -> Result<f64> {
        dispatch!(self, d => d.skewness())
    }

    fn kurtosis(&self) -> Result<f64> {
        dispatch!(self, d => d.kurtosis())
    }

    fn std_dev(&self) -> Result<f64> {
        dispatch!(self, d => d.std_dev())
    }

    fn rel_std_dev(&self) -> Result<f64> {
        dispatch!(self, d => d.rel_std_dev())
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        dispatch!(self, d => d.pdf(x))
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        dispatch!(self, d => d.cdf(x))
    }

    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        dispatch!(self, d => d.random(source))
    }

    fn sample<R: Rng>(&self, source: &mut RandomSource<R>, n: usize) -> Result<Vec<f64>> {
        dispatch!(self, d => d.sample(source, n))
    }
}
