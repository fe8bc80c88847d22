use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Distribution, Support};
use crate::error::{DistError, ParamError, Result};
use crate::random::RandomSource;

/// Pareto (type I) distribution with scale `xₘ` and shape `α`.
///
/// # Mathematical Definition
/// - PDF: f(x) = α xₘ^α / x^(α+1) for x ≥ xₘ
/// - CDF: F(x) = 1 − (xₘ/x)^α
/// - Mean: αxₘ/(α−1) for α > 1, +∞ otherwise
/// - Variance: xₘ²α / ((α−1)²(α−2)) for α > 2, +∞ otherwise
/// - Skewness: 2(1+α)/(α−3) · √((α−2)/α) for α > 3
/// - Excess kurtosis: 6(α³ + α² − 6α − 2) / (α(α−3)(α−4)) for α > 4
///
/// Skewness and kurtosis below their thresholds are
/// [`DistError::Indeterminate`].
///
/// Reference: Arnold (2015), *Pareto Distributions*, 2nd ed., Chapter 3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pareto {
    pub scale: f64,
    pub shape: f64,
}

impl Pareto {
    pub fn new(scale: f64, shape: f64) -> Result<Self, ParamError> {
        let d = Self { scale, shape };
        d.validate()?;
        Ok(d)
    }
}

impl Distribution for Pareto {
    fn family(&self) -> &'static str {
        "pareto"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::positive("pareto", "scale", self.scale)?;
        ParamError::positive("pareto", "shape", self.shape)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::continuous(self.scale, f64::INFINITY))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        let a = self.shape;
        Ok(if a > 1.0 { a * self.scale / (a - 1.0) } else { f64::INFINITY })
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        let a = self.shape;
        if a > 2.0 {
            Ok(self.scale * self.scale * a / ((a - 1.0) * (a - 1.0) * (a - 2.0)))
        } else {
            Ok(f64::INFINITY)
        }
    }

    fn skewness(&self) -> Result<f64> {
        self.validate()?;
        let a = self.shape;
        if a > 3.0 {
            Ok(2.0 * (1.0 + a) / (a - 3.0) * ((a - 2.0) / a).sqrt())
        } else {
            Err(DistError::indeterminate("pareto", "skewness"))
        }
    }

    fn kurtosis(&self) -> Result<f64> {
        self.validate()?;
        let a = self.shape;
        if a > 4.0 {
            Ok(6.0 * (a * a * a + a * a - 6.0 * a - 2.0) / (a * (a - 3.0) * (a - 4.0)))
        } else {
            Err(DistError::indeterminate("pareto", "kurtosis"))
        }
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x < self.scale {
            return Ok(0.0);
        }
        Ok(self.shape / x * (self.scale / x).powf(self.shape))
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x <= self.scale {
            return Ok(0.0);
        }
        Ok(-(self.shape * (self.scale / x).ln()).exp_m1())
    }

    /// Inversion: `xₘ / (1−u)^(1/α)`.
    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        let u = source.uniform();
        Ok(self.scale / (1.0 - u).powf(1.0 / self.shape))
    }
}
