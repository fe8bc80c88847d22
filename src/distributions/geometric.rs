use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{standardized, Distribution, Support};
use crate::error::{ParamError, Result};
use crate::random::RandomSource;

/// Geometric distribution: failures before the first success.
///
/// # Mathematical Definition
/// - PMF: P(k) = p(1−p)ᵏ for k ≥ 0
/// - CDF: F(k) = 1 − (1−p)^(k+1)
/// - Mean: (1−p)/p
/// - Variance: (1−p)/p²
/// - Skewness: (2−p)/√(1−p)
/// - Excess kurtosis: 6 + p²/(1−p)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometric {
    pub prob: f64,
}

impl Geometric {
    pub fn new(prob: f64) -> Result<Self, ParamError> {
        let d = Self { prob };
        d.validate()?;
        Ok(d)
    }
}

impl Distribution for Geometric {
    fn family(&self) -> &'static str {
        "geometric"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::probability("geometric", "prob", self.prob)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::integers(0.0, f64::INFINITY))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        Ok((1.0 - self.prob) / self.prob)
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        Ok((1.0 - self.prob) / (self.prob * self.prob))
    }

    fn skewness(&self) -> Result<f64> {
        let var = self.variance()?;
        let p = self.prob;
        standardized("geometric", "skewness", var, || (2.0 - p) / (1.0 - p).sqrt())
    }

    fn kurtosis(&self) -> Result<f64> {
        let var = self.variance()?;
        let p = self.prob;
        standardized("geometric", "kurtosis", var, || 6.0 + p * p / (1.0 - p))
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        let k = x.floor();
        if k < 0.0 {
            return Ok(0.0);
        }
        if self.prob == 1.0 {
            return Ok(if k == 0.0 { 1.0 } else { 0.0 });
        }
        Ok(self.prob * (k * (-self.prob).ln_1p()).exp())
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x < 0.0 {
            return Ok(0.0);
        }
        if self.prob == 1.0 {
            return Ok(1.0);
        }
        Ok(-((x.floor() + 1.0) * (-self.prob).ln_1p()).exp_m1())
    }

    /// Inversion: `⌊ln(1−u) / ln(1−p)⌋`.
    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        if self.prob == 1.0 {
            return Ok(0.0);
        }
        let u = source.uniform();
        Ok(((-u).ln_1p() / (-self.prob).ln_1p()).floor())
    }
}
