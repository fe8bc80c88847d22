use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Distribution, Support};
use crate::error::{ParamError, Result};
use crate::random::RandomSource;
use crate::sampling;

/// Exponential distribution with rate `λ` (mean `1/λ`).
///
/// # Mathematical Definition
/// - PDF: f(x) = λ e^(−λx) for x ≥ 0
/// - CDF: F(x) = 1 − e^(−λx)
/// - Mean: 1/λ
/// - Variance: 1/λ²
/// - Skewness: 2
/// - Excess kurtosis: 6
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exponential {
    pub rate: f64,
}

impl Exponential {
    pub fn new(rate: f64) -> Result<Self, ParamError> {
        let d = Self { rate };
        d.validate()?;
        Ok(d)
    }
}

impl Distribution for Exponential {
    fn family(&self) -> &'static str {
        "exponential"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::positive("exponential", "rate", self.rate)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::continuous(0.0, f64::INFINITY))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        Ok(1.0 / self.rate)
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        Ok(1.0 / (self.rate * self.rate))
    }

    fn skewness(&self) -> Result<f64> {
        self.validate()?;
        Ok(2.0)
    }

    fn kurtosis(&self) -> Result<f64> {
        self.validate()?;
        Ok(6.0)
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x < 0.0 {
            return Ok(0.0);
        }
        Ok(self.rate * (-self.rate * x).exp())
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x <= 0.0 {
            return Ok(0.0);
        }
        Ok(-(-self.rate * x).exp_m1())
    }

    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        sampling::exponential(source, self.rate)
    }
}
