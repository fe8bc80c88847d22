use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Distribution, Support};
use crate::error::{ParamError, Result};
use crate::random::RandomSource;

/// Continuous uniform distribution on `[min, max]`.
///
/// # Mathematical Definition
/// - PDF: f(x) = 1/(max−min) for x ∈ [min, max]
/// - CDF: F(x) = (x−min)/(max−min)
/// - Mean: (min+max)/2
/// - Variance: (max−min)²/12
/// - Excess kurtosis: −6/5
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Uniform {
    pub min: f64,
    pub max: f64,
}

impl Uniform {
    /// Creates a new uniform distribution on `[min, max]`.
    ///
    /// # Errors
    /// Returns `Err` if `min >= max` or either parameter is not finite.
    pub fn new(min: f64, max: f64) -> Result<Self, ParamError> {
        let d = Self { min, max };
        d.validate()?;
        Ok(d)
    }
}

impl Distribution for Uniform {
    fn family(&self) -> &'static str {
        "uniform"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::finite("uniform", "min", self.min)?;
        ParamError::finite("uniform", "max", self.max)?;
        ParamError::check(
            self.min < self.max,
            "uniform",
            "max",
            &format!("must exceed min = {}", self.min),
            self.max,
        )
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::continuous(self.min, self.max))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        Ok((self.min + self.max) / 2.0)
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        let range = self.max - self.min;
        Ok(range * range / 12.0)
    }

    fn skewness(&self) -> Result<f64> {
        self.validate()?;
        Ok(0.0)
    }

    fn kurtosis(&self) -> Result<f64> {
        self.validate()?;
        Ok(-1.2)
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x >= self.min && x <= self.max {
            Ok(1.0 / (self.max - self.min))
        } else {
            Ok(0.0)
        }
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        Ok(if x <= self.min {
            0.0
        } else if x >= self.max {
            1.0
        } else {
            (x - self.min) / (self.max - self.min)
        })
    }

    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        Ok(self.min + source.uniform() * (self.max - self.min))
    }
}
