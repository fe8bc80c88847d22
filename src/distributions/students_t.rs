use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Distribution, Support};
use crate::error::{DistError, ParamError, Result};
use crate::random::RandomSource;
use crate::sampling;
use crate::special::{ln_gamma, regularized_incomplete_beta};

/// Student's t distribution with `ν` degrees of freedom.
///
/// # Mathematical Definition
/// - PDF: f(t) = Γ((ν+1)/2) / (√(νπ) Γ(ν/2)) · (1 + t²/ν)^(−(ν+1)/2)
/// - CDF: for t > 0, 1 − ½ I_{ν/(ν+t²)}(ν/2, ½), mirrored for t < 0
/// - Mean: 0 for ν > 1
/// - Variance: ν/(ν−2) for ν > 2, +∞ for 1 < ν ≤ 2
/// - Skewness: 0 for ν > 3
/// - Excess kurtosis: 6/(ν−4) for ν > 4, +∞ for 2 < ν ≤ 4
///
/// Moments below their thresholds are [`DistError::Indeterminate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentsT {
    pub degrees: f64,
}

impl StudentsT {
    pub fn new(degrees: f64) -> Result<Self, ParamError> {
        let d = Self { degrees };
        d.validate()?;
        Ok(d)
    }
}

impl Distribution for StudentsT {
    fn family(&self) -> &'static str {
        "students_t"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::positive("students_t", "degrees", self.degrees)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::continuous(f64::NEG_INFINITY, f64::INFINITY))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        if self.degrees > 1.0 {
            Ok(0.0)
        } else {
            Err(DistError::indeterminate("students_t", "mean"))
        }
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        let nu = self.degrees;
        if nu > 2.0 {
            Ok(nu / (nu - 2.0))
        } else if nu > 1.0 {
            Ok(f64::INFINITY)
        } else {
            Err(DistError::indeterminate("students_t", "variance"))
        }
    }

    fn skewness(&self) -> Result<f64> {
        self.validate()?;
        if self.degrees > 3.0 {
            Ok(0.0)
        } else {
            Err(DistError::indeterminate("students_t", "skewness"))
        }
    }

    fn kurtosis(&self) -> Result<f64> {
        self.validate()?;
        let nu = self.degrees;
        if nu > 4.0 {
            Ok(6.0 / (nu - 4.0))
        } else if nu > 2.0 {
            Ok(f64::INFINITY)
        } else {
            Err(DistError::indeterminate("students_t", "kurtosis"))
        }
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        let nu = self.degrees;
        let ln_norm = ln_gamma((nu + 1.0) / 2.0) - ln_gamma(nu / 2.0) - 0.5 * (nu * PI).ln();
        Ok((ln_norm - (nu + 1.0) / 2.0 * (x * x / nu).ln_1p()).exp())
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x == 0.0 {
            return Ok(0.5);
        }
        let nu = self.degrees;
        let w = nu / (nu + x * x);
        let tail = 0.5 * regularized_incomplete_beta(w, nu / 2.0, 0.5)?;
        Ok(if x > 0.0 { 1.0 - tail } else { tail })
    }

    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        sampling::students_t(source, self.degrees)
    }
}
