use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Distribution, Support};
use crate::error::{ParamError, Result};
use crate::random::RandomSource;
use crate::special::gamma;

/// Weibull distribution with scale `λ` and shape `k`.
///
/// # Mathematical Definition
/// With `gᵢ = Γ(1 + i/k)`:
/// - PDF: f(x) = (k/λ)(x/λ)^(k−1) e^(−(x/λ)^k) for x ≥ 0
/// - CDF: F(x) = 1 − e^(−(x/λ)^k)
/// - Mean: λg₁
/// - Variance: λ²(g₂ − g₁²)
/// - Skewness: (g₃ − 3g₁g₂ + 2g₁³) / (g₂ − g₁²)^(3/2)
/// - Excess kurtosis: (g₄ − 4g₁g₃ + 6g₁²g₂ − 3g₁⁴) / (g₂ − g₁²)² − 3
///
/// Reference: Johnson, Kotz & Balakrishnan (1994), *Continuous Univariate
/// Distributions*, Vol. 1, Chapter 21.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weibull {
    pub scale: f64,
    pub shape: f64,
}

impl Weibull {
    pub fn new(scale: f64, shape: f64) -> Result<Self, ParamError> {
        let d = Self { scale, shape };
        d.validate()?;
        Ok(d)
    }

    /// `Γ(1 + i/k)` for `i = 1..=4`.
    fn raw_moment_factors(&self) -> [f64; 4] {
        [1.0, 2.0, 3.0, 4.0].map(|i| gamma(1.0 + i / self.shape))
    }
}

impl Distribution for Weibull {
    fn family(&self) -> &'static str {
        "weibull"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::positive("weibull", "scale", self.scale)?;
        ParamError::positive("weibull", "shape", self.shape)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::continuous(0.0, f64::INFINITY))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.scale * gamma(1.0 + 1.0 / self.shape))
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        let [g1, g2, ..] = self.raw_moment_factors();
        Ok(self.scale * self.scale * (g2 - g1 * g1))
    }

    fn skewness(&self) -> Result<f64> {
        self.validate()?;
        let [g1, g2, g3, _] = self.raw_moment_factors();
        let v = g2 - g1 * g1;
        Ok((g3 - 3.0 * g1 * g2 + 2.0 * g1.powi(3)) / v.powf(1.5))
    }

    fn kurtosis(&self) -> Result<f64> {
        self.validate()?;
        let [g1, g2, g3, g4] = self.raw_moment_factors();
        let v = g2 - g1 * g1;
        let m4 = g4 - 4.0 * g1 * g3 + 6.0 * g1 * g1 * g2 - 3.0 * g1.powi(4);
        Ok(m4 / (v * v) - 3.0)
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        let k = self.shape;
        if x < 0.0 {
            return Ok(0.0);
        }
        if x == 0.0 {
            return Ok(match k {
                k if k < 1.0 => f64::INFINITY,
                k if k == 1.0 => 1.0 / self.scale,
                _ => 0.0,
            });
        }
        let z = x / self.scale;
        Ok(k / self.scale * z.powf(k - 1.0) * (-z.powf(k)).exp())
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x <= 0.0 {
            return Ok(0.0);
        }
        Ok(-(-(x / self.scale).powf(self.shape)).exp_m1())
    }

    /// Inversion: `λ(−ln(1−u))^(1/k)`.
    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        let e = -(-source.uniform()).ln_1p();
        Ok(self.scale * e.powf(1.0 / self.shape))
    }
}
