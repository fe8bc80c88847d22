use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Distribution, Support};
use crate::error::{ParamError, Result};
use crate::random::RandomSource;
use crate::sampling;
use crate::special::{beta_function, ln_beta, regularized_incomplete_beta};

/// Beta distribution on `[0, 1]`.
///
/// # Mathematical Definition
/// - PDF: f(x) = x^(α−1) (1−x)^(β−1) / B(α, β)
/// - CDF: F(x) = I_x(α, β), the regularized incomplete beta
/// - Mean: α/(α+β)
/// - Variance: αβ / ((α+β)²(α+β+1))
/// - Skewness: 2(β−α)√(α+β+1) / ((α+β+2)√(αβ))
/// - Excess kurtosis: 6[(α−β)²(α+β+1) − αβ(α+β+2)] / (αβ(α+β+2)(α+β+3))
///
/// Draws are formed as a ratio of two gamma variates, see [`sampling::beta`].
///
/// Reference: Johnson, Kotz & Balakrishnan (1995), *Continuous Univariate
/// Distributions*, Vol. 2, Chapter 25.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beta {
    pub alpha: f64,
    pub beta: f64,
}

impl Beta {
    /// # Errors
    /// Returns `Err` unless both shapes are finite and positive.
    pub fn new(alpha: f64, beta: f64) -> Result<Self, ParamError> {
        let d = Self { alpha, beta };
        d.validate()?;
        Ok(d)
    }
}

impl Distribution for Beta {
    fn family(&self) -> &'static str {
        "beta"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::positive("beta", "alpha", self.alpha)?;
        ParamError::positive("beta", "beta", self.beta)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::continuous(0.0, 1.0))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.alpha / (self.alpha + self.beta))
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        let (a, b) = (self.alpha, self.beta);
        let s = a + b;
        Ok(a * b / (s * s * (s + 1.0)))
    }

    fn skewness(&self) -> Result<f64> {
        self.validate()?;
        let (a, b) = (self.alpha, self.beta);
        let s = a + b;
        Ok(2.0 * (b - a) * (s + 1.0).sqrt() / ((s + 2.0) * (a * b).sqrt()))
    }

    fn kurtosis(&self) -> Result<f64> {
        self.validate()?;
        let (a, b) = (self.alpha, self.beta);
        let s = a + b;
        let num = (a - b).powi(2) * (s + 1.0) - a * b * (s + 2.0);
        Ok(6.0 * num / (a * b * (s + 2.0) * (s + 3.0)))
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        let (a, b) = (self.alpha, self.beta);
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if !(0.0..=1.0).contains(&x) {
            return Ok(0.0);
        }
        if x == 0.0 {
            return Ok(endpoint_density(a, b));
        }
        if x == 1.0 {
            return Ok(endpoint_density(b, a));
        }

        let norm = beta_function(&[a, b]);
        if norm.is_normal() {
            Ok(x.powf(a - 1.0) * (1.0 - x).powf(b - 1.0) / norm)
        } else {
            let ln_pdf = (a - 1.0) * x.ln() + (b - 1.0) * (-x).ln_1p() - ln_beta(a, b);
            Ok(ln_pdf.exp())
        }
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x <= 0.0 {
            return Ok(0.0);
        }
        if x >= 1.0 {
            return Ok(1.0);
        }
        Ok(regularized_incomplete_beta(x, self.alpha, self.beta)?)
    }

    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        sampling::beta(source, self.alpha, self.beta)
    }
}

/// Density at the endpoint where `near` is the exponent-bearing shape:
/// `f(0)` is `endpoint_density(α, β)`, `f(1)` is `endpoint_density(β, α)`.
fn endpoint_density(near: f64, far: f64) -> f64 {
    if near < 1.0 {
        f64::INFINITY
    } else if near == 1.0 {
        // x^0 (1−x)^(far−1) / B(1, far) at the endpoint = far
        far
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SampleSummary;
    use approx::assert_relative_eq;

    #[test]
    fn test_beta_1_2_exact_values() {
        let d = Beta::new(1.0, 2.0).unwrap();
        assert!((d.pdf(0.4).unwrap() - 1.2).abs() < 1e-9);
        assert!((d.cdf(0.4).unwrap() - 0.64).abs() < 1e-9);
        assert_relative_eq!(d.pdf(0.6).unwrap(), 0.8, epsilon = 1e-12);
        assert_relative_eq!(d.pdf(0.14).unwrap(), 1.72, epsilon = 1e-12);
        assert_relative_eq!(d.cdf(0.6).unwrap(), 0.84, epsilon = 1e-12);
        assert_relative_eq!(d.cdf(0.14).unwrap(), 0.2604, epsilon = 1e-12);
    }

    #[test]
    fn test_beta_1_2_moments() {
        let d = Beta { alpha: 1.0, beta: 2.0 };
        assert_relative_eq!(d.mean().unwrap(), 1.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(d.variance().unwrap(), 1.0 / 18.0, epsilon = 1e-15);
        assert_relative_eq!(d.std_dev().unwrap(), 0.2357022603955158, epsilon = 1e-15);
        assert_relative_eq!(d.rel_std_dev().unwrap(), 0.7071067811865475, epsilon = 1e-15);
        assert_relative_eq!(d.skewness().unwrap(), 0.565685424949238, epsilon = 1e-15);
        assert_relative_eq!(d.kurtosis().unwrap(), -0.6, epsilon = 1e-15);
    }

    #[test]
    fn test_beta_5_4_reference_values() {
        let d = Beta { alpha: 5.0, beta: 4.0 };
        assert_relative_eq!(d.mean().unwrap(), 5.0 / 9.0, epsilon = 1e-15);
        assert_relative_eq!(d.variance().unwrap(), 2.0 / 81.0, epsilon = 1e-15);
        assert_relative_eq!(d.skewness().unwrap(), -0.128564869306645, epsilon = 1e-14);
        assert_relative_eq!(d.kurtosis().unwrap(), -21.0 / 44.0, epsilon = 1e-14);
        assert_relative_eq!(d.pdf(0.4).unwrap(), 1.548288, epsilon = 1e-12);
        assert_relative_eq!(d.pdf(0.6).unwrap(), 2.322432, epsilon = 1e-12);
        assert_relative_eq!(d.pdf(0.14).unwrap(), 0.0684172364288, epsilon = 1e-12);
        assert_relative_eq!(d.cdf(0.4).unwrap(), 0.1736704, epsilon = 1e-12);
        assert_relative_eq!(d.cdf(0.6).unwrap(), 0.5940864, epsilon = 1e-12);
        assert_relative_eq!(d.cdf(0.14).unwrap(), 0.002079010303104, epsilon = 1e-12);
    }

    #[test]
    fn test_beta_endpoints() {
        assert_eq!(Beta { alpha: 1.0, beta: 3.0 }.pdf(0.0).unwrap(), 3.0);
        assert_eq!(Beta { alpha: 3.0, beta: 1.0 }.pdf(1.0).unwrap(), 3.0);
        assert_eq!(Beta { alpha: 0.5, beta: 0.5 }.pdf(0.0).unwrap(), f64::INFINITY);
        assert_eq!(Beta { alpha: 0.5, beta: 0.5 }.pdf(1.0).unwrap(), f64::INFINITY);
        assert_eq!(Beta { alpha: 2.0, beta: 2.0 }.pdf(0.0).unwrap(), 0.0);
        assert_eq!(Beta { alpha: 2.0, beta: 2.0 }.pdf(-0.1).unwrap(), 0.0);
        assert_eq!(Beta { alpha: 2.0, beta: 2.0 }.cdf(1.5).unwrap(), 1.0);
    }

    #[test]
    fn test_beta_large_shapes_use_log_density() {
        // B(600, 700) underflows; the density near the mode is still finite.
        let d = Beta { alpha: 600.0, beta: 700.0 };
        let mode = 599.0 / 1298.0;
        let f = d.pdf(mode).unwrap();
        assert!(f.is_finite() && f > 10.0, "density at mode {f}");
    }

    #[test]
    fn test_beta_sampling_moments() {
        let d = Beta { alpha: 5.0, beta: 4.0 };
        let mut source = RandomSource::seeded(23);
        let s: SampleSummary = d.sample(&mut source, 200_000).unwrap().into_iter().collect();
        assert!((s.mean().unwrap() - 5.0 / 9.0).abs() < 0.002);
        assert!(((s.variance().unwrap() - 2.0 / 81.0) / (2.0 / 81.0)).abs() < 0.02);
    }
}
