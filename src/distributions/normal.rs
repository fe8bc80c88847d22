use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Distribution, Support};
use crate::error::{ParamError, Result};
use crate::random::RandomSource;
use crate::special::{standard_normal_cdf, standard_normal_pdf};

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// # Mathematical Definition
/// - PDF: f(x) = (1/(σ√(2π))) exp(−(x−μ)²/(2σ²))
/// - CDF: F(x) = Φ((x−μ)/σ) = ½ erfc(−(x−μ)/(σ√2))
/// - Mean: μ
/// - Variance: σ²
/// - Skewness and excess kurtosis: 0
///
/// Draws go through the cached Box–Muller generator of [`RandomSource`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normal {
    pub mu: f64,
    pub sigma: f64,
}

impl Normal {
    /// Creates a normal distribution with mean `mu` and standard deviation `sigma`.
    ///
    /// # Errors
    /// Returns `Err` if `mu` is not finite or `sigma` is not finite and positive.
    pub fn new(mu: f64, sigma: f64) -> Result<Self, ParamError> {
        let d = Self { mu, sigma };
        d.validate()?;
        Ok(d)
    }

    /// The standard normal N(0, 1).
    pub fn standard() -> Self {
        Self { mu: 0.0, sigma: 1.0 }
    }
}

impl Distribution for Normal {
    fn family(&self) -> &'static str {
        "normal"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::finite("normal", "mu", self.mu)?;
        ParamError::positive("normal", "sigma", self.sigma)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::continuous(f64::NEG_INFINITY, f64::INFINITY))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.mu)
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.sigma * self.sigma)
    }

    fn std_dev(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.sigma)
    }

    fn skewness(&self) -> Result<f64> {
        self.validate()?;
        Ok(0.0)
    }

    fn kurtosis(&self) -> Result<f64> {
        self.validate()?;
        Ok(0.0)
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        Ok(standard_normal_pdf((x - self.mu) / self.sigma) / self.sigma)
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        Ok(standard_normal_cdf((x - self.mu) / self.sigma))
    }

    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        Ok(source.normal(self.mu, self.sigma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SampleSummary;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_moments() {
        let n = Normal::new(1.0, 4.0).unwrap();
        assert_eq!(n.mean().unwrap(), 1.0);
        assert_eq!(n.variance().unwrap(), 16.0);
        assert_eq!(n.std_dev().unwrap(), 4.0);
        assert_eq!(n.rel_std_dev().unwrap(), 4.0);
        assert_eq!(n.skewness().unwrap(), 0.0);
        assert_eq!(n.kurtosis().unwrap(), 0.0);
    }

    #[test]
    fn test_normal_pdf_cdf_reference_values() {
        let n = Normal { mu: 1.0, sigma: 4.0 };
        let pdf = [(-4.0, 0.04566227134725548), (0.5, 0.09895942173618737), (12.0, 0.0022733906253977632)];
        let cdf = [(-4.0, 0.10564977366685526), (0.5, 0.4502617751698871), (12.0, 0.9970202367649454)];
        for (x, want) in pdf {
            assert_relative_eq!(n.pdf(x).unwrap(), want, max_relative = 1e-12);
        }
        for (x, want) in cdf {
            assert_relative_eq!(n.cdf(x).unwrap(), want, max_relative = 1e-12);
        }

        let n = Normal { mu: 10.0, sigma: 2.0 };
        assert_relative_eq!(n.pdf(6.0).unwrap(), 0.026995483256594026, max_relative = 1e-12);
        assert_relative_eq!(n.cdf(4.0).unwrap(), 0.0013498980316300946, max_relative = 1e-11);
        assert_relative_eq!(n.cdf(16.0).unwrap(), 0.9986501019683699, max_relative = 1e-12);
        assert_relative_eq!(n.rel_std_dev().unwrap(), 0.2, epsilon = 1e-15);
    }

    #[test]
    fn test_normal_symmetry() {
        let n = Normal::standard();
        assert_eq!(n.cdf(0.0).unwrap(), 0.5);
        for x in [0.3, 1.0, 2.5, 5.0] {
            assert_relative_eq!(n.cdf(x).unwrap() + n.cdf(-x).unwrap(), 1.0, epsilon = 1e-15);
            assert_eq!(n.pdf(x).unwrap(), n.pdf(-x).unwrap());
        }
    }

    #[test]
    fn test_normal_invalid() {
        assert!(Normal::new(0.0, 0.0).is_err());
        assert!(Normal::new(0.0, -1.0).is_err());
        assert!(Normal::new(f64::NAN, 1.0).is_err());
        let bad = Normal { mu: 0.0, sigma: -1.0 };
        assert!(bad.std_dev().unwrap_err().is_invalid_parameter());
        assert!(bad.cdf(0.0).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_normal_sampling_moments() {
        let n = Normal { mu: 10.0, sigma: 2.0 };
        let mut source = RandomSource::seeded(17);
        let s: SampleSummary = n.sample(&mut source, 100_000).unwrap().into_iter().collect();
        assert!((s.mean().unwrap() - 10.0).abs() < 0.03, "mean {}", s.mean().unwrap());
        assert!((s.variance().unwrap() - 4.0).abs() < 0.1, "variance {}", s.variance().unwrap());
    }
}
