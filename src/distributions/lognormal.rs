use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Distribution, Support};
use crate::error::{ParamError, Result};
use crate::random::RandomSource;
use crate::special::{standard_normal_cdf, standard_normal_pdf};

/// Log-normal distribution: `ln X ~ N(μ, σ²)`.
///
/// # Mathematical Definition
/// - PDF: f(x) = (1/(xσ√(2π))) exp(−(ln x − μ)²/(2σ²)) for x > 0
/// - CDF: F(x) = Φ((ln x − μ)/σ)
/// - Mean: exp(μ + σ²/2)
/// - Variance: (exp(σ²) − 1) · exp(2μ + σ²)
/// - Skewness: (exp(σ²) + 2) · √(exp(σ²) − 1)
/// - Excess kurtosis: exp(4σ²) + 2exp(3σ²) + 3exp(2σ²) − 6
///
/// Reference: Johnson, Kotz & Balakrishnan (1994), *Continuous Univariate
/// Distributions*, Vol. 1, Chapter 14.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogNormal {
    /// Mean of `ln X`.
    pub mu: f64,
    /// Standard deviation of `ln X`.
    pub sigma: f64,
}

impl LogNormal {
    /// # Errors
    /// Returns `Err` if `mu` is not finite or `sigma` is not finite and positive.
    pub fn new(mu: f64, sigma: f64) -> Result<Self, ParamError> {
        let d = Self { mu, sigma };
        d.validate()?;
        Ok(d)
    }

    /// Creates a log-normal whose own mean and standard deviation are given.
    ///
    /// Solves `σ² = ln(1 + s²/m²)`, `μ = ln m − σ²/2`.
    pub fn from_mean_std(mean: f64, std_dev: f64) -> Result<Self, ParamError> {
        ParamError::positive("log_normal", "mean", mean)?;
        ParamError::positive("log_normal", "std_dev", std_dev)?;
        let cv2 = (std_dev / mean).powi(2);
        let sigma2 = cv2.ln_1p();
        Self::new(mean.ln() - sigma2 / 2.0, sigma2.sqrt())
    }
}

impl Distribution for LogNormal {
    fn family(&self) -> &'static str {
        "log_normal"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::finite("log_normal", "mu", self.mu)?;
        ParamError::positive("log_normal", "sigma", self.sigma)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::continuous(0.0, f64::INFINITY))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        Ok((self.mu + self.sigma * self.sigma / 2.0).exp())
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        let s2 = self.sigma * self.sigma;
        Ok(s2.exp_m1() * (2.0 * self.mu + s2).exp())
    }

    fn skewness(&self) -> Result<f64> {
        self.validate()?;
        let s2 = self.sigma * self.sigma;
        Ok((s2.exp() + 2.0) * s2.exp_m1().sqrt())
    }

    fn kurtosis(&self) -> Result<f64> {
        self.validate()?;
        let s2 = self.sigma * self.sigma;
        Ok((4.0 * s2).exp() + 2.0 * (3.0 * s2).exp() + 3.0 * (2.0 * s2).exp() - 6.0)
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x <= 0.0 {
            return Ok(0.0);
        }
        Ok(standard_normal_pdf((x.ln() - self.mu) / self.sigma) / (x * self.sigma))
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x <= 0.0 {
            return Ok(0.0);
        }
        Ok(standard_normal_cdf((x.ln() - self.mu) / self.sigma))
    }

    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        Ok(source.normal(self.mu, self.sigma).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lognormal_moments() {
        let d = LogNormal::new(2.0, 1.0).unwrap();
        assert_relative_eq!(d.mean().unwrap(), 12.182493960703473, max_relative = 1e-14);
        assert_relative_eq!(d.variance().unwrap(), 255.01563439015852, max_relative = 1e-13);
        assert_relative_eq!(d.std_dev().unwrap(), 15.969208946912759, max_relative = 1e-13);
        assert_relative_eq!(d.skewness().unwrap(), 6.184877138632554, max_relative = 1e-13);
        assert_relative_eq!(d.kurtosis().unwrap(), 110.93639217631153, max_relative = 1e-13);
    }

    #[test]
    fn test_lognormal_pdf_cdf() {
        let d = LogNormal { mu: 2.0, sigma: 1.0 };
        assert_relative_eq!(d.pdf(1.0).unwrap(), 0.05399096651318805, max_relative = 1e-12);
        assert_relative_eq!(d.pdf(3.0).unwrap(), 0.0885842922960999, max_relative = 1e-12);
        assert_relative_eq!(d.cdf(1.0).unwrap(), 0.022750131948179207, max_relative = 1e-11);
        assert_relative_eq!(d.cdf(5.0).unwrap(), 0.3480604769177561, max_relative = 1e-11);

        let d = LogNormal { mu: 0.0, sigma: 2.0 };
        assert_relative_eq!(d.pdf(1.0).unwrap(), 0.19947114020071635, max_relative = 1e-12);
        assert_eq!(d.cdf(1.0).unwrap(), 0.5);
        assert_relative_eq!(d.cdf(3.0).unwrap(), 0.7086023142840821, max_relative = 1e-11);
    }

    #[test]
    fn test_lognormal_outside_support() {
        let d = LogNormal { mu: 0.0, sigma: 1.0 };
        assert_eq!(d.pdf(0.0).unwrap(), 0.0);
        assert_eq!(d.pdf(-3.0).unwrap(), 0.0);
        assert_eq!(d.cdf(-3.0).unwrap(), 0.0);
    }

    #[test]
    fn test_lognormal_from_mean_std() {
        let d = LogNormal::from_mean_std(10.0, 3.0).unwrap();
        assert_relative_eq!(d.mean().unwrap(), 10.0, max_relative = 1e-12);
        assert_relative_eq!(d.std_dev().unwrap(), 3.0, max_relative = 1e-12);
        assert!(LogNormal::from_mean_std(-1.0, 1.0).is_err());
    }

    #[test]
    fn test_lognormal_draws_positive() {
        let d = LogNormal { mu: 0.0, sigma: 1.5 };
        let mut source = RandomSource::seeded(4);
        assert!(d.sample(&mut source, 1000).unwrap().iter().all(|&x| x > 0.0));
    }
}
