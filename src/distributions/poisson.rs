use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Distribution, Support};
use crate::error::{ParamError, Result};
use crate::random::RandomSource;
use crate::sampling;
use crate::special::{ln_factorial, regularized_upper_gamma};

/// Poisson distribution with mean `μ`.
///
/// # Mathematical Definition
/// - PMF: P(k) = μᵏ e^(−μ) / k!
/// - CDF: F(k) = Q(k+1, μ), the regularized upper incomplete gamma
/// - Mean and variance: μ
/// - Skewness: 1/√μ
/// - Excess kurtosis: 1/μ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Poisson {
    pub mu: f64,
}

impl Poisson {
    pub fn new(mu: f64) -> Result<Self, ParamError> {
        let d = Self { mu };
        d.validate()?;
        Ok(d)
    }
}

impl Distribution for Poisson {
    fn family(&self) -> &'static str {
        "poisson"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::positive("poisson", "mu", self.mu)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::integers(0.0, f64::INFINITY))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.mu)
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.mu)
    }

    fn skewness(&self) -> Result<f64> {
        self.validate()?;
        Ok(1.0 / self.mu.sqrt())
    }

    fn kurtosis(&self) -> Result<f64> {
        self.validate()?;
        Ok(1.0 / self.mu)
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        let k = x.floor();
        if k < 0.0 || k == f64::INFINITY {
            return Ok(0.0);
        }
        Ok((k * self.mu.ln() - self.mu - ln_factorial(k)).exp())
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x < 0.0 {
            return Ok(0.0);
        }
        if x == f64::INFINITY {
            return Ok(1.0);
        }
        Ok(regularized_upper_gamma(x.floor() + 1.0, self.mu)?)
    }

    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        sampling::poisson(source, self.mu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_poisson_10() {
        let d = Poisson::new(10.0).unwrap();
        assert_eq!(d.mean().unwrap(), 10.0);
        assert_eq!(d.variance().unwrap(), 10.0);
        assert_relative_eq!(d.skewness().unwrap(), 1.0 / 10f64.sqrt(), max_relative = 1e-15);
        assert_relative_eq!(d.kurtosis().unwrap(), 0.1, max_relative = 1e-15);
        assert_relative_eq!(d.pdf(9.0).unwrap(), 0.1251100357211333, max_relative = 1e-12);
        assert_relative_eq!(d.pdf(2.0).unwrap(), 0.002269996488124243, max_relative = 1e-12);
        assert_relative_eq!(d.cdf(9.0).unwrap(), 0.4579297144718522, max_relative = 1e-11);
        assert_relative_eq!(d.cdf(2.0).unwrap(), 0.002769395715511576, max_relative = 1e-11);
        assert_relative_eq!(d.cdf(4.0).unwrap(), 0.02925268807696107, max_relative = 1e-11);
    }

    #[test]
    fn test_poisson_2() {
        let d = Poisson { mu: 2.0 };
        assert_relative_eq!(d.kurtosis().unwrap(), 0.5, max_relative = 1e-15);
        assert_relative_eq!(d.pdf(1.0).unwrap(), 0.2706705664732254, max_relative = 1e-12);
        assert_relative_eq!(d.pdf(3.0).unwrap(), 0.1804470443154836, max_relative = 1e-12);
        assert_relative_eq!(d.cdf(1.0).unwrap(), 0.4060058497098381, max_relative = 1e-12);
        assert_relative_eq!(d.cdf(3.0).unwrap(), 0.857123460498547, max_relative = 1e-12);
        assert_relative_eq!(d.cdf(5.0).unwrap(), 0.9834363915193856, max_relative = 1e-12);
    }

    #[test]
    fn test_poisson_boundaries() {
        let d = Poisson { mu: 3.0 };
        assert_eq!(d.pdf(-1.0).unwrap(), 0.0);
        assert_eq!(d.cdf(-0.5).unwrap(), 0.0);
        assert_eq!(d.cdf(f64::INFINITY).unwrap(), 1.0);
        assert_relative_eq!(d.cdf(0.0).unwrap(), (-3.0_f64).exp(), max_relative = 1e-12);
        assert_eq!(d.pdf(2.5).unwrap(), d.pdf(2.0).unwrap());
    }

    #[test]
    fn test_poisson_fractional_mean_not_floored() {
        let d = Poisson { mu: 2.5 };
        let mut source = RandomSource::seeded(6);
        let xs = d.sample(&mut source, 200_000).unwrap();
        let mean = xs.iter().sum::<f64>() / xs.len() as f64;
        assert!((mean - 2.5).abs() < 0.02, "sample mean {mean}");
    }

    #[test]
    fn test_poisson_zero_mean_rejected() {
        assert!(Poisson::new(0.0).is_err());
        assert!(Poisson { mu: 0.0 }.cdf(1.0).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_poisson_huge_mean() {
        let d = Poisson { mu: 1e20 };
        let mut source = RandomSource::seeded(7);
        for x in d.sample(&mut source, 50).unwrap() {
            assert!(((x - 1e20) / 1e20).abs() < 1e-8, "draw {x}");
        }
        // P(X ≤ μ) → 1/2 as μ grows.
        let d = Poisson { mu: 1e7 };
        let c = d.cdf(1e7).unwrap();
        assert!((c - 0.5).abs() < 1e-3, "cdf at mean {c}");
    }
}
