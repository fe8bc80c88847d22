use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{standardized, Distribution, Support};
use crate::error::{ParamError, Result};
use crate::random::RandomSource;
use crate::sampling;
use crate::special::{binomial_coefficient, ln_factorial, ln_gamma, regularized_incomplete_beta};

/// Negative binomial distribution: the number of failures `k` observed
/// before the `r`-th success, with success probability `p`.
///
/// `r` may be any positive real, in which case the PMF uses the generalized
/// binomial coefficient.
///
/// # Mathematical Definition
/// - PMF: P(k) = C(k+r−1, k) pʳ (1−p)ᵏ
/// - CDF: F(k) = I_p(r, k+1)
/// - Mean: r(1−p)/p
/// - Variance: r(1−p)/p²
/// - Skewness: (2−p)/√(r(1−p))
/// - Excess kurtosis: 6/r + p²/(r(1−p))
///
/// Reference: Johnson, Kemp & Kotz (2005), *Univariate Discrete
/// Distributions*, 3rd ed., Chapter 5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NegativeBinomial {
    /// Number of successes `r` that ends the experiment.
    pub failures: f64,
    pub prob: f64,
}

impl NegativeBinomial {
    pub fn new(failures: f64, prob: f64) -> Result<Self, ParamError> {
        let d = Self { failures, prob };
        d.validate()?;
        Ok(d)
    }

    fn pmf(&self, k: f64) -> f64 {
        let (r, p) = (self.failures, self.prob);
        if k < 0.0 || k == f64::INFINITY {
            return 0.0;
        }
        if p == 1.0 {
            return if k == 0.0 { 1.0 } else { 0.0 };
        }
        let c = binomial_coefficient(k + r - 1.0, k);
        let pr = p.powf(r);
        let qk = (1.0 - p).powf(k);
        if c.is_finite() && pr.is_normal() && qk.is_normal() {
            let direct = c * pr * qk;
            if direct.is_normal() {
                return direct;
            }
        }
        let ln_pmf = ln_gamma(k + r) - ln_gamma(r) - ln_factorial(k) + r * p.ln() + k * (-p).ln_1p();
        ln_pmf.exp()
    }
}

impl Distribution for NegativeBinomial {
    fn family(&self) -> &'static str {
        "negative_binomial"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::positive("negative_binomial", "failures", self.failures)?;
        ParamError::probability("negative_binomial", "prob", self.prob)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::integers(0.0, f64::INFINITY))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.failures * (1.0 - self.prob) / self.prob)
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.failures * (1.0 - self.prob) / (self.prob * self.prob))
    }

    fn skewness(&self) -> Result<f64> {
        let var = self.variance()?;
        let (r, p) = (self.failures, self.prob);
        standardized("negative_binomial", "skewness", var, || (2.0 - p) / (r * (1.0 - p)).sqrt())
    }

    fn kurtosis(&self) -> Result<f64> {
        let var = self.variance()?;
        let (r, p) = (self.failures, self.prob);
        standardized("negative_binomial", "kurtosis", var, || 6.0 / r + p * p / (r * (1.0 - p)))
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        Ok(self.pmf(x.floor()))
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if x < 0.0 {
            return Ok(0.0);
        }
        if x == f64::INFINITY || self.prob == 1.0 {
            return Ok(1.0);
        }
        Ok(regularized_incomplete_beta(self.prob, self.failures, x.floor() + 1.0)?)
    }

    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        sampling::negative_binomial(source, self.failures, self.prob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SampleSummary;
    use approx::assert_relative_eq;

    #[test]
    fn test_negative_binomial_10_half() {
        let d = NegativeBinomial::new(10.0, 0.5).unwrap();
        assert_eq!(d.mean().unwrap(), 10.0);
        assert_eq!(d.variance().unwrap(), 20.0);
        assert_relative_eq!(d.std_dev().unwrap(), 4.47213595499958, max_relative = 1e-14);
        assert_relative_eq!(d.rel_std_dev().unwrap(), 0.4472135954999579, max_relative = 1e-14);
        assert_relative_eq!(d.skewness().unwrap(), 0.6708203932499369, max_relative = 1e-14);
        assert_relative_eq!(d.kurtosis().unwrap(), 0.65, max_relative = 1e-14);

        assert_relative_eq!(d.pdf(1.0).unwrap(), 0.0048828125, max_relative = 1e-14);
        assert_relative_eq!(d.pdf(3.0).unwrap(), 0.02685546875, max_relative = 1e-14);
        assert_relative_eq!(d.pdf(5.0).unwrap(), 0.06109619140625, max_relative = 1e-14);
        assert_relative_eq!(d.cdf(1.0).unwrap(), 0.005859375, max_relative = 1e-12);
        assert_relative_eq!(d.cdf(3.0).unwrap(), 0.046142578125, max_relative = 1e-12);
        assert_relative_eq!(d.cdf(5.0).unwrap(), 0.15087890625, max_relative = 1e-12);
    }

    #[test]
    fn test_negative_binomial_real_failures() {
        // r = 2.5: P(0) = p^r, P(1) = r · p^r · (1−p)
        let d = NegativeBinomial { failures: 2.5, prob: 0.4 };
        let p0 = 0.4_f64.powf(2.5);
        assert_relative_eq!(d.pdf(0.0).unwrap(), p0, max_relative = 1e-14);
        assert_relative_eq!(d.pdf(1.0).unwrap(), 2.5 * p0 * 0.6, max_relative = 1e-13);
        let total: f64 = (0..400).map(|k| d.pdf(k as f64).unwrap()).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-10);
        assert_relative_eq!(d.cdf(399.0).unwrap(), total, epsilon = 1e-10);
    }

    #[test]
    fn test_negative_binomial_certain_success() {
        let d = NegativeBinomial { failures: 3.0, prob: 1.0 };
        assert_eq!(d.mean().unwrap(), 0.0);
        assert_eq!(d.pdf(0.0).unwrap(), 1.0);
        assert_eq!(d.cdf(0.0).unwrap(), 1.0);
        assert!(d.skewness().unwrap_err().is_indeterminate());
        assert!(d.rel_std_dev().unwrap_err().is_indeterminate());
    }

    #[test]
    fn test_negative_binomial_sampling_moments() {
        let d = NegativeBinomial { failures: 10.0, prob: 0.5 };
        let mut source = RandomSource::seeded(31);
        let s: SampleSummary = d.sample(&mut source, 200_000).unwrap().into_iter().collect();
        assert!((s.mean().unwrap() - 10.0).abs() < 0.06, "mean {}", s.mean().unwrap());
        assert!(((s.variance().unwrap() - 20.0) / 20.0).abs() < 0.02, "variance {}", s.variance().unwrap());
    }

    #[test]
    fn test_negative_binomial_vanishing_prob_draws() {
        let d = NegativeBinomial { failures: 1.0, prob: 1e-25 };
        let mut source = RandomSource::seeded(32);
        let xs = d.sample(&mut source, 200).unwrap();
        assert!(xs.iter().all(|x| x.is_finite() && *x >= 0.0));
        let mean = xs.iter().sum::<f64>() / xs.len() as f64;
        assert!((mean / d.mean().unwrap() - 1.0).abs() < 0.3, "mean {mean}");
    }
}
