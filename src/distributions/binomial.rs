use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{standardized, Distribution, Support};
use crate::error::{ParamError, Result};
use crate::random::RandomSource;
use crate::sampling;
use crate::special::{binomial_coefficient, ln_factorial, regularized_incomplete_beta};

/// Binomial distribution: successes in `n` independent trials with
/// success probability `p`.
///
/// # Mathematical Definition
/// - PMF: P(k) = C(n, k) pᵏ (1−p)ⁿ⁻ᵏ for k ∈ {0, …, n}
/// - CDF: F(k) = I_{1−p}(n−k, k+1)
/// - Mean: np
/// - Variance: np(1−p)
/// - Skewness: (1−2p)/√(np(1−p))
/// - Excess kurtosis: (1 − 6p(1−p)) / (np(1−p))
///
/// A non-integral `trials` is floored before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Binomial {
    pub trials: f64,
    pub prob: f64,
}

impl Binomial {
    /// # Errors
    /// Returns `Err` if `trials` is negative or not finite, or `prob` is
    /// outside `(0, 1]`.
    pub fn new(trials: f64, prob: f64) -> Result<Self, ParamError> {
        let d = Self { trials, prob };
        d.validate()?;
        Ok(d)
    }

    /// The canonical (floored) trial count.
    pub fn n(&self) -> f64 {
        self.trials.floor()
    }

    fn pmf(&self, k: f64) -> f64 {
        let n = self.n();
        let p = self.prob;
        if k < 0.0 || k > n {
            return 0.0;
        }
        if p == 1.0 {
            return if k == n { 1.0 } else { 0.0 };
        }
        let c = binomial_coefficient(n, k);
        let pk = p.powf(k);
        let qk = (1.0 - p).powf(n - k);
        if c.is_finite() && pk.is_normal() && qk.is_normal() {
            let direct = c * pk * qk;
            if direct.is_normal() {
                return direct;
            }
        }
        let ln_pmf =
            ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k) + k * p.ln() + (n - k) * (-p).ln_1p();
        ln_pmf.exp()
    }
}

impl Distribution for Binomial {
    fn family(&self) -> &'static str {
        "binomial"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::check(
            self.trials >= 0.0 && self.trials.is_finite(),
            "binomial",
            "trials",
            "must be finite and >= 0",
            self.trials,
        )?;
        ParamError::probability("binomial", "prob", self.prob)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::integers(0.0, self.n()))
    }

    fn mean(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.n() * self.prob)
    }

    fn variance(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.n() * self.prob * (1.0 - self.prob))
    }

    fn skewness(&self) -> Result<f64> {
        let var = self.variance()?;
        standardized("binomial", "skewness", var, || (1.0 - 2.0 * self.prob) / var.sqrt())
    }

    fn kurtosis(&self) -> Result<f64> {
        let var = self.variance()?;
        let pq = self.prob * (1.0 - self.prob);
        standardized("binomial", "kurtosis", var, || (1.0 - 6.0 * pq) / var)
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
        let n = self.n();
        let k = x.floor();
        if k < 0.0 {
            return Ok(0.0);
        }
        if k >= n {
            return Ok(1.0);
        }
        if self.prob == 1.0 {
            return Ok(0.0);
        }
        Ok(regularized_incomplete_beta(1.0 - self.prob, n - k, k + 1.0)?)
    }

    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        sampling::binomial(source, self.n(), self.prob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_binomial_10_half() {
        let d = Binomial::new(10.0, 0.5).unwrap();
        assert_eq!(d.mean().unwrap(), 5.0);
        assert_eq!(d.variance().unwrap(), 2.5);
        assert_relative_eq!(d.rel_std_dev().unwrap(), 0.31622776601683794, max_relative = 1e-15);
        assert_eq!(d.skewness().unwrap(), 0.0);
        assert_relative_eq!(d.kurtosis().unwrap(), -0.2, epsilon = 1e-15);

        assert_eq!(d.pdf(0.0).unwrap(), 0.0009765625);
        assert_eq!(d.pdf(1.0).unwrap(), 0.009765625);
        assert_eq!(d.pdf(5.0).unwrap(), 0.24609375);
        assert_relative_eq!(d.cdf(0.0).unwrap(), 0.0009765625, max_relative = 1e-12);
        assert_relative_eq!(d.cdf(1.0).unwrap(), 0.0107421875, max_relative = 1e-12);
        assert_relative_eq!(d.cdf(5.0).unwrap(), 0.623046875, max_relative = 1e-12);
    }

    #[test]
    fn test_binomial_pdf_floors_argument() {
        let d = Binomial { trials: 10.0, prob: 0.5 };
        assert_eq!(d.pdf(5.9).unwrap(), d.pdf(5.0).unwrap());
        assert_eq!(d.cdf(5.9).unwrap(), d.cdf(5.0).unwrap());
        assert_eq!(d.pdf(-0.5).unwrap(), 0.0);
        assert_eq!(d.pdf(11.0).unwrap(), 0.0);
        assert_eq!(d.cdf(-0.5).unwrap(), 0.0);
        assert_eq!(d.cdf(10.0).unwrap(), 1.0);
    }

    #[test]
    fn test_binomial_trials_floored() {
        let d = Binomial { trials: 10.7, prob: 0.3 };
        assert_eq!(d.n(), 10.0);
        assert_relative_eq!(d.mean().unwrap(), 3.0, epsilon = 1e-15);
        assert_eq!(d.support().unwrap().upper, 10.0);
        let mut source = RandomSource::seeded(2);
        assert!(d.sample(&mut source, 500).unwrap().iter().all(|&k| k <= 10.0));
    }

    #[test]
    fn test_binomial_degenerate() {
        let certain = Binomial { trials: 7.0, prob: 1.0 };
        assert_eq!(certain.pdf(7.0).unwrap(), 1.0);
        assert_eq!(certain.pdf(6.0).unwrap(), 0.0);
        assert_eq!(certain.cdf(6.0).unwrap(), 0.0);
        assert!(certain.skewness().unwrap_err().is_indeterminate());
        let mut source = RandomSource::seeded(0);
        assert_eq!(certain.random(&mut source).unwrap(), 7.0);

        let empty = Binomial { trials: 0.0, prob: 0.4 };
        assert_eq!(empty.pdf(0.0).unwrap(), 1.0);
        assert_eq!(empty.cdf(0.0).unwrap(), 1.0);
        assert!(empty.rel_std_dev().unwrap_err().is_indeterminate());
    }

    #[test]
    fn test_binomial_large_n_pmf_sums_to_one() {
        let d = Binomial { trials: 5000.0, prob: 0.37 };
        let total: f64 = (0..=5000).map(|k| d.pdf(k as f64).unwrap()).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_binomial_invalid() {
        assert!(Binomial::new(-1.0, 0.5).is_err());
        assert!(Binomial::new(10.0, 0.0).is_err());
        assert!(Binomial::new(10.0, 1.5).is_err());
        assert!(Binomial::new(f64::INFINITY, 0.5).is_err());
    }

    #[test]
    fn test_binomial_trials_beyond_u64() {
        let d = Binomial { trials: 1e21, prob: 0.5 };
        let sd = d.std_dev().unwrap();
        let mut source = RandomSource::seeded(3);
        for x in d.sample(&mut source, 100).unwrap() {
            assert!((x - 5e20).abs() < 8.0 * sd, "draw {x}");
            assert!(x <= 1e21);
        }
    }
}
