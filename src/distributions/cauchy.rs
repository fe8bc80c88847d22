use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Distribution, Support};
use crate::error::{DistError, ParamError, Result};
use crate::random::RandomSource;

/// Cauchy (Lorentz) distribution.
///
/// # Mathematical Definition
/// - PDF: f(x) = 1 / (πγ(1 + ((x−x₀)/γ)²))
/// - CDF: F(x) = ½ + arctan((x−x₀)/γ)/π
/// - Quantile: x₀ + γ tan(π(u − ½))
///
/// No moment exists; every moment accessor returns
/// [`DistError::Indeterminate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cauchy {
    /// Location `x₀` (the median).
    pub location: f64,
    /// Scale `γ` (the half-width at half-maximum).
    pub scale: f64,
}

impl Cauchy {
    pub fn new(location: f64, scale: f64) -> Result<Self, ParamError> {
        let d = Self { location, scale };
        d.validate()?;
        Ok(d)
    }

    fn undefined(&self, moment: &'static str) -> Result<f64> {
        self.validate()?;
        Err(DistError::indeterminate("cauchy", moment))
    }
}

impl Distribution for Cauchy {
    fn family(&self) -> &'static str {
        "cauchy"
    }

    fn validate(&self) -> Result<(), ParamError> {
        ParamError::finite("cauchy", "location", self.location)?;
        ParamError::positive("cauchy", "scale", self.scale)
    }

    fn support(&self) -> Result<Support> {
        self.validate()?;
        Ok(Support::continuous(f64::NEG_INFINITY, f64::INFINITY))
    }

    fn mean(&self) -> Result<f64> {
        self.undefined("mean")
    }

    fn variance(&self) -> Result<f64> {
        self.undefined("variance")
    }

    fn std_dev(&self) -> Result<f64> {
        self.undefined("standard deviation")
    }

    fn skewness(&self) -> Result<f64> {
        self.undefined("skewness")
    }

    fn kurtosis(&self) -> Result<f64> {
        self.undefined("kurtosis")
    }

    fn pdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        let z = (x - self.location) / self.scale;
        Ok(1.0 / (PI * self.scale * (1.0 + z * z)))
    }

    fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        let z = (x - self.location) / self.scale;
        Ok(0.5 + z.atan() / PI)
    }

    fn random<R: Rng>(&self, source: &mut RandomSource<R>) -> Result<f64> {
        self.validate()?;
        let u = source.uniform_open();
        Ok(self.location + self.scale * (PI * (u - 0.5)).tan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cauchy_moments_indeterminate() {
        let d = Cauchy::new(10.0, 2.0).unwrap();
        assert!(d.mean().unwrap_err().is_indeterminate());
        assert!(d.variance().unwrap_err().is_indeterminate());
        assert!(d.std_dev().unwrap_err().is_indeterminate());
        assert!(d.rel_std_dev().unwrap_err().is_indeterminate());
        assert!(d.skewness().unwrap_err().is_indeterminate());
        assert!(d.kurtosis().unwrap_err().is_indeterminate());
    }

    #[test]
    fn test_cauchy_invalid_scale_wins_over_indeterminate() {
        let d = Cauchy { location: 0.0, scale: -1.0 };
        assert!(d.mean().unwrap_err().is_invalid_parameter());
        assert!(Cauchy::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_cauchy_pdf_cdf() {
        let d = Cauchy { location: 10.0, scale: 2.0 };
        assert_relative_eq!(d.pdf(4.0).unwrap(), 0.015915494309189534, max_relative = 1e-14);
        assert_relative_eq!(d.pdf(12.0).unwrap(), 0.07957747154594767, max_relative = 1e-14);
        assert_relative_eq!(d.cdf(4.0).unwrap(), 0.10241638234956672, max_relative = 1e-13);
        assert_relative_eq!(d.cdf(12.0).unwrap(), 0.75, max_relative = 1e-15);

        let d = Cauchy { location: 1.0, scale: 4.0 };
        assert_relative_eq!(d.pdf(2.0).unwrap(), 0.07489644380795075, max_relative = 1e-14);
        assert_relative_eq!(d.cdf(0.5).unwrap(), 0.46041657583943446, max_relative = 1e-14);
        assert_relative_eq!(d.cdf(8.0).unwrap(), 0.834750659461432, max_relative = 1e-14);
    }

    #[test]
    fn test_cauchy_sample_median() {
        let d = Cauchy { location: 10.0, scale: 2.0 };
        let mut source = RandomSource::seeded(77);
        let mut xs = d.sample(&mut source, 100_001).unwrap();
        xs.sort_by(f64::total_cmp);
        let median = xs[50_000];
        assert!((median - 10.0).abs() < 0.05, "median {median}");
    }
}
