//! Empirical summaries of drawn samples.
//!
//! Used to check a sampler against its distribution's analytical moments
//! and CDF: [`SampleSummary`] accumulates the first four central moments in
//! one pass, and [`ks_statistic`] measures the largest gap between the
//! empirical and theoretical CDFs.

/// Single-pass accumulator of sample moments.
///
/// Updates follow Welford's recurrence extended to the third and fourth
/// central moments, which avoids the cancellation of the naive
/// `Σx² − n·x̄²` formula on long streams of draws.
///
/// Reference: Pébay (2008), "Formulas for Robust, One-Pass Parallel
/// Computation of Covariances and Arbitrary-Order Statistical Moments",
/// SAND2008-6212.
///
/// # Examples
/// ```
/// use u_distributions::summary::SampleSummary;
/// let s: SampleSummary = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
/// assert_eq!(s.mean(), Some(5.0));
/// assert!((s.population_variance().unwrap() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSummary {
    count: u64,
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl SampleSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation.
    pub fn push(&mut self, value: f64) {
        let n_prev = self.count as f64;
        self.count += 1;
        if self.count == 1 {
            self.mean = value;
            return;
        }

        let n = self.count as f64;
        let delta = value - self.mean;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term = delta * delta_n * n_prev;

        // Higher moments first: each update reads the previous lower ones.
        self.m4 += term * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term;
        self.mean += delta_n;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Unbiased sample variance (n − 1 denominator).
    pub fn variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Population variance (n denominator).
    pub fn population_variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }

    /// Moment skewness `g₁ = √n·M₃ / M₂^{3/2}`.
    ///
    /// `None` with fewer than three observations or zero spread.
    pub fn skewness(&self) -> Option<f64> {
        if self.count < 3 || self.m2 == 0.0 {
            return None;
        }
        let n = self.count as f64;
        Some(n.sqrt() * self.m3 / self.m2.powf(1.5))
    }

    /// Moment excess kurtosis `g₂ = n·M₄ / M₂² − 3`, comparable with
    /// [`Distribution::kurtosis`](crate::distributions::Distribution::kurtosis).
    pub fn excess_kurtosis(&self) -> Option<f64> {
        if self.count < 4 || self.m2 == 0.0 {
            return None;
        }
        let n = self.count as f64;
        Some(n * self.m4 / (self.m2 * self.m2) - 3.0)
    }

    /// Combines a summary built elsewhere, e.g. on another thread.
    ///
    /// Uses the pairwise update of Chan, Golub & LeVeque (1979) with
    /// Pébay's third- and fourth-moment terms.
    pub fn merge(&mut self, other: &SampleSummary) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }

        let na = self.count as f64;
        let nb = other.count as f64;
        let n = na + nb;
        let delta = other.mean - self.mean;
        let delta2 = delta * delta;

        let m2 = self.m2 + other.m2 + delta2 * na * nb / n;
        let m3 = self.m3
            + other.m3
            + delta * delta2 * na * nb * (na - nb) / (n * n)
            + 3.0 * delta * (na * other.m2 - nb * self.m2) / n;
        let m4 = self.m4
            + other.m4
            + delta2 * delta2 * na * nb * (na * na - na * nb + nb * nb) / (n * n * n)
            + 6.0 * delta2 * (na * na * other.m2 + nb * nb * self.m2) / (n * n)
            + 4.0 * delta * (na * other.m3 - nb * self.m3) / n;

        self.mean += delta * nb / n;
        self.count += other.count;
        self.m2 = m2;
        self.m3 = m3;
        self.m4 = m4;
    }
}

impl Extend<f64> for SampleSummary {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

impl FromIterator<f64> for SampleSummary {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut summary = SampleSummary::new();
        summary.extend(iter);
        summary
    }
}

/// One-sample Kolmogorov–Smirnov statistic `D = sup |Fₙ(x) − F(x)|`.
///
/// `cdf` is the hypothesized continuous distribution function. NaN samples
/// are ignored. Returns `None` when no finite samples remain.
///
/// # Examples
/// ```
/// use u_distributions::summary::ks_statistic;
/// let d = ks_statistic(&[0.1, 0.3, 0.5, 0.7, 0.9], |x| x.clamp(0.0, 1.0)).unwrap();
/// assert!((d - 0.1).abs() < 1e-12);
/// ```
pub fn ks_statistic<F: Fn(f64) -> f64>(samples: &[f64], cdf: F) -> Option<f64> {
    let mut sorted: Vec<f64> = samples.iter().copied().filter(|x| !x.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let d = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            let above = (i + 1) as f64 / n - f;
            let below = f - i as f64 / n;
            above.max(below)
        })
        .fold(0.0_f64, f64::max);
    Some(d)
}

/// Asymptotic critical value of the Kolmogorov–Smirnov statistic at
/// significance `alpha` for `n` observations: `√(−½ ln(α/2)) / √n`.
pub fn ks_critical_value(n: usize, alpha: f64) -> f64 {
    (-0.5 * (alpha / 2.0).ln()).sqrt() / (n as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary_empty() {
        let s = SampleSummary::new();
        assert_eq!(s.count(), 0);
        assert_eq!(s.mean(), None);
        assert_eq!(s.variance(), None);
        assert_eq!(s.skewness(), None);
    }

    #[test]
    fn test_summary_known_values() {
        let s: SampleSummary = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
        assert_eq!(s.count(), 8);
        assert_relative_eq!(s.variance().unwrap(), 32.0 / 7.0, epsilon = 1e-12);
        // Central moments: m3/n = 5.25, m2/n = 4  →  g1 = 5.25 / 8
        assert_relative_eq!(s.skewness().unwrap(), 0.65625, epsilon = 1e-12);
        // m4/n = 44.5  →  g2 = 44.5 / 16 − 3
        assert_relative_eq!(s.excess_kurtosis().unwrap(), -0.21875, epsilon = 1e-12);
    }

    #[test]
    fn test_summary_constant_data() {
        let s: SampleSummary = std::iter::repeat(3.5).take(10).collect();
        assert_eq!(s.mean(), Some(3.5));
        assert_eq!(s.variance(), Some(0.0));
        assert_eq!(s.skewness(), None);
        assert_eq!(s.excess_kurtosis(), None);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let data: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64 * 0.25 - 3.0).collect();
        let whole: SampleSummary = data.iter().copied().collect();
        let mut left: SampleSummary = data[..73].iter().copied().collect();
        let right: SampleSummary = data[73..].iter().copied().collect();
        left.merge(&right);

        assert_eq!(left.count(), whole.count());
        assert_relative_eq!(left.mean().unwrap(), whole.mean().unwrap(), epsilon = 1e-12);
        assert_relative_eq!(left.variance().unwrap(), whole.variance().unwrap(), max_relative = 1e-12);
        assert_relative_eq!(left.skewness().unwrap(), whole.skewness().unwrap(), epsilon = 1e-10);
        assert_relative_eq!(
            left.excess_kurtosis().unwrap(),
            whole.excess_kurtosis().unwrap(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_merge_with_empty() {
        let mut a = SampleSummary::new();
        let b: SampleSummary = [1.0, 2.0, 3.0].into_iter().collect();
        a.merge(&b);
        assert_eq!(a, b);
        a.merge(&SampleSummary::new());
        assert_eq!(a, b);
    }

    #[test]
    fn test_ks_statistic_perfect_grid() {
        // Midpoints of n equal cells give D = 1/(2n).
        let n = 50;
        let xs: Vec<f64> = (0..n).map(|i| (i as f64 + 0.5) / n as f64).collect();
        let d = ks_statistic(&xs, |x| x).unwrap();
        assert_relative_eq!(d, 0.5 / n as f64, epsilon = 1e-12);
    }

    #[test]
    fn test_ks_statistic_detects_shift() {
        let xs: Vec<f64> = (0..100).map(|i| 0.5 + i as f64 / 200.0).collect();
        let d = ks_statistic(&xs, |x| x.clamp(0.0, 1.0)).unwrap();
        assert!(d >= 0.5, "shifted sample should give D ≥ 0.5, got {d}");
    }

    #[test]
    fn test_ks_statistic_empty() {
        assert_eq!(ks_statistic(&[], |x| x), None);
        assert_eq!(ks_statistic(&[f64::NAN], |x| x), None);
    }

    #[test]
    fn test_ks_critical_value() {
        // c(0.05) ≈ 1.358
        assert!((ks_critical_value(1, 0.05) - 1.3581).abs() < 1e-3);
        assert!((ks_critical_value(100, 0.05) - 0.13581).abs() < 1e-4);
    }
}
