//! Random-variate generators for families without a closed-form inverse CDF.
//!
//! Everything here bottoms out in [`RandomSource`]: its uniform draws and
//! its cached Box–Muller normals. The dependency chain is
//!
//! ```text
//! RandomSource ─→ standard_gamma ─→ beta, chi_squared, negative_binomial
//!              │                 └→ poisson ─→ binomial
//!              └→ students_t (normal + exponential, or normal + chi_squared)
//! ```
//!
//! Rejection loops count rejected candidates against
//! [`SamplerConfig::max_attempts`](crate::config::SamplerConfig::max_attempts)
//! and report [`DistError::RejectionLimit`] instead of spinning forever. The
//! cap never changes which candidates are accepted, so it does not bias the
//! output distribution.
//!
//! Each sampler validates its own arguments and returns
//! [`DistError::InvalidParameter`] before consuming any entropy.

use std::f64::consts::PI;

use rand::Rng;

use crate::error::{DistError, ParamError};
use crate::random::RandomSource;
use crate::special::ln_gamma;

// ============================================================================
// Rejection bookkeeping
// ============================================================================

/// Rejected-candidate counter for one draw.
struct Attempts {
    sampler: &'static str,
    limit: Option<u64>,
    rejected: u64,
}

impl Attempts {
    fn new<R: Rng>(sampler: &'static str, source: &RandomSource<R>) -> Self {
        Self {
            sampler,
            limit: source.config().max_attempts,
            rejected: 0,
        }
    }

    fn reject(&mut self) -> Result<(), DistError> {
        self.rejected += 1;
        match self.limit {
            Some(limit) if self.rejected > limit => {
                log::warn!(
                    "{} sampler gave up after {} rejected candidates",
                    self.sampler,
                    self.rejected
                );
                Err(DistError::RejectionLimit {
                    sampler: self.sampler,
                    attempts: self.rejected,
                })
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Gamma
// ============================================================================

/// Draw from Gamma(shape, 1).
///
/// # Algorithm
/// Marsaglia & Tsang (2000) for `shape ≥ 1`: with `d = shape − 1/3` and
/// `c = 1/√(9d)`, draw normals `x` until `v = (1 + c·x)³` is positive, then
/// accept `d·v` when `u < 1 − 0.0331·x⁴` (squeeze) or
/// `ln u < x²/2 + d·(1 − v + ln v)`.
///
/// For `shape < 1` a uniform `u` is drawn first and the result is
/// `Gamma(shape + 1) · u^(1/shape)`.
///
/// Reference: Marsaglia & Tsang (2000), "A Simple Method for Generating
/// Gamma Variables", *ACM TOMS* 26(3).
pub fn standard_gamma<R: Rng>(source: &mut RandomSource<R>, shape: f64) -> Result<f64, DistError> {
    ParamError::positive("gamma", "shape", shape)?;
    if shape < 1.0 {
        let u = source.uniform();
        let boosted = standard_gamma(source, shape + 1.0)?;
        return Ok(boosted * u.powf(1.0 / shape));
    }
    marsaglia_tsang(source, shape)
}

/// Draw from Gamma(shape, rate), i.e. scale `1/rate`.
pub fn gamma<R: Rng>(source: &mut RandomSource<R>, shape: f64, rate: f64) -> Result<f64, DistError> {
    ParamError::positive("gamma", "rate", rate)?;
    Ok(standard_gamma(source, shape)? / rate)
}

/// ln of a Gamma(shape, 1) draw.
///
/// The log form keeps the boost step `u^(1/shape)` from underflowing to zero
/// when `shape` is tiny.
fn ln_standard_gamma<R: Rng>(source: &mut RandomSource<R>, shape: f64) -> Result<f64, DistError> {
    if shape < 1.0 {
        let u = source.uniform_open();
        let boosted = ln_standard_gamma(source, shape + 1.0)?;
        return Ok(boosted + u.ln() / shape);
    }
    Ok(marsaglia_tsang(source, shape)?.ln())
}

fn marsaglia_tsang<R: Rng>(source: &mut RandomSource<R>, shape: f64) -> Result<f64, DistError> {
    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    let mut attempts = Attempts::new("gamma", source);

    loop {
        let (x, t) = loop {
            let x = source.standard_normal();
            let t = c * x;
            if t > -1.0 {
                break (x, t);
            }
            attempts.reject()?;
        };
        let v = (1.0 + t).powi(3);
        let u = source.uniform();
        let x2 = x * x;

        // 1 − v + ln v, expanded in t so it keeps precision when d is huge.
        let log_ratio = 3.0 * (t.ln_1p() - t) - 3.0 * t * t - t * t * t;
        if u < 1.0 - 0.0331 * x2 * x2 || u.ln() < 0.5 * x2 + d * log_ratio {
            return Ok(d * v);
        }
        attempts.reject()?;
    }
}

// ============================================================================
// Beta, Chi-squared, Exponential
// ============================================================================

/// Draw from Beta(alpha, beta) as `g₁ / (g₁ + g₂)` with
/// `g₁ ~ Gamma(alpha, 1)` and `g₂ ~ Gamma(beta, 1)`.
///
/// The ratio is formed from the logs of the two draws, so shapes well
/// below one still produce values in `[0, 1]` rather than `0/0`.
pub fn beta<R: Rng>(source: &mut RandomSource<R>, alpha: f64, beta: f64) -> Result<f64, DistError> {
    ParamError::positive("beta", "alpha", alpha)?;
    ParamError::positive("beta", "beta", beta)?;
    let ln_g1 = ln_standard_gamma(source, alpha)?;
    let ln_g2 = ln_standard_gamma(source, beta)?;
    Ok(1.0 / (1.0 + (ln_g2 - ln_g1).exp()))
}

/// Draw from χ²(degrees) = 2 · Gamma(degrees/2, 1).
pub fn chi_squared<R: Rng>(source: &mut RandomSource<R>, degrees: f64) -> Result<f64, DistError> {
    ParamError::positive("chi_squared", "degrees", degrees)?;
    Ok(2.0 * standard_gamma(source, degrees / 2.0)?)
}

/// Draw from Exponential(rate) by inversion: `−ln(1 − u) / rate`.
pub fn exponential<R: Rng>(source: &mut RandomSource<R>, rate: f64) -> Result<f64, DistError> {
    ParamError::positive("exponential", "rate", rate)?;
    Ok(-(1.0 - source.uniform()).ln() / rate)
}

// ============================================================================
// Binomial
// ============================================================================

/// Smallest `n·p` at which the BTPE regions are well formed.
const BTPE_MIN_MEAN: f64 = 10.0;

/// Draw from Binomial(trials, prob).
///
/// `trials` is a non-negative integer carried as `f64`, so counts beyond
/// `u64` are represented (with `f64` granularity) rather than truncated.
///
/// # Algorithm
/// `prob` is first reflected so that `p ≤ 1/2`; the draw is mapped back
/// with `trials − k` at the end.
///
/// - While `trials·p` is below `binomial_inversion_mean` (never less than
///   10), sequential inversion walks the PMF from `k = 0`. A walk that
///   passes `binomial_inversion_cutoff` is abandoned and restarted.
/// - Otherwise BTPE (triangle, parallelograms and exponential tails around
///   the mode) proposes candidates that are accepted against
///   `ln f(k) − ln f(m)`, evaluated in Stirling form.
///
/// Reference: Kachitvichyanukul & Schmeiser (1988), "Binomial Random
/// Variate Generation", *Comm. ACM* 31(2).
pub fn binomial<R: Rng>(source: &mut RandomSource<R>, trials: f64, prob: f64) -> Result<f64, DistError> {
    ParamError::check(
        trials >= 0.0 && trials.is_finite() && trials == trials.floor(),
        "binomial",
        "trials",
        "must be a finite non-negative integer",
        trials,
    )?;
    ParamError::check((0.0..=1.0).contains(&prob), "binomial", "prob", "must lie in [0, 1]", prob)?;
    if trials == 0.0 || prob == 0.0 {
        return Ok(0.0);
    }
    if prob == 1.0 {
        return Ok(trials);
    }

    let flipped = prob > 0.5;
    let p = if flipped { 1.0 - prob } else { prob };
    let threshold = source.config().binomial_inversion_mean.max(BTPE_MIN_MEAN);
    let k = if trials * p < threshold {
        log::trace!("binomial({trials}, {p}): inversion");
        binomial_inversion(source, trials, p)?
    } else {
        log::trace!("binomial({trials}, {p}): BTPE");
        binomial_btpe(source, trials, p)?
    };
    Ok(if flipped { trials - k } else { k })
}

fn binomial_inversion<R: Rng>(source: &mut RandomSource<R>, n: f64, p: f64) -> Result<f64, DistError> {
    let q = 1.0 - p;
    let odds = p / q;
    let f0 = (n * (-p).ln_1p()).exp();
    let cutoff = (source.config().binomial_inversion_cutoff as f64).min(n);
    let mut attempts = Attempts::new("binomial", source);

    loop {
        let mut u = source.uniform();
        let mut f = f0;
        let mut k = 0.0;
        loop {
            if u < f {
                return Ok(k);
            }
            if k >= cutoff {
                break;
            }
            u -= f;
            f *= odds * (n - k) / (k + 1.0);
            k += 1.0;
        }
        attempts.reject()?;
    }
}

fn binomial_btpe<R: Rng>(source: &mut RandomSource<R>, n: f64, p: f64) -> Result<f64, DistError> {
    let q = 1.0 - p;
    let npq = n * p * q;

    // Mode and the triangular region around it.
    let ffm = n * p + p;
    let m = ffm.floor();
    let xm = m + 0.5;
    let p1 = (2.195 * npq.sqrt() - 4.6 * q).floor() + 0.5;
    let xl = xm - p1;
    let xr = xm + p1;
    let c = 0.134 + 20.5 / (15.3 + m);
    let p2 = p1 * (1.0 + c + c);

    // Exponential tails.
    let al = (ffm - xl) / (ffm - xl * p);
    let lambda_l = al * (1.0 + 0.5 * al);
    let ar = (xr - ffm) / (xr * q);
    let lambda_r = ar * (1.0 + 0.5 * ar);
    let p3 = p2 + c / lambda_l;
    let p4 = p3 + c / lambda_r;

    let odds = p / q;
    let mut attempts = Attempts::new("binomial", source);

    loop {
        let u = source.uniform() * p4;
        let mut v = source.uniform();

        let ix = if u <= p1 {
            // Triangle: accepted outright.
            return Ok((xm - p1 * v + u).floor());
        } else if u <= p2 {
            let x = xl + (u - p1) / c;
            v = v * c + 1.0 - (x - xm).abs() / p1;
            if v > 1.0 || v <= 0.0 {
                attempts.reject()?;
                continue;
            }
            x.floor()
        } else if u <= p3 {
            let ix = (xl + v.ln() / lambda_l).floor();
            if ix < 0.0 {
                attempts.reject()?;
                continue;
            }
            v *= (u - p2) * lambda_l;
            ix
        } else {
            let ix = (xr - v.ln() / lambda_r).floor();
            if ix > n {
                attempts.reject()?;
                continue;
            }
            v *= (u - p3) * lambda_r;
            ix
        };

        if v.ln() <= binomial_log_ratio(n, m, ix, odds) {
            return Ok(ix);
        }
        attempts.reject()?;
    }
}

/// `ln(f(k) / f(m))` for the Binomial(n, p) mass `f`, with `odds = p/q`.
///
/// Differencing `ln k!` directly loses every significant digit once `n`
/// reaches ~1e15. Here each log factorial is split into its Stirling main
/// term and remainder; the main terms collapse to `ln_1p` of small
/// relative differences.
fn binomial_log_ratio(n: f64, m: f64, k: f64, odds: f64) -> f64 {
    let x1 = k + 1.0;
    let f1 = m + 1.0;
    let z = n + 1.0 - m;
    let w = n + 1.0 - k;
    (m + 0.5) * ((m - k) / x1).ln_1p()
        + (n - m + 0.5) * ((k - m) / w).ln_1p()
        + (k - m) * (w * odds / x1).ln()
        + stirling_remainder(f1)
        + stirling_remainder(z)
        - stirling_remainder(x1)
        - stirling_remainder(w)
}

/// `ln Γ(x) − ((x − ½)·ln x − x + ½·ln 2π)` for `x ≥ 1`.
fn stirling_remainder(x: f64) -> f64 {
    if x < 10.0 {
        ln_gamma(x) - ((x - 0.5) * x.ln() - x + 0.5 * (2.0 * PI).ln())
    } else {
        let x2 = x * x;
        (1.0 / 12.0 - (1.0 / 360.0 - (1.0 / 1260.0 - 1.0 / (1680.0 * x2)) / x2) / x2) / x
    }
}

// ============================================================================
// Poisson
// ============================================================================

/// Draw from Poisson(mu).
///
/// The count is carried as `f64`, so any finite `mu` is sampled without
/// integer overflow.
///
/// # Algorithm
/// While `mu` exceeds `poisson_decomposition_threshold`, a block of
/// `m = ⌊7μ/8⌋` arrivals is simulated at once: `x ~ Gamma(m, 1)` is the time
/// of the m-th arrival. If `x ≥ μ` the count is finished with
/// `Binomial(m − 1, μ/x)`; otherwise `m` is added and `μ` shrinks by `x`.
/// The remainder uses the multiplicative method: multiply uniforms until
/// the product drops to `exp(−μ)`.
///
/// Reference: Ahrens & Dieter (1974), "Computer Methods for Sampling from
/// Gamma, Beta, Poisson and Binomial Distributions", *Computing* 12.
pub fn poisson<R: Rng>(source: &mut RandomSource<R>, mu: f64) -> Result<f64, DistError> {
    ParamError::check(mu >= 0.0 && mu.is_finite(), "poisson", "mu", "must be finite and >= 0", mu)?;

    let threshold = source.config().poisson_decomposition_threshold;
    let mut mu = mu;
    let mut count = 0.0;

    while mu > threshold {
        let m = (mu * (7.0 / 8.0)).floor().max(1.0);
        let x = standard_gamma(source, m)?;
        if x >= mu {
            return Ok(count + binomial(source, m - 1.0, mu / x)?);
        }
        count += m;
        mu -= x;
    }

    let limit = (-mu).exp();
    let mut product = 1.0;
    let mut k = 0.0;
    loop {
        product *= source.uniform();
        if product <= limit {
            return Ok(count + k);
        }
        k += 1.0;
    }
}

// ============================================================================
// Negative Binomial
// ============================================================================

/// Draw from NegativeBinomial(failures, prob) via the Gamma–Poisson mixture:
/// `Poisson(g·(1 − p)/p)` with `g ~ Gamma(failures, 1)`.
///
/// A subnormal `prob` can push the Poisson mean past `f64::MAX`; the draw is
/// then `+∞`, matching the mean.
pub fn negative_binomial<R: Rng>(
    source: &mut RandomSource<R>,
    failures: f64,
    prob: f64,
) -> Result<f64, DistError> {
    ParamError::positive("negative_binomial", "failures", failures)?;
    ParamError::probability("negative_binomial", "prob", prob)?;
    if prob == 1.0 {
        return Ok(0.0);
    }
    let g = standard_gamma(source, failures)?;
    let lambda = g * (1.0 - prob) / prob;
    if lambda.is_infinite() {
        return Ok(f64::INFINITY);
    }
    poisson(source, lambda)
}

// ============================================================================
// Student's t
// ============================================================================

/// Draw from Student's t with `degrees` degrees of freedom.
///
/// # Algorithm
/// - `degrees ≤ 2`: `N(0,1) / √(χ²(degrees) / degrees)`.
/// - Otherwise Marsaglia's rejection method: `y₁ ~ N(0,1)`,
///   `y₂ ~ Exponential(rate = degrees/2 − 1)`, `z = y₁² / (degrees − 2)`;
///   accept when `1 − z ≥ 0` and `exp(−y₂ − z) ≤ 1 − z`, returning
///   `y₁ / √((1 − 2/degrees)(1 − z))`.
///
/// Reference: Marsaglia (1980), "Safe Scrambling and Fast Sampling of
/// Student's t", *Mathematics of Computation* 34.
pub fn students_t<R: Rng>(source: &mut RandomSource<R>, degrees: f64) -> Result<f64, DistError> {
    ParamError::positive("students_t", "degrees", degrees)?;
    if degrees <= 2.0 {
        let z = source.standard_normal();
        let chi = chi_squared(source, degrees)?;
        return Ok(z / (chi / degrees).sqrt());
    }

    let rate = degrees / 2.0 - 1.0;
    let mut attempts = Attempts::new("students_t", source);
    loop {
        let y1 = source.standard_normal();
        let y2 = exponential(source, rate)?;
        let z = y1 * y1 / (degrees - 2.0);
        if 1.0 - z >= 0.0 && (-y2 - z).exp() <= 1.0 - z {
            return Ok(y1 / ((1.0 - 2.0 / degrees) * (1.0 - z)).sqrt());
        }
        attempts.reject()?;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn binomial_within_support(seed in any::<u64>(), n in 0_u64..5000, p in 0.0_f64..=1.0) {
            let mut source = RandomSource::seeded(seed);
            let n = n as f64;
            for _ in 0..20 {
                let k = binomial(&mut source, n, p).unwrap();
                prop_assert!((0.0..=n).contains(&k) && k == k.floor(), "Binomial({n}, {p}) drew {k}");
            }
        }

        #[test]
        fn beta_within_unit_interval(seed in any::<u64>(), a in 0.01_f64..50.0, b in 0.01_f64..50.0) {
            let mut source = RandomSource::seeded(seed);
            for _ in 0..20 {
                let x = beta(&mut source, a, b).unwrap();
                prop_assert!((0.0..=1.0).contains(&x), "Beta({a}, {b}) drew {x}");
            }
        }

        #[test]
        fn poisson_is_finite(seed in any::<u64>(), mu in 0.0_f64..1e6) {
            let mut source = RandomSource::seeded(seed);
            let k = poisson(&mut source, mu).unwrap();
            prop_assert!(k < mu + 50.0 * mu.sqrt() + 50.0);
        }
    }
}
