//! Special mathematical functions.
//!
//! Numerical primitives shared by the distribution families: the gamma and
//! beta functions, binomial coefficients, the regularized incomplete gamma
//! and beta functions, and the error function built on top of them.
//!
//! Closed-form helpers return a plain `f64` and use NaN as their
//! out-of-domain value. Iterative evaluators return
//! `Result<f64, NumericError>`: a series or continued fraction that runs out
//! of iterations is reported, never truncated into a plausible-looking
//! number. Each iterative evaluator has a `*_with` form that takes an
//! explicit [`NumericConfig`].

use std::f64::consts::{PI, SQRT_2};

use crate::config::NumericConfig;
use crate::error::NumericError;

/// 1/√(2π) ≈ 0.3989422804014327
const FRAC_1_SQRT_2PI: f64 = 0.3989422804014326779399460599343818684758586311649;

/// Floor applied to Lentz denominators so they never reach zero.
const TINY: f64 = f64::MIN_POSITIVE / f64::EPSILON;

/// Largest n for which n! is finite in `f64`.
const MAX_FACTORIAL: u32 = 170;

/// Beyond this many factors the binomial coefficient switches to log-gamma.
const INCREMENTAL_BINOMIAL_LIMIT: f64 = 1000.0;

// ============================================================================
// Gamma Function
// ============================================================================

/// Lanczos approximation of ln |Γ(x)|.
///
/// Uses the reflection formula `Γ(x)Γ(1−x) = π / sin(πx)` for `x < 0.5`.
/// Non-positive integers are poles and return `+∞`.
///
/// Reference: Lanczos (1964), "A Precision Approximation of the Gamma
/// Function", *SIAM Journal on Numerical Analysis* 1(1).
///
/// # Accuracy
/// Relative error around 1e-15 for x > 0.
///
/// # Examples
/// ```
/// use u_distributions::special::ln_gamma;
/// // Γ(5) = 24
/// assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-12);
/// ```
pub fn ln_gamma(x: f64) -> f64 {
    #[allow(clippy::excessive_precision)]
    const COEFFICIENTS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    const G: f64 = 7.0;

    if x.is_nan() {
        return f64::NAN;
    }
    if x == f64::INFINITY || (x <= 0.0 && x == x.floor()) {
        return f64::INFINITY;
    }
    if x < 0.5 {
        return (PI / (PI * x).sin()).abs().ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut sum = COEFFICIENTS[0];
    for (i, &c) in COEFFICIENTS[1..].iter().enumerate() {
        sum += c / (x + i as f64 + 1.0);
    }

    let t = x + G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + sum.ln()
}

/// Gamma function Γ(x).
///
/// Positive integers up to 171 take an exact factorial path, so
/// `gamma(5.0) == 24.0` holds bit-for-bit. Other arguments go through
/// [`ln_gamma`], with the reflection formula restoring the sign for
/// negative non-integers.
///
/// # Examples
/// ```
/// use u_distributions::special::gamma;
/// assert_eq!(gamma(5.0), 24.0);
/// assert!((gamma(0.5) - std::f64::consts::PI.sqrt()).abs() < 1e-12);
/// ```
pub fn gamma(x: f64) -> f64 {
    if let Some(n) = as_small_positive_integer(x) {
        return factorial(n - 1);
    }
    if x <= 0.0 && x == x.floor() {
        return f64::NAN;
    }
    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    ln_gamma(x).exp()
}

/// ln(k!) for a non-negative integral `k`.
///
/// Exact products are used up to 170!, the log-gamma form beyond.
pub fn ln_factorial(k: f64) -> f64 {
    if k < 0.0 || k != k.floor() {
        return f64::NAN;
    }
    if k <= MAX_FACTORIAL as f64 {
        factorial(k as u32).ln()
    } else {
        ln_gamma(k + 1.0)
    }
}

fn factorial(n: u32) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// Returns `Some(n)` when `x` is an integer in `1..=171`.
fn as_small_positive_integer(x: f64) -> Option<u32> {
    if x >= 1.0 && x <= (MAX_FACTORIAL + 1) as f64 && x == x.floor() {
        Some(x as u32)
    } else {
        None
    }
}

// ============================================================================
// Beta Function and Binomial Coefficient
// ============================================================================

/// Log of the Beta function: `ln B(a, b) = ln Γ(a) + ln Γ(b) − ln Γ(a+b)`.
///
/// # Examples
/// ```
/// use u_distributions::special::ln_beta;
/// assert!(ln_beta(1.0, 1.0).abs() < 1e-12);
/// ```
pub fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Multivariate Beta function `B(a₁, …, aₖ) = ∏Γ(aᵢ) / Γ(Σaᵢ)`.
///
/// Evaluated as `exp(Σ ln Γ(aᵢ) − ln Γ(Σaᵢ))` so that large arguments do
/// not overflow. When every argument is a positive integer and the total is
/// at most 171 the ratio of exact factorials is used instead.
///
/// # Returns
/// NaN for an empty slice or any argument that is not strictly positive.
///
/// # Examples
/// ```
/// use u_distributions::special::beta_function;
/// assert_eq!(beta_function(&[4.0, 2.0]), 0.05);
/// assert!((beta_function(&[0.5, 0.5]) - std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn beta_function(args: &[f64]) -> f64 {
    if args.is_empty() || args.iter().any(|&a| a.is_nan() || a <= 0.0) {
        return f64::NAN;
    }
    let total: f64 = args.iter().sum();

    if let Some(total_n) = as_small_positive_integer(total) {
        let exact: Option<Vec<u32>> = args.iter().map(|&a| as_small_positive_integer(a)).collect();
        if let Some(parts) = exact {
            let numerator: f64 = parts.iter().map(|&n| factorial(n - 1)).product();
            return numerator / factorial(total_n - 1);
        }
    }

    let ln_numerator: f64 = args.iter().map(|&a| ln_gamma(a)).sum();
    (ln_numerator - ln_gamma(total)).exp()
}

/// Generalized binomial coefficient `C(n, k)`.
///
/// For integral `k` the product `∏_{d=1..k} (n−d+1)/d` is accumulated one
/// factor at a time, multiplying before dividing. Every intermediate value is
/// then itself a binomial coefficient, so integer results below 2⁵³ are
/// exact. `n` may be any real number, which the negative binomial with a
/// real-valued `failures` parameter relies on. Non-integral `k`, or `k`
/// beyond a thousand factors, uses `Γ(n+1) / (Γ(k+1) Γ(n−k+1))`.
///
/// # Returns
/// NaN if `k > n`, `k < 0` or either argument is NaN.
///
/// # Examples
/// ```
/// use u_distributions::special::binomial_coefficient;
/// assert_eq!(binomial_coefficient(10.0, 2.0), 45.0);
/// assert_eq!(binomial_coefficient(9.0, 5.0), 126.0);
/// assert!(binomial_coefficient(3.0, 4.0).is_nan());
/// ```
pub fn binomial_coefficient(n: f64, k: f64) -> f64 {
    if n.is_nan() || k.is_nan() || k < 0.0 || k > n {
        return f64::NAN;
    }

    if k == k.floor() {
        // C(n, k) = C(n, n−k) shortens the loop for integral n.
        let k = if n == n.floor() && n - k < k { n - k } else { k };
        if k <= INCREMENTAL_BINOMIAL_LIMIT {
            let mut c = 1.0;
            let mut d = 1.0;
            while d <= k {
                c = c * (n - d + 1.0) / d;
                d += 1.0;
            }
            return c;
        }
    }

    (ln_gamma(n + 1.0) - ln_gamma(k + 1.0) - ln_gamma(n - k + 1.0)).exp()
}

// ============================================================================
// Regularized Incomplete Gamma Function
// ============================================================================

/// Regularized lower incomplete gamma function `P(s, z) = γ(s, z) / Γ(s)`.
///
/// This is the CDF of Gamma(s, 1) at `z`, and through it the Gamma,
/// chi-squared and (upper tail) Poisson CDFs.
///
/// # Algorithm
/// For `z < s + 1` the series
/// ```text
/// P(s, z) = exp(s·ln z − z − ln Γ(s+1)) · Σ_{k≥0} z^k / ((s+1)(s+2)…(s+k))
/// ```
/// is summed until the latest term is below `gamma_series_epsilon` relative
/// to the sum. Otherwise `1 − Q(s, z)` is taken from the Lentz continued
/// fraction, which converges quickly in that region.
///
/// Reference: Press et al. (2007), *Numerical Recipes*, 3rd ed., §6.2.
///
/// # Errors
/// - [`NumericError::Domain`] unless `s > 0` is finite and `z ≥ 0`.
/// - [`NumericError::NonConvergence`] if the active evaluator exhausts its cap.
///
/// # Examples
/// ```
/// use u_distributions::special::regularized_lower_gamma;
/// // P(1, z) = 1 − exp(−z)
/// let p = regularized_lower_gamma(1.0, 2.0).unwrap();
/// assert!((p - 0.8646647167633873).abs() < 1e-12);
/// ```
pub fn regularized_lower_gamma(s: f64, z: f64) -> Result<f64, NumericError> {
    regularized_lower_gamma_with(s, z, &NumericConfig::default())
}

/// [`regularized_lower_gamma`] with explicit convergence limits.
pub fn regularized_lower_gamma_with(
    s: f64,
    z: f64,
    config: &NumericConfig,
) -> Result<f64, NumericError> {
    check_gamma_domain("regularized lower gamma", s, z)?;
    if z == 0.0 {
        return Ok(0.0);
    }
    if z == f64::INFINITY {
        return Ok(1.0);
    }
    if z < s + 1.0 {
        lower_gamma_series(s, z, config)
    } else {
        Ok(1.0 - upper_gamma_fraction(s, z, config)?)
    }
}

/// Regularized upper incomplete gamma function `Q(s, z) = 1 − P(s, z)`.
///
/// Computed directly from the continued fraction when `z ≥ s + 1`, which
/// keeps full relative precision in the far tail where `1 − P` would cancel.
///
/// # Examples
/// ```
/// use u_distributions::special::regularized_upper_gamma;
/// let q = regularized_upper_gamma(1.0, 30.0).unwrap();
/// assert!((q / (-30.0_f64).exp() - 1.0).abs() < 1e-12);
/// ```
pub fn regularized_upper_gamma(s: f64, z: f64) -> Result<f64, NumericError> {
    regularized_upper_gamma_with(s, z, &NumericConfig::default())
}

/// [`regularized_upper_gamma`] with explicit convergence limits.
pub fn regularized_upper_gamma_with(
    s: f64,
    z: f64,
    config: &NumericConfig,
) -> Result<f64, NumericError> {
    check_gamma_domain("regularized upper gamma", s, z)?;
    if z == 0.0 {
        return Ok(1.0);
    }
    if z == f64::INFINITY {
        return Ok(0.0);
    }
    if z < s + 1.0 {
        Ok(1.0 - lower_gamma_series(s, z, config)?)
    } else {
        upper_gamma_fraction(s, z, config)
    }
}

fn check_gamma_domain(routine: &'static str, s: f64, z: f64) -> Result<(), NumericError> {
    if !(s > 0.0 && s.is_finite()) {
        return Err(NumericError::Domain {
            routine,
            detail: format!("shape s must be finite and > 0, got {s}"),
        });
    }
    if !(z >= 0.0) {
        return Err(NumericError::Domain {
            routine,
            detail: format!("z must be >= 0, got {z}"),
        });
    }
    Ok(())
}

/// Series for `P(s, z)`, valid for `z < s + 1`.
fn lower_gamma_series(s: f64, z: f64, config: &NumericConfig) -> Result<f64, NumericError> {
    let max_terms = config.gamma_cap(config.gamma_series_max_terms, s);
    let mut term = 1.0;
    let mut sum = 1.0;
    let mut denom = s;
    for n in 1..=max_terms {
        denom += 1.0;
        term *= z / denom;
        sum += term;
        if term < sum * config.gamma_series_epsilon {
            log::trace!("incomplete gamma series converged after {n} terms (s={s}, z={z})");
            return Ok((s * z.ln() - z - ln_gamma(s + 1.0) + sum.ln()).exp());
        }
    }
    log::warn!("incomplete gamma series did not converge in {max_terms} terms (s={s}, z={z})");
    Err(NumericError::NonConvergence {
        routine: "incomplete gamma series",
        iterations: max_terms,
    })
}

/// Lentz continued fraction for `Q(s, z)`, valid for `z ≥ s + 1`.
fn upper_gamma_fraction(s: f64, z: f64, config: &NumericConfig) -> Result<f64, NumericError> {
    let max_iterations = config.gamma_cap(config.continued_fraction_max_iterations, s);
    let mut b = z + 1.0 - s;
    let mut c = 1.0 / TINY;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..=max_iterations {
        let i_f = i as f64;
        let an = -i_f * (i_f - s);
        b += 2.0;
        d = an * d + b;
        if d.abs() < TINY {
            d = TINY;
        }
        c = b + an / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() <= config.continued_fraction_epsilon {
            log::trace!("incomplete gamma fraction converged after {i} iterations (s={s}, z={z})");
            return Ok((s * z.ln() - z - ln_gamma(s)).exp() * h);
        }
    }
    log::warn!(
        "incomplete gamma continued fraction did not converge in {max_iterations} iterations (s={s}, z={z})"
    );
    Err(NumericError::NonConvergence {
        routine: "incomplete gamma continued fraction",
        iterations: max_iterations,
    })
}

// ============================================================================
// Regularized Incomplete Beta Function
// ============================================================================

/// Regularized incomplete beta function `I_x(a, b)`.
///
/// # Definition
/// ```text
/// I_x(a, b) = B(x; a, b) / B(a, b),   B(x; a, b) = ∫₀ˣ t^(a−1) (1−t)^(b−1) dt
/// ```
///
/// # Algorithm
/// Returns exactly 0 at `x = 0` and 1 at `x = 1`. Otherwise the modified
/// Lentz continued fraction is evaluated on `(x, a, b)` when
/// `x < (a+1)/(a+b+2)` and on `(1−x, b, a)` otherwise, using
/// `I_x(a, b) = 1 − I_{1−x}(b, a)`. The fraction is scaled by
/// `exp(ln Γ(a+b) − ln Γ(a) − ln Γ(b) + a·ln x + b·ln(1−x))`.
///
/// Reference: Press et al. (2007), *Numerical Recipes*, 3rd ed., §6.4.
///
/// # Errors
/// - [`NumericError::Domain`] unless `a, b > 0` are finite and `x ∈ [0, 1]`.
/// - [`NumericError::NonConvergence`] if the fraction exhausts its cap.
///
/// # Examples
/// ```
/// use u_distributions::special::regularized_incomplete_beta;
/// assert_eq!(regularized_incomplete_beta(0.0, 2.0, 3.0).unwrap(), 0.0);
/// assert_eq!(regularized_incomplete_beta(1.0, 2.0, 3.0).unwrap(), 1.0);
/// let i = regularized_incomplete_beta(0.6, 2.0, 4.0).unwrap();
/// assert!((i - 0.91296).abs() < 1e-9);
/// ```
pub fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> Result<f64, NumericError> {
    regularized_incomplete_beta_with(x, a, b, &NumericConfig::default())
}

/// [`regularized_incomplete_beta`] with explicit convergence limits.
pub fn regularized_incomplete_beta_with(
    x: f64,
    a: f64,
    b: f64,
    config: &NumericConfig,
) -> Result<f64, NumericError> {
    const ROUTINE: &str = "regularized incomplete beta";
    if !(a > 0.0 && a.is_finite() && b > 0.0 && b.is_finite()) {
        return Err(NumericError::Domain {
            routine: ROUTINE,
            detail: format!("a and b must be finite and > 0, got a={a}, b={b}"),
        });
    }
    if !(0.0..=1.0).contains(&x) {
        return Err(NumericError::Domain {
            routine: ROUTINE,
            detail: format!("x must lie in [0, 1], got {x}"),
        });
    }
    if x == 0.0 {
        return Ok(0.0);
    }
    if x == 1.0 {
        return Ok(1.0);
    }

    let ln_prefix =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let prefix = ln_prefix.exp();

    if x < (a + 1.0) / (a + b + 2.0) {
        Ok(prefix * beta_fraction(x, a, b, config)? / a)
    } else {
        Ok(1.0 - prefix * beta_fraction(1.0 - x, b, a, config)? / b)
    }
}

/// Unregularized incomplete beta `B(x; a, b) = I_x(a, b) · B(a, b)`.
///
/// # Examples
/// ```
/// use u_distributions::special::incomplete_beta;
/// let v = incomplete_beta(0.6, 2.0, 4.0).unwrap();
/// assert!((v - 0.045648).abs() < 1e-12);
/// ```
pub fn incomplete_beta(x: f64, a: f64, b: f64) -> Result<f64, NumericError> {
    incomplete_beta_with(x, a, b, &NumericConfig::default())
}

/// [`incomplete_beta`] with explicit convergence limits.
pub fn incomplete_beta_with(
    x: f64,
    a: f64,
    b: f64,
    config: &NumericConfig,
) -> Result<f64, NumericError> {
    Ok(regularized_incomplete_beta_with(x, a, b, config)? * beta_function(&[a, b]))
}

/// Modified Lentz evaluation of the incomplete beta continued fraction.
fn beta_fraction(x: f64, a: f64, b: f64, config: &NumericConfig) -> Result<f64, NumericError> {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < TINY {
        d = TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=config.continued_fraction_max_iterations {
        let m_f = m as f64;
        let m2 = 2.0 * m_f;

        let even = m_f * (b - m_f) * x / ((qam + m2) * (a + m2));
        d = 1.0 + even * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + even / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        h *= d * c;

        let odd = -(a + m_f) * (qab + m_f) * x / ((a + m2) * (qap + m2));
        d = 1.0 + odd * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + odd / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() <= config.continued_fraction_epsilon {
            log::trace!("incomplete beta fraction converged after {m} iterations (x={x}, a={a}, b={b})");
            return Ok(h);
        }
    }

    log::warn!(
        "incomplete beta continued fraction did not converge in {} iterations (x={x}, a={a}, b={b})",
        config.continued_fraction_max_iterations
    );
    Err(NumericError::NonConvergence {
        routine: "incomplete beta continued fraction",
        iterations: config.continued_fraction_max_iterations,
    })
}

// ============================================================================
// Error Function and Standard Normal
// ============================================================================

/// Error function `erf(x) = (2/√π) ∫₀ˣ exp(−t²) dt`.
///
/// Evaluated exactly through the incomplete gamma identity
/// `erf(x) = sign(x) · P(1/2, x²)`; `|x| > 6` saturates to ±1.
///
/// # Examples
/// ```
/// use u_distributions::special::erf;
/// assert_eq!(erf(0.0), 0.0);
/// assert!((erf(1.0) - 0.8427007929497149).abs() < 1e-14);
/// ```
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == 0.0 {
        return x;
    }
    if x.abs() > 6.0 {
        return x.signum();
    }
    let p = regularized_lower_gamma(0.5, x * x).unwrap_or(f64::NAN);
    x.signum() * p
}

/// Complementary error function `erfc(x) = 1 − erf(x)`.
///
/// Uses `erfc(x) = Q(1/2, x²)` for `x ≥ 0`, which keeps relative precision
/// in the upper tail, and `erfc(−x) = 2 − erfc(x)` otherwise.
///
/// # Examples
/// ```
/// use u_distributions::special::erfc;
/// assert_eq!(erfc(0.0), 1.0);
/// assert!((erfc(2.0) - 0.004677734981047266).abs() < 1e-15);
/// ```
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }
    if x == 0.0 {
        return 1.0;
    }
    regularized_upper_gamma(0.5, x * x).unwrap_or(f64::NAN)
}

/// Standard normal CDF `Φ(x) = ½ erfc(−x/√2)`.
///
/// # Examples
/// ```
/// use u_distributions::special::standard_normal_cdf;
/// assert_eq!(standard_normal_cdf(0.0), 0.5);
/// assert!((standard_normal_cdf(1.96) - 0.9750021048517795).abs() < 1e-12);
/// ```
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF `φ(x) = (1/√(2π)) exp(−x²/2)`.
pub fn standard_normal_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}
