//! Tunable limits for iterative evaluators and rejection samplers.
//!
//! Both structs are plain serializable records with sensible defaults, so a
//! host application can embed them in whatever configuration format it
//! already uses.

use serde::{Deserialize, Serialize};

/// Convergence limits for the special-function evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericConfig {
    /// Maximum number of terms summed by the incomplete-gamma series.
    pub gamma_series_max_terms: usize,
    /// Relative size of the latest series term below which the sum is final.
    pub gamma_series_epsilon: f64,
    /// Maximum number of Lentz iterations for the continued fractions.
    pub continued_fraction_max_iterations: usize,
    /// Convergence tolerance on successive continued-fraction convergents.
    pub continued_fraction_epsilon: f64,
    /// Both incomplete-gamma evaluators need `O(√s)` steps near `z ≈ s`.
    /// Their cap is raised to at least this many steps per unit of `√s`.
    pub gamma_iterations_per_sqrt_shape: f64,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            gamma_series_max_terms: 10_000,
            gamma_series_epsilon: 1e-14,
            continued_fraction_max_iterations: 10_000,
            continued_fraction_epsilon: f64::EPSILON,
            gamma_iterations_per_sqrt_shape: 32.0,
        }
    }
}

/// Limits and strategy thresholds for the random-variate generators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Maximum candidates a single rejection draw may reject before giving
    /// up with [`DistError::RejectionLimit`](crate::DistError::RejectionLimit).
    /// `None` loops until acceptance.
    pub max_attempts: Option<u64>,
    /// Binomial uses inversion while `n·min(p, 1−p)` is below this value.
    /// Values under 10 act as 10, where the BTPE envelope is well formed.
    pub binomial_inversion_mean: f64,
    /// Largest index the Binomial inversion walk visits before restarting.
    pub binomial_inversion_cutoff: u64,
    /// Poisson peels off Gamma blocks while `μ` exceeds this value.
    pub poisson_decomposition_threshold: f64,
}

impl NumericConfig {
    /// Effective step cap for an incomplete-gamma evaluator at shape `s`.
    pub(crate) fn gamma_cap(&self, configured: usize, s: f64) -> usize {
        let scaled = (self.gamma_iterations_per_sqrt_shape * s.sqrt()).ceil();
        if scaled.is_finite() && scaled > configured as f64 {
            scaled as usize
        } else {
            configured
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_attempts: Some(10_000_000),
            binomial_inversion_mean: 14.0,
            binomial_inversion_cutoff: 110,
            poisson_decomposition_threshold: 10.0,
        }
    }
}

impl SamplerConfig {
    /// A configuration without an attempt cap.
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            ..Self::default()
        }
    }
}
