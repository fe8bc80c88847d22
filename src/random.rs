//! Entropy source for every sampler in the crate.
//!
//! A [`RandomSource`] bundles a uniform generator, the Box–Muller
//! one-value lookahead for standard-normal deviates, and the
//! [`SamplerConfig`] limits the rejection samplers consult. It is passed by
//! `&mut` into every sampling call. There is no global generator, so
//! unrelated distributions never share hidden state.
//!
//! # Concurrency
//!
//! A source is `Send` but must be owned by one sampling session at a time.
//! For parallel batches give each thread its own source via
//! [`RandomSource::fork`]. For a single reproducible stream shared between
//! threads, put one source behind a `Mutex`.
//!
//! # Reproducibility
//!
//! [`RandomSource::seeded`] wraps `SmallRng` (Xoshiro256++), which is
//! deterministic for a given seed on the same platform. Bit-identical output
//! across platforms is not guaranteed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::SamplerConfig;

/// Uniform generator plus a cached standard-normal deviate.
///
/// # Examples
/// ```
/// use u_distributions::random::RandomSource;
/// let mut source = RandomSource::seeded(42);
/// let u = source.uniform();
/// assert!((0.0..1.0).contains(&u));
/// let z = source.standard_normal();
/// assert!(z.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct RandomSource<R = SmallRng> {
    rng: R,
    spare_normal: Option<f64>,
    config: SamplerConfig,
}

impl RandomSource<SmallRng> {
    /// Creates a deterministic source from a 64-bit seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Creates a source seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource<R> {
    /// Wraps an arbitrary uniform generator with the default sampler limits.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            spare_normal: None,
            config: SamplerConfig::default(),
        }
    }

    /// Replaces the sampler limits.
    pub fn with_config(mut self, config: SamplerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Uniform deviate on `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform deviate on the open interval `(0, 1)`.
    pub fn uniform_open(&mut self) -> f64 {
        loop {
            let u = self.uniform();
            if u > 0.0 {
                return u;
            }
        }
    }

    /// Standard-normal deviate via the Box–Muller transform.
    ///
    /// Each transform turns two uniforms into two independent deviates:
    /// ```text
    /// b = √(−2 ln(1 − u₁)),  a = 2π u₂,  z₁ = b cos a,  z₂ = b sin a
    /// ```
    /// `z₁` is returned and `z₂` is held for the next call, so consecutive
    /// calls alternate between running the transform and draining the
    /// cache.
    ///
    /// Reference: Box & Muller (1958), "A Note on the Generation of Random
    /// Normal Deviates", *Ann. Math. Statist.* 29(2).
    pub fn standard_normal(&mut self) -> f64 {
        if let Some(z) = self.spare_normal.take() {
            return z;
        }
        let u1 = self.uniform();
        let u2 = self.uniform();
        let radius = (-2.0 * (1.0 - u1).ln()).sqrt();
        let angle = std::f64::consts::TAU * u2;
        self.spare_normal = Some(radius * angle.sin());
        radius * angle.cos()
    }

    /// Normal deviate with mean `mu` and standard deviation `sigma`.
    pub fn normal(&mut self, mu: f64, sigma: f64) -> f64 {
        mu + sigma * self.standard_normal()
    }

    /// Whether the next [`standard_normal`](Self::standard_normal) call
    /// will be served from the cache.
    pub fn has_spare_normal(&self) -> bool {
        self.spare_normal.is_some()
    }

    /// Drops a cached normal deviate, if any.
    pub fn discard_spare_normal(&mut self) {
        self.spare_normal = None;
    }

    /// Derives an independent child source seeded from this one.
    ///
    /// The child inherits the sampler limits but not the normal cache.
    pub fn fork(&mut self) -> RandomSource<SmallRng> {
        RandomSource {
            rng: SmallRng::from_rng(&mut self.rng),
            spare_normal: None,
            config: self.config,
        }
    }
}
