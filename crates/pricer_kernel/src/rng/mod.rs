//! Random number generation for Monte Carlo simulation.
//!
//! [`PricerRng`] wraps a seeded [`StdRng`] so that identical seeds give
//! identical sequences on every platform supported by `rand`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Seeded pseudo-random generator producing uniforms and standard normals.
///
/// # Example
///
/// ```
/// use pricer_kernel::rng::PricerRng;
///
/// let mut a = PricerRng::from_seed(7);
/// let mut b = PricerRng::from_seed(7);
/// assert_eq!(a.gen_normal(), b.gen_normal());
/// ```
#[derive(Debug, Clone)]
pub struct PricerRng {
    inner: StdRng,
    seed: u64,
}

impl PricerRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Standard normal draw.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        self.inner.sample(StandardNormal)
    }

    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for x in buffer.iter_mut() {
            *x = self.gen_uniform();
        }
    }

    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for x in buffer.iter_mut() {
            *x = self.gen_normal();
        }
    }
}
