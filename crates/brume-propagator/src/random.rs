//! Random sources for the propagator.

use brume_core::Real3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::functions3d;

/// The random draws a propagation step needs.
///
/// Implementors supply the three primitive draws; the displacement,
/// inter-particle vector, and shuffle draws have default
/// implementations built on them.
pub trait RandomSource {
    /// Uniform draw in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer draw in `[low, high]` (both inclusive).
    fn uniform_int(&mut self, low: usize, high: usize) -> usize;

    /// Normal draw with mean zero and standard deviation `sigma`.
    fn gaussian(&mut self, sigma: f64) -> f64;

    /// Isotropic Brownian displacement over `dt` for diffusion
    /// coefficient `d`: per-axis standard deviation `sqrt(2 d dt)`.
    fn draw_displacement(&mut self, d: f64, dt: f64) -> Real3 {
        let sigma = (2.0 * d * dt).sqrt();
        Real3::new(
            self.gaussian(sigma),
            self.gaussian(sigma),
            self.gaussian(sigma),
        )
    }

    /// Inter-particle vector for a pair separating from contact distance
    /// `sigma` with combined diffusion coefficient `d` over `dt`.
    fn draw_ipv(&mut self, sigma: f64, dt: f64, d: f64) -> Real3 {
        functions3d::random_ipv_3d(self, sigma, dt, d)
    }

    /// Fisher-Yates shuffle driven by [`uniform_int`](Self::uniform_int).
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.uniform_int(0, i);
            items.swap(i, j);
        }
    }
}

/// Seeded [`RandomSource`] backed by ChaCha8.
///
/// Two sources built from the same seed produce identical draw
/// sequences, which makes whole simulation runs reproducible.
#[derive(Clone, Debug)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
    seed: u64,
}

impl ChaChaSource {
    /// Create a source from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this source was created (or last reseeded) with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the draw sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }
}

impl RandomSource for ChaChaSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.rng.random::<f64>()
    }

    fn uniform_int(&mut self, low: usize, high: usize) -> usize {
        self.rng.random_range(low..=high)
    }

    /// Box-Muller transform. Avoids the `rand_distr` dependency.
    fn gaussian(&mut self, sigma: f64) -> f64 {
        let u1: f64 = self.rng.random::<f64>().max(1e-300); // avoid ln(0)
        let u2: f64 = self.rng.random();
        sigma * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}
