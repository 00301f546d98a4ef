//! Test utilities and scripted collaborators for Brume development.
//!
//! Provides [`ScriptedRandom`], a [`RandomSource`] whose draws are set up
//! in advance, plus small model and space fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::VecDeque;

use brume_core::Real3;
use brume_propagator::RandomSource;

/// A [`RandomSource`] that replays scripted draws.
///
/// - `uniform` consumes queued unit draws (scaled into `[low, high)`) and
///   falls back to a fixed value once the queue is empty.
/// - `uniform_int` always returns `high`, so shuffles are the identity
///   and the propagator's work list pops the last listed particle first.
/// - `draw_displacement` returns the scripted displacement regardless of
///   `D` and `dt`.
/// - `draw_ipv` returns the scripted vector, or `(sigma, 0, 0)` if none
///   was set.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    uniforms: VecDeque<f64>,
    fallback_uniform: f64,
    displacement: Real3,
    ipv: Option<Real3>,
    uniform_draws: usize,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self {
            uniforms: VecDeque::new(),
            fallback_uniform: 0.5,
            displacement: Real3::ZERO,
            ipv: None,
            uniform_draws: 0,
        }
    }

    /// Queue unit draws in `[0, 1)`, consumed in order.
    pub fn with_uniforms(mut self, draws: impl IntoIterator<Item = f64>) -> Self {
        self.uniforms.extend(draws);
        self
    }

    /// Unit draw returned once the queue is exhausted.
    pub fn with_fallback_uniform(mut self, u: f64) -> Self {
        self.fallback_uniform = u;
        self
    }

    /// Displacement returned by every `draw_displacement` call.
    pub fn with_displacement(mut self, displacement: Real3) -> Self {
        self.displacement = displacement;
        self
    }

    /// Vector returned by every `draw_ipv` call.
    pub fn with_ipv(mut self, ipv: Real3) -> Self {
        self.ipv = Some(ipv);
        self
    }

    /// Queue more unit draws.
    pub fn push_uniform(&mut self, u: f64) {
        self.uniforms.push_back(u);
    }

    /// Total number of `uniform` calls so far.
    pub fn uniform_draws(&self) -> usize {
        self.uniform_draws
    }

    /// Number of queued unit draws not yet consumed.
    pub fn pending_uniforms(&self) -> usize {
        self.uniforms.len()
    }
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.uniform_draws += 1;
        let u = self.uniforms.pop_front().unwrap_or(self.fallback_uniform);
        low + (high - low) * u
    }

    fn uniform_int(&mut self, _low: usize, high: usize) -> usize {
        high
    }

    fn gaussian(&mut self, _sigma: f64) -> f64 {
        0.0
    }

    fn draw_displacement(&mut self, _d: f64, _dt: f64) -> Real3 {
        self.displacement
    }

    fn draw_ipv(&mut self, sigma: f64, _dt: f64, _d: f64) -> Real3 {
        self.ipv.unwrap_or(Real3::new(sigma, 0.0, 0.0))
    }
}
