//! Injectable randomness.
//!
//! The engine makes exactly two random draws per invocation (placeholder
//! rhythm score, expiry length). Both go through [`RandomSource`] so hosts
//! pick the generator and tests can pin the outcome.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform real in [low, high].
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in [low, high].
    fn uniform_inclusive(&mut self, low: u32, high: u32) -> u32;
}

/// Adapter from any `rand` generator.
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    /// Thread-local generator, for production hosts.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn uniform_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Returns fixed values, clamped into whatever range is requested.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource {
    pub real: f64,
    pub integer: u32,
}

impl FixedSource {
    pub fn new(real: f64, integer: u32) -> Self {
        Self { real, integer }
    }
}

impl RandomSource for FixedSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.real.clamp(low, high.max(low))
    }

    fn uniform_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.integer.clamp(low, high.max(low))
    }
}
