//! Seeded random stream shared by generation and scenery

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic random source. Two streams built from the same seed yield
/// the same sequence.
#[derive(Debug, Clone)]
pub struct RandomStream {
    seed: u64,
    rng: Pcg32,
}

impl RandomStream {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this stream was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform float in [lo, hi)
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        assert!(lo < hi, "empty float range [{lo}, {hi})");
        self.rng.random_range(lo..hi)
    }

    /// Uniform integer in [lo, hi)
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        assert!(lo < hi, "empty integer range [{lo}, {hi})");
        self.rng.random_range(lo..hi)
    }

    /// Uniform integer offset in [-jitter, jitter)
    pub fn give_or_take(&mut self, jitter: i32) -> i32 {
        self.range_i32(-jitter, jitter)
    }

    /// Uniformly chosen element of a non-empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "cannot pick from an empty slice");
        &items[self.rng.random_range(0..items.len())]
    }
}
