//! Random source for the simulated feed.
//!
//! Every generator and reducer takes a `&mut FeedRng` instead of reaching for
//! an ambient generator, so a seeded source reproduces the same series.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable random source.
#[derive(Debug, Clone)]
pub struct FeedRng {
    rng: StdRng,
    seed: Option<u64>,
}

impl FeedRng {
    /// Create a deterministic source from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded when a seed is given, entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Derive an independent source, e.g. one per mounted page.
    pub fn fork(&mut self) -> Self {
        let seed = self.rng.gen::<u64>();
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Seed this source was created from, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Uniform sample in [0, 1).
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform sample in [0, scale).
    pub fn scaled(&mut self, scale: f64) -> f64 {
        self.unit() * scale
    }

    /// Centred step `(u - bias) * scale`, where `u` is uniform in [0, 1).
    pub fn step(&mut self, bias: f64, scale: f64) -> f64 {
        (self.unit() - bias) * scale
    }

    /// Symmetric step in [-scale/2, scale/2).
    pub fn jitter(&mut self, scale: f64) -> f64 {
        self.step(0.5, scale)
    }

    /// Uniform integer in [low, high).
    pub fn int_range(&mut self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}

impl Default for FeedRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
