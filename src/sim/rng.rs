//! Random sources for spawning and effects
//!
//! Gameplay draws go through `RandomSource` so spawn decisions can be
//! replayed from a seed or scripted in tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random source
pub trait RandomSource {
    /// Next value, uniform in [0, 1)
    fn next_unit(&mut self) -> f64;

    /// Uniform value in [min, max)
    fn range(&mut self, min: f64, max: f64) -> f64 {
        crate::lerp(min, max, self.next_unit())
    }

    /// True with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Seeded PCG generator
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Effects RNG for a given gameplay seed (separate stream, never shared)
pub fn effects_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15)
}

/// Cycles through a fixed list of values
///
/// Used to script exact spawn outcomes in replays and tests.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always returns `value`
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
