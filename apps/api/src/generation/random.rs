//! Random choice behind a seedable interface, so generation is testable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource: Send {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Picks one item uniformly at random.
pub fn pick<'a>(rng: &mut dyn RandomSource, items: &[&'a str]) -> &'a str {
    debug_assert!(!items.is_empty());
    items[rng.pick_index(items.len()) % items.len()]
}

/// `StdRng`-backed source: seeded for reproducible output, or from entropy.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        SeededRandom {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed sequence of indices, cycling. For tests.
#[cfg(test)]
pub struct FixedSequence {
    indices: Vec<usize>,
    next: usize,
}

#[cfg(test)]
impl FixedSequence {
    pub fn new(indices: Vec<usize>) -> Self {
        FixedSequence { indices, next: 0 }
    }
}

#[cfg(test)]
impl RandomSource for FixedSequence {
    fn pick_index(&mut self, len: usize) -> usize {
        let index = self.indices[self.next % self.indices.len()];
        self.next += 1;
        index % len
    }
}
