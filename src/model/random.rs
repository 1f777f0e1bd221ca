//! Randomness used by the shop
//!
//! Three things in the simulation are random:
//! - which part of an arriving car is broken
//! - how many spare parts storage starts with
//! - what each kind of part costs
//!
//! All of them go through `RandomSource` so tests can replace the dice
//! with a fixed script.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform value in `[low, high)`. Callers guarantee `low < high`.
    fn next_in_range(&mut self, low: u32, high: u32) -> u32;

    /// Uniform index in `[0, len)`. Callers guarantee `len > 0`.
    fn next_index(&mut self, len: usize) -> usize {
        self.next_in_range(0, len as u32) as usize
    }
}

/// The production random source, backed by `StdRng`
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Reproducible sequence for a given seed
    pub fn from_seed(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fresh sequence seeded from the operating system
    pub fn from_entropy() -> Self {
        SeededRandom {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => SeededRandom::from_seed(seed),
            None => SeededRandom::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_sequence() {
        let mut a = SeededRandom::from_seed(42);
        let mut b = SeededRandom::from_seed(42);
        let first: Vec<u32> = (0..20).map(|_| a.next_in_range(0, 1000)).collect();
        let second: Vec<u32> = (0..20).map(|_| b.next_in_range(0, 1000)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn values_stay_in_range() {
        let mut random = SeededRandom::from_seed(7);
        for _ in 0..500 {
            let value = random.next_in_range(200, 1000);
            assert!((200..1000).contains(&value));
            assert!(random.next_index(7) < 7);
        }
    }
}
