//! Deterministic session RNG.
//!
//! Wraps `ChaCha8Rng` so that identical seeds replay identical sessions on
//! every platform. All simulation randomness goes through [`SimRng`].

use crate::constants::DEFAULT_SEED;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniformly pick one element of `items`, or `None` if it is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.0.gen_range(0..items.len());
        items.get(idx)
    }
}
