//! Randomized subset sampling.
//!
//! Draws a uniformly shuffled, non-repeating subset from a pool without
//! touching the pool itself. The random source is always injected so callers
//! (and tests) decide between fresh entropy and a fixed seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shuffle `items` in place with Fisher–Yates.
///
/// For each index `i` from the last down to 1, swaps `items[i]` with a
/// uniformly chosen `items[j]`, `j` in `0..=i`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Draw `min(count, pool.len())` distinct items from `pool` in random order.
///
/// The whole pool is shuffled on a copy and a prefix is returned; `pool` is
/// never mutated.
pub fn sample<T: Clone, R: Rng + ?Sized>(pool: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut copy = pool.to_vec();
    shuffle(&mut copy, rng);
    copy.truncate(count.min(pool.len()));
    copy
}

/// [`sample`] with the thread-local random generator.
pub fn sample_fresh<T: Clone>(pool: &[T], count: usize) -> Vec<T> {
    sample(pool, count, &mut rand::thread_rng())
}

/// A reusable sampler that owns its random state.
///
/// Seeded samplers replay the same sequence of draws, which keeps practice
/// sessions reproducible for a given seed.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: ChaCha8Rng,
}

impl Sampler {
    /// Sampler with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Sampler seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, otherwise from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Draw a subset of `pool`. See [`sample`].
    pub fn draw<T: Clone>(&mut self, pool: &[T], count: usize) -> Vec<T> {
        sample(pool, count, &mut self.rng)
    }

    /// Access the underlying generator.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}
