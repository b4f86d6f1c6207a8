//! Injectable random source used by every sampling helper.
//!
//! There is no process-wide generator: callers own a [`FixtureRng`] (or any
//! other `rand::Rng`) and pass it into each call. Reseeding before a batch of
//! fixture generation is an explicit [`FixtureRng::reseed`].

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngCore, SeedableRng};

use crate::hash::stable_hash_str;

#[derive(Debug, Clone)]
/// Small deterministic RNG used for reproducible fixture generation.
pub struct FixtureRng {
    seed: u64,
    state: u64,
}

impl FixtureRng {
    /// Create a generator from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, state: seed }
    }

    /// Seed this generator was created (or last reseeded) with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.state = seed;
    }

    /// Derive an independent child stream keyed by `label`.
    ///
    /// The child depends only on the parent seed and the label, not on how many
    /// values the parent has produced.
    pub fn fork(&self, label: &str) -> Self {
        Self::new(stable_hash_str(self.seed, label))
    }

    fn advance(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut mixed = self.state;
        mixed = (mixed ^ (mixed >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        mixed = (mixed ^ (mixed >> 27)).wrapping_mul(0x94D049BB133111EB);
        mixed ^ (mixed >> 31)
    }
}

impl RngCore for FixtureRng {
    fn next_u32(&mut self) -> u32 {
        (self.advance() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.advance()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.advance().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for FixtureRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// `choice` / `sample` / `shuffle` / `randint` vocabulary over any `rand::Rng`.
pub trait RandomSource: Rng {
    /// Uniform integer in `low..=high`. Panics if `low > high`.
    fn randint(&mut self, low: usize, high: usize) -> usize {
        self.random_range(low..=high)
    }

    /// Uniform element of `items`, `None` when empty.
    fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(self)
    }

    /// `k` distinct indices from `0..population`, in sampled order.
    fn sample_indices(&mut self, population: usize, k: usize) -> Vec<usize> {
        rand::seq::index::sample(self, population, k.min(population)).into_vec()
    }

    /// Shuffle `items` in place.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(self);
    }
}

impl<R: Rng + ?Sized> RandomSource for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_replays_same_stream() {
        let mut a = FixtureRng::new(11);
        let mut b = FixtureRng::new(11);
        let left: Vec<u64> = (0..16).map(|_| a.next_u64()).collect();
        let right: Vec<u64> = (0..16).map(|_| b.next_u64()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn reseed_restarts_stream() {
        let mut rng = FixtureRng::new(5);
        let first = rng.next_u64();
        rng.next_u64();
        rng.reseed(5);
        assert_eq!(rng.next_u64(), first);
        assert_eq!(rng.seed(), 5);
    }

    #[test]
    fn fork_ignores_parent_position() {
        let mut parent = FixtureRng::new(3);
        let before = parent.fork("tags").next_u64();
        parent.next_u64();
        let after = parent.fork("tags").next_u64();
        assert_eq!(before, after);
        assert_ne!(before, parent.fork("status").next_u64());
    }

    #[test]
    fn randint_is_inclusive() {
        let mut rng = FixtureRng::new(1);
        let seen: HashSet<usize> = (0..200).map(|_| rng.randint(0, 2)).collect();
        assert_eq!(seen, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn sample_indices_are_distinct_and_in_range() {
        let mut rng = FixtureRng::new(9);
        let picked = rng.sample_indices(10, 6);
        assert_eq!(picked.len(), 6);
        let unique: HashSet<usize> = picked.iter().copied().collect();
        assert_eq!(unique.len(), 6);
        assert!(picked.iter().all(|idx| *idx < 10));
        assert_eq!(rng.sample_indices(3, 8).len(), 3);
    }

    #[test]
    fn choice_handles_empty_and_shuffle_keeps_members() {
        let mut rng = FixtureRng::new(2);
        let empty: [u8; 0] = [];
        assert!(rng.choice(&empty).is_none());
        assert!(matches!(rng.choice(&[1, 2, 3]), Some(1..=3)));

        let mut items = vec![1, 2, 3, 4, 5];
        rng.shuffle(&mut items);
        items.sort();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }
}
