//! Seedable random source shared by every generator
//!
//! Wraps a PCG32 stream. A seed is always recorded (even for unseeded runs)
//! so that any session can be replayed.

use rand::distr::uniform::SampleUniform;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Random source for puzzle generation and game selection
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    inner: Pcg32,
}

impl GameRng {
    /// Deterministic generator for the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the thread RNG
    pub fn from_entropy() -> Self {
        let seed = rand::rng().random::<u64>();
        log::debug!("Using entropy seed {}", seed);
        Self::new(seed)
    }

    /// Seed this stream was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent child stream
    pub fn fork(&mut self) -> Self {
        Self::new(self.inner.random::<u64>())
    }

    /// Uniform integer in `[min, max]` (inclusive). Returns `min` when the range is empty.
    pub fn int<T>(&mut self, min: T, max: T) -> T
    where
        T: SampleUniform + PartialOrd + Copy,
    {
        if max <= min {
            return min;
        }
        self.inner.random_range(min..=max)
    }

    /// Uniform index in `[0, len)`; 0 for an empty range
    pub fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.inner.random_range(0..len)
    }

    /// True with probability `p` (clamped to [0, 1])
    pub fn chance(&mut self, p: f64) -> bool {
        self.inner.random_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform float in `[0, 1)`
    pub fn unit(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Shuffle in place (Fisher-Yates)
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Uniformly permuted copy
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.shuffle(&mut out);
        out
    }

    /// Uniform pick, `None` for an empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Pick proportionally to the paired weight. `None` if empty or all weights are zero.
    pub fn pick_weighted<'a, T>(&mut self, items: &'a [(T, u32)]) -> Option<&'a T> {
        items
            .choose_weighted(&mut self.inner, |(_, weight)| *weight)
            .ok()
            .map(|(item, _)| item)
    }

    /// `n` distinct elements (by position) in random order
    pub fn sample<T: Clone>(&mut self, items: &[T], n: usize) -> Vec<T> {
        let mut out = self.shuffled(items);
        out.truncate(n);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        for _ in 0..32 {
            assert_eq!(a.int(0, 1000), b.int(0, 1000));
        }
    }

    #[test]
    fn test_int_inclusive_bounds() {
        let mut rng = GameRng::new(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..500 {
            let v = rng.int(1, 3);
            assert!((1..=3).contains(&v));
            seen_min |= v == 1;
            seen_max |= v == 3;
        }
        assert!(seen_min && seen_max);
        assert_eq!(rng.int(5, 5), 5);
        assert_eq!(rng.int(9, 2), 9);
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let mut rng = GameRng::new(3);
        let items: Vec<u32> = (0..20).collect();
        let mut out = rng.shuffled(&items);
        out.sort_unstable();
        assert_eq!(out, items);
    }

    #[test]
    fn test_sample_without_replacement() {
        let mut rng = GameRng::new(11);
        let items: Vec<u32> = (0..10).collect();
        let mut picked = rng.sample(&items, 4);
        assert_eq!(picked.len(), 4);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 4);
        assert_eq!(rng.sample(&items, 50).len(), 10);
    }

    #[test]
    fn test_pick_weighted_skips_zero_weights() {
        let mut rng = GameRng::new(5);
        let items = [("never", 0), ("always", 3)];
        for _ in 0..50 {
            assert_eq!(rng.pick_weighted(&items), Some(&"always"));
        }
        let empty: [(u8, u32); 0] = [];
        assert_eq!(rng.pick_weighted(&empty), None);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut a = GameRng::new(1);
        let mut b = GameRng::new(1);
        assert_eq!(a.fork().seed(), b.fork().seed());
    }
}
