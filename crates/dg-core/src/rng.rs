//! Random sources for generation
//!
//! Every stage draws from an injected [`RandomSource`], so a run is fully
//! determined by its source. [`GenRng`] is the seeded default.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform floats in `[0, 1)`
pub trait RandomSource {
    /// Next float in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }

    /// Returns true with probability percent/100
    fn percent(&mut self, percent: u32) -> bool {
        self.next_f64() < percent as f64 / 100.0
    }

    /// Returns true with probability 1/2
    fn coin(&mut self) -> bool {
        self.next_f64() < 0.5
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Shuffle a slice in place (Fisher-Yates)
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

/// Seeded generator random source
///
/// Wraps ChaCha8Rng.
#[derive(Debug, Clone)]
pub struct GenRng {
    rng: ChaCha8Rng,
}

impl GenRng {
    /// Create a new source with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a new source with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Next raw u64, used to derive per-run seeds
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

impl RandomSource for GenRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

impl Default for GenRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;

    /// Replays a fixed list of floats, cycling when exhausted
    pub struct Script {
        values: Vec<f64>,
        next: usize,
    }

    impl Script {
        pub fn new(values: &[f64]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }
    }

    impl RandomSource for Script {
        fn next_f64(&mut self) -> f64 {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Script;
    use super::*;

    #[test]
    fn test_next_f64_range() {
        let mut rng = GenRng::new(42);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_below_bounds() {
        let mut rng = GenRng::new(42);
        for _ in 0..1000 {
            assert!(rng.below(7) < 7);
        }
        assert_eq!(rng.below(0), 0);
        assert_eq!(rng.below(1), 0);
    }

    #[test]
    fn test_below_is_floor_of_scaled_draw() {
        let mut rng = Script::new(&[0.0, 0.34, 0.999]);
        assert_eq!(rng.below(3), 0);
        assert_eq!(rng.below(3), 1);
        assert_eq!(rng.below(3), 2);
    }

    #[test]
    fn test_percent_edges() {
        let mut rng = GenRng::new(7);
        for _ in 0..100 {
            assert!(!rng.percent(0));
            assert!(rng.percent(100));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = GenRng::new(42);
        let mut rng2 = GenRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.below(100), rng2.below(100));
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GenRng::new(3);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut rng, &mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_dyn_source() {
        let mut boxed: Box<dyn RandomSource + Send> = Box::new(GenRng::new(1));
        let mut plain = GenRng::new(1);
        assert_eq!(boxed.below(1000), plain.below(1000));
    }
}
