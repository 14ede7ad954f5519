//! Deterministic random number generation for resolution attempts.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Independent sequences for deck, crime, luck and effects
//!
//! Every attempt is resolved from a single seed. Each sub-procedure pulls
//! from its own named stream, so adding a roll to crime resolution never
//! shifts which cards the deck deals.
//!
//! ```
//! use destiny_engine::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut deck_stream = rng.for_context("deck");
//! let mut crime_stream = rng.for_context("crime");
//!
//! // Streams are independent of each other...
//! let a = deck_stream.roll(1, 100);
//! let _ = crime_stream.roll(1, 100);
//!
//! // ...and reproducible from the same seed.
//! let mut again = GameRng::new(42).for_context("deck");
//! assert_eq!(a, again.roll(1, 100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Named stream used for shuffling the Destiny Deck.
pub const DECK_STREAM: &str = "deck";
/// Named stream used for witness and jail rolls.
pub const CRIME_STREAM: &str = "crime";
/// Named stream used for the crafting luck term.
pub const LUCK_STREAM: &str = "luck";
/// Named stream used for special-effect selection.
pub const EFFECT_STREAM: &str = "effects";

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a named context.
    ///
    /// The same context always produces the same stream from the same seed.
    /// Uses FNV-1a so stream seeds are stable across Rust releases.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in self.seed.to_le_bytes().iter().chain(context.as_bytes()) {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        Self::new(hash)
    }

    /// Roll an integer uniformly in `min..=max`.
    ///
    /// Returns `min` when the range is empty or inverted.
    pub fn roll(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..=max)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose an index with weighted probability.
    ///
    /// Weights do not need to sum to 1.0.
    /// Returns `None` if weights are empty or all zero.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }

        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f32>() * total;

        for (i, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            threshold -= weight;
            if threshold <= 0.0 {
                return Some(i);
            }
        }

        // Floating point edge case - return last non-zero weight
        weights.iter().rposition(|&w| w > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll(0, 1000), rng2.roll(0, 1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.roll(0, 1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.roll(0, 1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_streams() {
        let rng = GameRng::new(42);
        let mut deck = rng.for_context(DECK_STREAM);
        let mut crime = rng.for_context(CRIME_STREAM);

        let seq1: Vec<_> = (0..10).map(|_| deck.roll(0, 1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| crime.roll(0, 1000)).collect();
        assert_ne!(seq1, seq2);

        let mut deck_again = GameRng::new(42).for_context(DECK_STREAM);
        let seq3: Vec<_> = (0..10).map(|_| deck_again.roll(0, 1000)).collect();
        assert_eq!(seq1, seq3);
    }

    #[test]
    fn test_roll_bounds() {
        let mut rng = GameRng::new(7);
        for _ in 0..500 {
            let v = rng.roll(1, 100);
            assert!((1..=100).contains(&v));
        }
        assert_eq!(rng.roll(5, 5), 5);
        assert_eq!(rng.roll(9, 3), 9);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_choose_weighted() {
        let mut rng = GameRng::new(42);

        let weights = vec![0.0, 100.0, 0.0];
        for _ in 0..10 {
            assert_eq!(rng.choose_weighted(&weights), Some(1));
        }

        assert_eq!(rng.choose_weighted(&[]), None);
        assert_eq!(rng.choose_weighted(&[0.0, 0.0]), None);
    }
}
