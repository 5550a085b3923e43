//! Seedable random source used for tile placement.
//!
//! Each engine owns its own `RandomSource`, so independent episodes never
//! share generator state and a seeded episode replays bit-for-bit.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform random generator backing tile spawns.
///
/// ```
/// use game_2048::RandomSource;
/// let mut a = RandomSource::seeded(7);
/// let mut b = RandomSource::seeded(7);
/// assert_eq!(a.choose_index(16), b.choose_index(16));
/// assert_eq!(a.uniform_float(), b.uniform_float());
/// ```
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Deterministic generator for the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Non-reproducible generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// `Some(seed)` is deterministic (0 included); `None` falls back to entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }

    /// Reseed in place; subsequent draws match a fresh `seeded(seed)`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Float in `[0, 1)`.
    #[inline]
    pub fn uniform_float(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Index in `[0, count)`. `count` must be non-zero.
    #[inline]
    pub fn choose_index(&mut self, count: usize) -> usize {
        debug_assert!(count > 0, "choose_index needs a non-empty range");
        self.rng.gen_range(0..count)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
