//! Randomness Sources
//!
//! Board generation never touches a process-wide generator: every play is
//! handed a [`RandomSource`] by the caller. [`DeterministicRng`] is the
//! production source (Xorshift128+), so a play is reproducible from its seed.

use serde::{Serialize, Deserialize};
use sha2::{Sha256, Digest};

/// A sequential source of random draws owned by a single play.
///
/// Implementors only provide [`next_u64`](RandomSource::next_u64); the
/// bounded draws used by the board generator are derived from it.
pub trait RandomSource {
    /// Next raw 64-bit value. Each call advances the source.
    fn next_u64(&mut self) -> u64;

    /// Uniform integer in `[0, bound)`.
    ///
    /// Uses rejection sampling, so every value is exactly equally likely.
    /// Returns 0 when `bound` is 0.
    fn next_below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        // Values below the threshold would over-represent the low residues.
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let value = self.next_u64();
            if value >= threshold {
                return value % bound;
            }
        }
    }

    /// Uniform integer in `[low, high]` (inclusive). Returns `low` if the
    /// range is empty.
    ///
    /// A non-empty range always consumes at least one draw, even `low == high`,
    /// so the draw sequence of a play does not depend on table contents.
    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        if low > high {
            return low;
        }
        match (high - low).checked_add(1) {
            Some(span) => low + self.next_below(span),
            None => self.next_u64(),
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// Deterministic PRNG using Xorshift128+ algorithm.
///
/// # Determinism Guarantee
///
/// Given the same seed, this RNG will produce the exact same sequence
/// of random numbers on any platform (x86, ARM, WASM).
///
/// # Example
///
/// ```
/// use scratch_game::core::rng::{DeterministicRng, RandomSource};
///
/// let mut rng = DeterministicRng::new(12345);
/// let value = rng.next_u64();
/// assert_eq!(value, 6233086606872742541); // Always the same!
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Create an RNG seeded from operating system entropy.
    ///
    /// Returns the seed alongside the generator so the play can be replayed.
    pub fn from_entropy() -> (Self, u64) {
        let seed: u64 = rand::random();
        (Self::new(seed), seed)
    }

    /// Create an RNG from a human-readable seed phrase.
    pub fn from_phrase(phrase: &str) -> Self {
        Self::new(derive_phrase_seed(phrase))
    }

    /// Get current state (for debugging).
    pub fn state(&self) -> [u64; 2] {
        self.state
    }
}

impl RandomSource for DeterministicRng {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a play seed from a phrase.
///
/// The first 8 bytes of `SHA-256(domain || phrase)`, little-endian.
pub fn derive_phrase_seed(phrase: &str) -> u64 {
    let mut hasher = Sha256::new();

    // Domain separator
    hasher.update(b"SCRATCH_GAME_SEED_V1");
    hasher.update(phrase.as_bytes());

    let hash = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&hash[..8]);
    u64::from_le_bytes(seed)
}

// =============================================================================
// TESTS
// =============================================================================
