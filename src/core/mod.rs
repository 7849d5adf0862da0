//! Core deterministic primitives.
//!
//! Randomness and hashing used by the game modules. Given the same seed,
//! everything built on these produces identical boards on any platform.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::{DeterministicRng, RandomSource};
pub use hash::{Digest, StateHasher};
