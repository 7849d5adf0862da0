//! Board Hashing for Verification
//!
//! Deterministic SHA-256 digests used to:
//! - Identify a generated board in logs
//! - Compare a replayed board against a reported one

use sha2::{Sha256, Digest as _};

/// Hash output type (256 bits / 32 bytes)
pub type Digest = [u8; 32];

/// Deterministic hasher with a domain separator.
///
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for a generated board.
    pub fn for_board() -> Self {
        Self::new(b"SCRATCH_GAME_BOARD_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a length-prefixed string, so `"ab","c"` and `"a","bc"` differ.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.update_u64(value.len() as u64);
        self.hasher.update(value.as_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> Digest {
        self.hasher.finalize().into()
    }
}

/// Lowercase hex rendering for logs.
pub fn to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

// =============================================================================
// TESTS
// =============================================================================
