//! Seeded key hashing.
//!
//! Keys are hashed with XXH3-64 using a per-table seed as the initial
//! accumulator state, so bucket placement cannot be predicted without
//! knowing the seed.

use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Hashes `key` under `seed`
#[inline]
pub fn hash_key(seed: u64, key: &[u8]) -> u64 {
    xxh3_64_with_seed(key, seed)
}

/// Draws a fresh seed from the thread-local RNG
#[inline]
pub fn random_seed() -> u64 {
    rand::random()
}

/// Key hasher bound to a single seed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyHasher {
    seed: u64,
}

impl KeyHasher {
    /// Create a hasher with a fixed seed
    #[inline]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// Create a hasher with a random seed
    #[inline]
    pub fn random() -> Self {
        Self::with_seed(random_seed())
    }

    /// Returns the seed
    #[inline]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Hashes a string key
    #[inline]
    pub fn hash(&self, key: &str) -> u64 {
        hash_key(self.seed, key.as_bytes())
    }
}

impl Default for KeyHasher {
    fn default() -> Self {
        Self::random()
    }
}
