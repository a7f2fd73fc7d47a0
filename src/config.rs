//! Table configuration and its validation.

use crate::{
    error::{Error, Result},
    mask::MAX_BUCKET_COUNT_LOG2,
};

/// Default number of slots per bucket
///
/// Larger buckets mean fewer growth events but longer scans on lookup.
pub const DEFAULT_BUCKET_CAPACITY: usize = 8;

/// Table configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// `log2` of the bucket count at creation
    pub(crate) initial_bucket_count_log2: u8,

    /// Slots per bucket
    pub(crate) bucket_capacity: usize,

    /// Growth ceiling for `log2` of the bucket count
    pub(crate) max_bucket_count_log2: u8,

    /// Fixed hash seed, `None` draws a random one per table
    pub(crate) seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_bucket_count_log2: 0,
            bucket_capacity: DEFAULT_BUCKET_CAPACITY,
            max_bucket_count_log2: MAX_BUCKET_COUNT_LOG2,
            seed: None,
        }
    }
}

impl Config {
    /// Creates a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial bucket count as its base-2 logarithm.
    ///
    /// Default = 0 (one bucket)
    #[must_use]
    pub fn initial_bucket_count_log2(mut self, log2: u8) -> Self {
        self.initial_bucket_count_log2 = log2;
        self
    }

    /// Sets the number of slots per bucket.
    ///
    /// Default = 8
    #[must_use]
    pub fn bucket_capacity(mut self, capacity: usize) -> Self {
        self.bucket_capacity = capacity;
        self
    }

    /// Sets the ceiling for the bucket count's base-2 logarithm.
    ///
    /// Default = 32, which is also the highest accepted value
    #[must_use]
    pub fn max_bucket_count_log2(mut self, log2: u8) -> Self {
        self.max_bucket_count_log2 = log2;
        self
    }

    /// Pins the hash seed.
    ///
    /// Only meant for reproducible layouts in tests and benchmarks, a known
    /// seed lets an attacker pick colliding keys.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.bucket_capacity == 0 {
            return Err(Error::InvalidConfiguration("bucket capacity must be > 0"));
        }

        if self.max_bucket_count_log2 > MAX_BUCKET_COUNT_LOG2 {
            return Err(Error::InvalidConfiguration(
                "max bucket count log2 exceeds the supported ceiling",
            ));
        }

        if self.initial_bucket_count_log2 > self.max_bucket_count_log2 {
            return Err(Error::InvalidConfiguration(
                "initial bucket count log2 exceeds the configured max",
            ));
        }

        Ok(())
    }
}
