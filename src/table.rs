//! The hash table: a flat array of fixed-capacity buckets indexed by the low
//! bits of a seeded key hash, doubled when a bucket overflows.

use std::fmt;

use crate::{
    bucket::{Bucket, BucketFull},
    config::Config,
    error::{Error, Result},
    hash::KeyHasher,
    iter::{Iter, IterMut, Keys, Values, ValuesMut},
    mask::{bucket_count, bucket_index, has_bits, set_bits, split_bit},
};

/// Hash table with a power-of-two number of fixed-capacity buckets
///
/// A key's bucket is the low-order bits of its seeded hash. When a new key
/// lands in a full bucket, the bucket count doubles and every entry is
/// redistributed by its stored hash; keys are never rehashed.
pub struct Table<V> {
    /// Bucket storage, `buckets.len() == 1 << bucket_count_log2`
    buckets: Vec<Bucket<V>>,

    /// Base-2 logarithm of the bucket count
    bucket_count_log2: u8,

    /// Growth ceiling
    max_bucket_count_log2: u8,

    /// Slots per bucket
    bucket_capacity: usize,

    /// Seeded key hasher
    hasher: KeyHasher,

    /// Total entries across all buckets
    len: usize,

    /// Entries moved by growth since creation
    relocations: u64,
}

/// Allocate `2^log2` empty buckets, or `None` if that many cannot be addressed
fn allocate_buckets<V>(log2: u8, capacity: usize) -> Option<Vec<Bucket<V>>> {
    let count = usize::try_from(bucket_count(log2)).ok()?;

    let mut buckets = Vec::new();
    buckets.try_reserve_exact(count).ok()?;
    buckets.extend((0..count).map(|_| Bucket::new(capacity)));

    Some(buckets)
}

impl<V> Table<V> {
    /// Create an empty table with `2^initial_log2` buckets and default settings
    pub fn new(initial_log2: u8) -> Result<Self> {
        Self::with_config(Config::new().initial_bucket_count_log2(initial_log2))
    }

    /// Create an empty table from a configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let buckets = allocate_buckets(config.initial_bucket_count_log2, config.bucket_capacity)
            .ok_or(Error::InvalidConfiguration(
                "initial bucket count is not addressable on this target",
            ))?;

        Ok(Self::from_parts(&config, buckets))
    }

    /// Assemble a table from a validated configuration and its initial buckets
    fn from_parts(config: &Config, buckets: Vec<Bucket<V>>) -> Self {
        debug_assert_eq!(
            buckets.len() as u64,
            bucket_count(config.initial_bucket_count_log2)
        );

        log::debug!(
            "Creating table with 2^{} buckets of {} slots (max 2^{})",
            config.initial_bucket_count_log2,
            config.bucket_capacity,
            config.max_bucket_count_log2,
        );

        Self {
            buckets,
            bucket_count_log2: config.initial_bucket_count_log2,
            max_bucket_count_log2: config.max_bucket_count_log2,
            bucket_capacity: config.bucket_capacity,
            hasher: config
                .seed
                .map_or_else(KeyHasher::random, KeyHasher::with_seed),
            len: 0,
            relocations: 0,
        }
    }

    /// Returns the number of elements in the table
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the base-2 logarithm of the bucket count
    #[inline]
    pub fn bucket_count_log2(&self) -> u8 {
        self.bucket_count_log2
    }

    /// Returns the number of buckets
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of slots per bucket
    #[inline]
    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    /// Returns the growth ceiling for the bucket count's base-2 logarithm
    #[inline]
    pub fn max_bucket_count_log2(&self) -> u8 {
        self.max_bucket_count_log2
    }

    /// Returns the hash seed
    #[inline]
    pub fn seed(&self) -> u64 {
        self.hasher.seed()
    }

    /// Returns the number of entries moved by growth since creation
    #[inline]
    pub fn relocations(&self) -> u64 {
        self.relocations
    }

    /// Returns the number of occupied slots in a bucket
    #[inline]
    pub fn bucket_len(&self, idx: usize) -> Option<usize> {
        self.buckets.get(idx).map(Bucket::len)
    }

    /// Returns the index of the bucket that `key` maps to under the current mask
    #[inline]
    pub fn bucket_of(&self, key: &str) -> usize {
        self.index_of(self.hasher.hash(key))
    }

    #[inline]
    fn index_of(&self, hash: u64) -> usize {
        // always < buckets.len(), which is a usize
        bucket_index(hash, self.bucket_count_log2) as usize
    }

    /// Returns a reference to the value associated with the given key
    #[inline]
    pub fn get(&self, key: &str) -> Option<&V> {
        let hash = self.hasher.hash(key);
        self.buckets[self.index_of(hash)].get(hash, key)
    }

    /// Returns a mutable reference to the value associated with the given key
    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let hash = self.hasher.hash(key);
        let idx = self.index_of(hash);
        self.buckets[idx].get_mut(hash, key)
    }

    /// Return `true` if the table contains a value for the given key
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a key-value pair into the table
    ///
    /// If the table did not have this key present, `Ok(None)` is returned.
    /// If the table did have this key present, the value is updated, and the old value is returned.
    ///
    /// If the key is new and its bucket is full, the table doubles as many times
    /// as the key needs. Fails with [`Error::TableFull`] if that would pass the
    /// ceiling, in which case the table is left untouched. If allocating a
    /// bucket array fails partway, the error is also `TableFull`; the doublings
    /// already done are kept and every entry stays reachable.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>> {
        let mut key = key.into();
        let mut value = value;
        let hash = self.hasher.hash(&key);

        loop {
            let idx = self.index_of(hash);
            match self.buckets[idx].insert(hash, key, value) {
                Ok(None) => {
                    self.len += 1;
                    return Ok(None);
                }
                Ok(Some(old)) => return Ok(Some(old)),
                Err(BucketFull { key: k, value: v }) => {
                    key = k;
                    value = v;

                    // ceiling is checked before any growth
                    let target = self.required_log2(idx, hash)?;

                    log::trace!(
                        "Bucket {idx} full, growing from 2^{} to 2^{target} buckets",
                        self.bucket_count_log2,
                    );

                    while self.bucket_count_log2 < target {
                        self.grow()?;
                    }
                }
            }
        }
    }

    /// Find the smallest bucket count at which the full bucket `idx` has room for `hash`
    ///
    /// Only entries of bucket `idx` can share its descendants, so this is decided
    /// by re-masking that bucket alone.
    fn required_log2(&self, idx: usize, hash: u64) -> Result<u8> {
        let bucket = &self.buckets[idx];
        let mut log2 = self.bucket_count_log2;

        loop {
            if log2 >= self.max_bucket_count_log2 {
                log::warn!(
                    "Cannot grow table past 2^{} buckets",
                    self.max_bucket_count_log2
                );
                return Err(Error::TableFull {
                    log2: self.bucket_count_log2,
                    max: self.max_bucket_count_log2,
                });
            }

            log2 += 1;

            let target = bucket_index(hash, log2);
            let sharing = bucket
                .iter()
                .filter(|slot| bucket_index(slot.hash(), log2) == target)
                .count();

            if sharing < bucket.capacity() {
                if usize::try_from(bucket_count(log2)).is_err() {
                    return Err(Error::TableFull {
                        log2: self.bucket_count_log2,
                        max: self.max_bucket_count_log2,
                    });
                }
                return Ok(log2);
            }
        }
    }

    /// Double the bucket count and redistribute every entry
    ///
    /// Bucket `i` splits into `i` and `i | split_bit`, chosen by the hash bit
    /// that newly enters the mask. Nothing is modified if allocation fails.
    fn grow(&mut self) -> Result<()> {
        let old_log2 = self.bucket_count_log2;
        let full = Error::TableFull {
            log2: old_log2,
            max: self.max_bucket_count_log2,
        };

        if old_log2 >= self.max_bucket_count_log2 {
            return Err(full);
        }

        let new_log2 = old_log2 + 1;
        let mut buckets = allocate_buckets(new_log2, self.bucket_capacity).ok_or(full)?;

        let split = split_bit(old_log2);
        let mut moved = 0u64;

        for (old_idx, bucket) in self.buckets.iter_mut().enumerate() {
            let low = old_idx as u64;
            let high = set_bits(low, split);

            for slot in bucket.drain() {
                let target = if has_bits(slot.hash(), split) { high } else { low };
                debug_assert_eq!(target, bucket_index(slot.hash(), new_log2));

                buckets[target as usize].push(slot);
                moved += 1;
            }
        }

        debug_assert_eq!(moved, self.len as u64);

        self.buckets = buckets;
        self.bucket_count_log2 = new_log2;
        self.relocations += moved;

        log::debug!("Grew table from 2^{old_log2} to 2^{new_log2} buckets, moved {moved} entries");

        Ok(())
    }

    /// Removes a key from the table, returning the value if the key was present
    pub fn delete(&mut self, key: &str) -> Result<V> {
        let hash = self.hasher.hash(key);
        let idx = self.index_of(hash);

        let slot = self.buckets[idx]
            .remove(hash, key)
            .ok_or(Error::KeyNotFound)?;

        self.len -= 1;

        let (_, value) = slot.into_parts();
        Ok(value)
    }

    /// Clears the table, removing all key-value pairs
    ///
    /// Keeps the current bucket count and seed.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Iterate over all key-value pairs
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.buckets, self.len)
    }

    /// Iterate over all key-value pairs with mutable values
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut::new(&mut self.buckets, self.len)
    }

    /// Iterate over all keys
    pub fn keys(&self) -> Keys<'_, V> {
        Keys(self.iter())
    }

    /// Iterate over all values
    pub fn values(&self) -> Values<'_, V> {
        Values(self.iter())
    }

    /// Iterate over all values mutably
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut(self.iter_mut())
    }
}

impl<V> Default for Table<V> {
    /// One bucket of default capacity, random seed
    fn default() -> Self {
        let config = Config::default();
        let buckets = vec![Bucket::new(config.bucket_capacity)];
        Self::from_parts(&config, buckets)
    }
}

impl<V: fmt::Debug> fmt::Debug for Table<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
