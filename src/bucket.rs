//! Fixed-capacity bucket of key-value slots.
//!
//! - Capacity is fixed when the bucket is created
//! - Occupied slots are always the first `len()` entries
//! - Each slot keeps the key's full hash, compared before the key itself
//! - Removal compacts by moving the last slot into the hole

use std::fmt;

/// A single key-value entry with its cached hash
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot<V> {
    hash: u64,
    key: String,
    value: V,
}

impl<V> Slot<V> {
    /// Create a new slot
    #[inline]
    pub fn new(hash: u64, key: String, value: V) -> Self {
        Self { hash, key, value }
    }

    /// Full hash of the key
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Key
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Splits the slot into key and value
    #[inline]
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) fn parts_mut(&mut self) -> (&str, &mut V) {
        (&self.key, &mut self.value)
    }

    #[inline]
    fn matches(&self, hash: u64, key: &str) -> bool {
        self.hash == hash && self.key == key
    }
}

/// Insert rejected because the bucket has no free slot and the key is new.
///
/// Hands ownership of the key and value back to the caller.
pub struct BucketFull<V> {
    pub key: String,
    pub value: V,
}

impl<V> fmt::Debug for BucketFull<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketFull")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Bucket holding up to `capacity` slots
#[derive(Clone, Debug)]
pub struct Bucket<V> {
    /// Occupied slots, never longer than `capacity`
    slots: Vec<Slot<V>>,

    /// Maximum number of slots
    capacity: usize,
}

impl<V> Bucket<V> {
    /// Create new empty bucket, reserving all slots up front
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied slots
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if bucket is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if bucket is full
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Find slot containing key (if any)
    ///
    /// The hash is checked first, the key is always compared on a hash match.
    #[inline]
    pub fn find(&self, hash: u64, key: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.matches(hash, key))
    }

    /// Get slot at index
    #[inline]
    pub fn slot(&self, idx: usize) -> Option<&Slot<V>> {
        self.slots.get(idx)
    }

    /// Get value by hash and key
    #[inline]
    pub fn get(&self, hash: u64, key: &str) -> Option<&V> {
        let idx = self.find(hash, key)?;
        Some(&self.slots[idx].value)
    }

    /// Get mutable value by hash and key
    #[inline]
    pub fn get_mut(&mut self, hash: u64, key: &str) -> Option<&mut V> {
        let idx = self.find(hash, key)?;
        Some(&mut self.slots[idx].value)
    }

    /// Insert or update a key-value pair
    ///
    /// Returns the previous value if the key was present. An update always
    /// succeeds in place; a new key fails with [`BucketFull`] when no slot is free.
    pub fn insert(&mut self, hash: u64, key: String, value: V) -> Result<Option<V>, BucketFull<V>> {
        if let Some(idx) = self.find(hash, &key) {
            let old = std::mem::replace(&mut self.slots[idx].value, value);
            return Ok(Some(old));
        }

        if self.is_full() {
            return Err(BucketFull { key, value });
        }

        self.slots.push(Slot::new(hash, key, value));
        Ok(None)
    }

    /// Append a slot whose key is known to be absent
    ///
    /// Used when redistributing entries during growth.
    ///
    /// # Panics
    /// Debug panics if the bucket is full
    pub(crate) fn push(&mut self, slot: Slot<V>) {
        debug_assert!(!self.is_full(), "bucket overflow during redistribution");
        self.slots.push(slot);
    }

    /// Remove entry by hash and key, returning the slot
    pub fn remove(&mut self, hash: u64, key: &str) -> Option<Slot<V>> {
        let idx = self.find(hash, key)?;
        Some(self.slots.swap_remove(idx))
    }

    /// Iterate over occupied slots
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Slot<V>> {
        self.slots.iter()
    }

    /// Iterate over occupied slots with mutable values
    #[inline]
    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Slot<V>> {
        self.slots.iter_mut()
    }

    /// Move all slots out, leaving the bucket empty
    #[inline]
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, Slot<V>> {
        self.slots.drain(..)
    }

    /// Clear all slots in bucket
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
