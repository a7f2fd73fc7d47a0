//! Shared table behind a readers-writer lock.
//!
//! Lookups take the read lock; puts, deletes and the growth they trigger take
//! the write lock, so a reader never sees a half-migrated bucket array.

use parking_lot::{RwLock, RwLockReadGuard};

use crate::{config::Config, error::Result, table::Table};

/// Thread-safe wrapper around [`Table`]
pub struct SyncTable<V> {
    inner: RwLock<Table<V>>,
}

impl<V> SyncTable<V> {
    /// Wrap an existing table
    pub fn new(table: Table<V>) -> Self {
        Self {
            inner: RwLock::new(table),
        }
    }

    /// Create an empty shared table from a configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Table::with_config(config).map(Self::new)
    }

    /// Returns the number of elements in the table
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the table contains no elements
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Return `true` if the table contains a value for the given key
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    /// Runs `f` on the value for `key` while holding the read lock
    pub fn with_value<R>(&self, key: &str, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.read().get(key).map(f)
    }

    /// Inserts a key-value pair, see [`Table::put`]
    pub fn put(&self, key: impl Into<String>, value: V) -> Result<Option<V>> {
        self.inner.write().put(key, value)
    }

    /// Removes a key, see [`Table::delete`]
    pub fn delete(&self, key: &str) -> Result<V> {
        self.inner.write().delete(key)
    }

    /// Locks the table for reading
    pub fn read(&self) -> RwLockReadGuard<'_, Table<V>> {
        self.inner.read()
    }

    /// Unwraps the inner table
    pub fn into_inner(self) -> Table<V> {
        self.inner.into_inner()
    }
}

impl<V: Clone> SyncTable<V> {
    /// Returns a copy of the value associated with the given key
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.read().get(key).cloned()
    }
}

impl<V> From<Table<V>> for SyncTable<V> {
    fn from(table: Table<V>) -> Self {
        Self::new(table)
    }
}

impl<V> Default for SyncTable<V> {
    fn default() -> Self {
        Self::new(Table::default())
    }
}
