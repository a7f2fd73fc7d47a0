//! A seeded hash table with a power-of-two number of fixed-capacity buckets.
//!
//! Keys are hashed with XXH3 under a per-table random seed. The bucket for a
//! key is the low-order bits of its hash, extracted with the mask
//! `(1 << log2) - 1`. When a new key lands in a full bucket the bucket count
//! doubles and entries are redistributed by their stored hash.
//!
//! ```
//! use lobtable::Table;
//!
//! let mut table = Table::new(2)?;
//! table.put("key", 42)?;
//!
//! assert_eq!(table.get("key"), Some(&42));
//! assert_eq!(table.get("missing"), None);
//! assert_eq!(table.len(), 1);
//! # Ok::<(), lobtable::Error>(())
//! ```

#![deny(unsafe_code)]

pub mod bucket;
pub mod config;
mod error;
pub mod hash;
pub mod iter;
pub mod mask;
pub mod sync;
pub mod table;

pub use config::{Config, DEFAULT_BUCKET_CAPACITY};
pub use error::{Error, Result};
pub use mask::MAX_BUCKET_COUNT_LOG2;
pub use sync::SyncTable;
pub use table::Table;
