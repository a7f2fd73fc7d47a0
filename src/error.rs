//! Error types for the `lobtable` crate

/// Errors returned by table operations
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The key is not present in the table
    #[error("key not found")]
    KeyNotFound,

    /// Growing would push the bucket count past its ceiling.
    /// The table is left exactly as it was before the call.
    #[error("table full: cannot grow past 2^{max} buckets (currently 2^{log2})")]
    TableFull {
        /// Current `log2` of the bucket count
        log2: u8,

        /// Configured ceiling
        max: u8,
    },

    /// The table configuration was rejected at creation time
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Table result
pub type Result<T> = std::result::Result<T, Error>;
