//! Error types for the wtinylfu crate.
//!
//! Cache operations themselves never fail: a lookup hits or misses, an insert
//! always stores. Errors only come from configuration and invariant checks.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned by [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build)
//!   when a parameter is out of range.
//! - [`InvariantError`]: Returned by `check_invariants` on shards and caches
//!   when the index and the eviction segments disagree.
//!
//! ## Example Usage
//!
//! ```
//! use wtinylfu::builder::CacheBuilder;
//! use wtinylfu::error::ConfigError;
//! use wtinylfu::WTinyLfuCache;
//!
//! let cache: Result<WTinyLfuCache<u64>, ConfigError> = CacheBuilder::new(1600).try_build();
//! assert!(cache.is_ok());
//!
//! let bad = CacheBuilder::new(1600).sketch_width(0).try_build::<u64>();
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when the structural invariants of a shard are violated.
///
/// Carries a description of the first invariant that failed, prefixed by the
/// shard index when it comes from a sharded cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    /// Prefixes the description with the shard it came from.
    pub fn in_shard(self, shard: usize) -> Self {
        Self(format!("shard {shard}: {}", self.0))
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// # Example
///
/// ```
/// use wtinylfu::builder::CacheBuilder;
///
/// let err = CacheBuilder::new(100).sketch_width(0).try_build::<u64>().unwrap_err();
/// assert!(err.to_string().contains("sketch_width"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
