//! Cache builder.
//!
//! Collects the optional knobs of a [`WTinyLfuCache`] and validates them
//! before any shard is allocated.
//!
//! ## Example
//!
//! ```rust
//! use wtinylfu::builder::CacheBuilder;
//! use wtinylfu::WTinyLfuCache;
//!
//! let cache: WTinyLfuCache<String> = CacheBuilder::new(1600)
//!     .sketch_width(512)
//!     .loading(true)
//!     .build();
//!
//! assert!(cache.is_loading());
//! cache.insert("a", "hello".to_string());
//! assert_eq!(cache.peek("a").as_deref().map(String::as_str), Some("hello"));
//! ```

use crate::error::ConfigError;
use crate::policy::w_tinylfu::WTinyLfuCache;

/// Builder for [`WTinyLfuCache`].
///
/// | Setting        | Default                       |
/// |----------------|-------------------------------|
/// | `sketch_width` | per-shard capacity (min 1)    |
/// | `loading`      | `false`                       |
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    capacity: usize,
    sketch_width: Option<usize>,
    loading: bool,
}

impl CacheBuilder {
    /// Starts a builder for a cache holding about `capacity` entries in total.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sketch_width: None,
            loading: false,
        }
    }

    /// Counters per sketch row in every shard. Must be non-zero.
    pub fn sketch_width(mut self, width: usize) -> Self {
        self.sketch_width = Some(width);
        self
    }

    /// Starts the cache in loading mode (admission bypass).
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Validates the settings and builds the cache.
    pub fn try_build<T>(self) -> Result<WTinyLfuCache<T>, ConfigError> {
        if self.sketch_width == Some(0) {
            return Err(ConfigError::new("sketch_width must be greater than zero"));
        }
        Ok(WTinyLfuCache::from_builder(
            self.capacity,
            self.sketch_width,
            self.loading,
        ))
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if the settings are invalid; see [`CacheBuilder::try_build`].
    pub fn build<T>(self) -> WTinyLfuCache<T> {
        match self.try_build() {
            Ok(cache) => cache,
            Err(err) => panic!("invalid cache configuration: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_capacity() {
        let cache: WTinyLfuCache<u32> = CacheBuilder::new(1600).build();
        assert_eq!(cache.capacity(), 1600);
        assert!(!cache.is_loading());
        for shard in cache.shards() {
            assert_eq!(shard.capacity(), 100);
        }
    }

    #[test]
    fn loading_flag_is_applied_to_all_shards() {
        let cache: WTinyLfuCache<u32> = CacheBuilder::new(64).loading(true).build();
        assert!(cache.shards().all(|shard| shard.is_loading()));
    }

    #[test]
    fn zero_sketch_width_is_rejected() {
        let err = CacheBuilder::new(10).sketch_width(0).try_build::<u32>().unwrap_err();
        assert!(err.message().contains("sketch_width"));
    }

    #[test]
    #[should_panic(expected = "invalid cache configuration")]
    fn build_panics_on_invalid_config() {
        let _cache: WTinyLfuCache<u32> = CacheBuilder::new(10).sketch_width(0).build();
    }

    #[test]
    fn zero_capacity_is_allowed() {
        let cache: WTinyLfuCache<u32> = CacheBuilder::new(0).try_build().unwrap();
        cache.insert("k", 1);
        assert!(cache.contains("k"));
        assert_eq!(cache.len(), 1);
        cache.check_invariants().unwrap();
    }
}
