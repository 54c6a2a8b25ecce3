//! wtinylfu: a sharded in-process cache with W-TinyLFU admission.
//!
//! A small recency window absorbs newly seen keys. When the window overflows,
//! a count-min frequency sketch decides whether the evicted candidate has been
//! seen often enough to enter the main region, which is itself a segmented LRU
//! (probation + protection). Keys are spread over a fixed set of independently
//! locked shards by the top bits of their hash.
//!
//! ```
//! use wtinylfu::WTinyLfuCache;
//!
//! let cache: WTinyLfuCache<String> = WTinyLfuCache::new(1600);
//! let handle = cache.insert("user:42", "alice".to_string());
//! assert_eq!(handle.as_str(), "alice");
//! assert_eq!(cache.peek("user:42").as_deref(), Some(&"alice".to_string()));
//! ```

pub mod builder;
pub mod clock;
pub mod ds;
pub mod error;
pub mod hash;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use builder::CacheBuilder;
pub use ds::Location;
pub use policy::w_tinylfu::{CacheShard, WTinyLfuCache};
