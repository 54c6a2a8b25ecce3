//! Top-bits shard selection.
//!
//! Maps a 32-bit key hash to a shard index by taking its `shard_bits` most
//! significant bits. The low bits stay free for hash-index buckets inside the
//! shard, so the two uses of the same hash do not correlate.
//!
//! ```text
//!   hash (32 bits)
//!   ┌──────┬───────────────────────────────┐
//!   │ 1011 │ 0110 1100 0001 ... 1110 0101  │
//!   └──┬───┴───────────────────────────────┘
//!      │  shard_bits = 4
//!      ▼
//!   shard 11 of 16        low bits ──► bucket inside the shard
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use wtinylfu::ds::ShardSelector;
//! use wtinylfu::hash::hash_key;
//!
//! let selector = ShardSelector::new(4);
//! assert_eq!(selector.shard_count(), 16);
//!
//! let shard = selector.shard_for_key("user:123");
//! assert!(shard < 16);
//! assert_eq!(selector.shard_for_hash(hash_key("user:123")), shard);
//! ```

use crate::hash::hash_key;

/// Largest supported number of shard bits.
pub const MAX_SHARD_BITS: u32 = 16;

/// Deterministic shard selector over the top bits of a key hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardSelector {
    shard_bits: u32,
}

impl ShardSelector {
    /// Creates a selector for `2^shard_bits` shards.
    ///
    /// `shard_bits` is clamped to [`MAX_SHARD_BITS`]; zero means one shard.
    pub fn new(shard_bits: u32) -> Self {
        Self {
            shard_bits: shard_bits.min(MAX_SHARD_BITS),
        }
    }

    pub fn shard_bits(&self) -> u32 {
        self.shard_bits
    }

    /// Number of shards addressed by this selector.
    pub fn shard_count(&self) -> usize {
        1usize << self.shard_bits
    }

    /// Maps a precomputed hash to a shard index in `[0, shard_count)`.
    #[inline]
    pub fn shard_for_hash(&self, hash: u32) -> usize {
        if self.shard_bits == 0 {
            0
        } else {
            (hash >> (32 - self.shard_bits)) as usize
        }
    }

    /// Hashes `key` and maps it to a shard index.
    pub fn shard_for_key(&self, key: &str) -> usize {
        self.shard_for_hash(hash_key(key))
    }
}

impl Default for ShardSelector {
    /// Creates a single-shard selector.
    fn default() -> Self {
        Self::new(0)
    }
}
