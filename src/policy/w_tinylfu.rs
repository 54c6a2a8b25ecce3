//! Window TinyLFU (W-TinyLFU) cache with sharded locking.
//!
//! New keys enter a small LRU *window*. When the window overflows, its least
//! recently used entry becomes an admission candidate: the frequency sketch
//! lets it into the main region only if it has been seen more than once.
//! The main region is a segmented LRU: admitted keys start in *probation*, and
//! a hit in probation promotes them to *protection*. Protection overflow
//! demotes back into probation, and only probation overflow destroys entries.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────────┐
//! │ WTinyLfuCache<T>                                                          │
//! │                                                                           │
//! │   key ──► hash_key(key) ──► top 4 bits ──► shard[0..16]                   │
//! │                                                                           │
//! │   ┌───────────────────────────────────────────────────────────────────┐   │
//! │   │ CacheShard<T>  (parking_lot::Mutex<ShardCore<T>>)                  │   │
//! │   │                                                                   │   │
//! │   │   nodes: SlotArena<Node<T>>      index: HashIndex (key ──► id)    │   │
//! │   │   sketch: FrequencySketch (6 rows of u8 counters)                 │   │
//! │   │                                                                   │   │
//! │   │   WINDOW (1%)      PROBATION (99% x 20%)     PROTECTION (99% x 80%)│   │
//! │   │   ┌─────────┐       ┌─────────────────┐       ┌─────────────────┐ │   │
//! │   │   │ lru mru │──────►│ lru         mru │◄─────►│ lru         mru │ │   │
//! │   │   └─────────┘ admit └─────────────────┘ hit / └─────────────────┘ │   │
//! │   │        │       if         │             demote                     │   │
//! │   │        ▼     freq > 1     ▼                                        │   │
//! │   │     destroy            destroy                                     │   │
//! │   └───────────────────────────────────────────────────────────────────┘   │
//! └───────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Insert Flow (new key)
//! ──────────────────────
//!
//!   insert("k", v):
//!     1. Allocate node and index it
//!     2. Append to window MRU (a zero-sized window still keeps this one node)
//!     3. If the window evicted a candidate:
//!        - loading, or sketch.admit(candidate): append to probation,
//!          destroying probation's LRU if it was full
//!        - otherwise: destroy the candidate
//!     4. Record "k" in the sketch
//!
//! Hit Flow (lookup hit or insert of an existing key)
//! ──────────────────────────────────────────────────
//!
//!   window     ──► move to window MRU
//!   probation  ──► move to protection; protection's LRU (if full) is demoted
//!                  to probation, whose LRU (if full) is destroyed
//!   protection ──► move to protection MRU
//!   then record the key in the sketch
//!
//! ## Operations
//!
//! | Operation     | Time   | Notes                                        |
//! |---------------|--------|----------------------------------------------|
//! | `lookup`      | O(1)*  | Hit transition + sketch record               |
//! | `peek`        | O(1)*  | No recency or frequency side effects         |
//! | `insert`      | O(1)*  | Existing key counts as a hit                 |
//! | `update`      | O(1)*  | Replaces the value only if present           |
//! | `set_loading` | O(S)   | S = shard count                              |
//!
//! *Expected; chain length in the hash index plus a bounded cascade.
//!
//! ## Thread Safety
//!
//! Every shard operation holds that shard's mutex for its whole duration.
//! No operation touches two shards, so there is no lock ordering to respect.
//! Returned `Arc<T>` handles are independent owners: evicting or overwriting
//! a key never invalidates a handle a caller already holds.
//!
//! ## Aging
//!
//! Sketch counters saturate upwards and are never aged by the cache itself.
//! Long-running embedders should call [`WTinyLfuCache::decay`] on keys they
//! consider stale, otherwise admission drifts towards "always admit".

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::builder::CacheBuilder;
use crate::clock;
use crate::ds::{
    EvictionSegment, FrequencySketch, HashIndex, Location, Node, ShardSelector, SlotArena, SlotId,
};
use crate::error::InvariantError;
use crate::hash::hash_key;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::WTinyLfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::WTinyLfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, MetricsSnapshotProvider, WTinyLfuMetricsRecorder,
};

/// Number of hash bits used to pick a shard.
pub const SHARD_BITS: u32 = 4;

/// Number of shards in a [`WTinyLfuCache`].
pub const NUM_SHARDS: usize = 1 << SHARD_BITS;

const WINDOW_RATIO: f64 = 0.01;
const MAIN_RATIO: f64 = 0.99;
const PROBATION_RATIO: f64 = 0.2;
const PROTECTION_RATIO: f64 = 0.8;

/// Capacities of the three eviction segments of one shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSizes {
    pub window: usize,
    pub probation: usize,
    pub protection: usize,
}

impl SegmentSizes {
    /// Splits a shard capacity: 1% window, 99% x 20% probation, 99% x 80%
    /// protection, each rounded down.
    ///
    /// ```
    /// use wtinylfu::policy::w_tinylfu::SegmentSizes;
    ///
    /// let sizes = SegmentSizes::for_capacity(100);
    /// assert_eq!((sizes.window, sizes.probation, sizes.protection), (1, 19, 79));
    /// ```
    pub fn for_capacity(capacity: usize) -> Self {
        let capacity = capacity as f64;
        Self {
            window: (capacity * WINDOW_RATIO) as usize,
            probation: (capacity * MAIN_RATIO * PROBATION_RATIO) as usize,
            protection: (capacity * MAIN_RATIO * PROTECTION_RATIO) as usize,
        }
    }

    /// Maximum number of resident entries.
    pub fn total(&self) -> usize {
        self.window + self.probation + self.protection
    }
}

/// Lock-free core of a shard; callers hold the shard mutex.
#[derive(Debug)]
struct ShardCore<T> {
    capacity: usize,
    nodes: SlotArena<Node<T>>,
    index: HashIndex,
    sketch: FrequencySketch,
    window: EvictionSegment,
    probation: EvictionSegment,
    protection: EvictionSegment,
    loading: bool,
    #[cfg(feature = "metrics")]
    metrics: WTinyLfuMetrics,
}

impl<T> ShardCore<T> {
    fn new(capacity: usize, sizes: SegmentSizes, sketch_width: usize, loading: bool) -> Self {
        Self {
            capacity,
            nodes: SlotArena::with_capacity(sizes.total() + 1),
            index: HashIndex::new(),
            sketch: FrequencySketch::new(sketch_width),
            window: EvictionSegment::new(sizes.window, Location::Window),
            probation: EvictionSegment::new(sizes.probation, Location::Probation),
            protection: EvictionSegment::new(sizes.protection, Location::Protection),
            loading,
            #[cfg(feature = "metrics")]
            metrics: WTinyLfuMetrics::default(),
        }
    }

    fn sizes(&self) -> SegmentSizes {
        SegmentSizes {
            window: self.window.capacity(),
            probation: self.probation.capacity(),
            protection: self.protection.capacity(),
        }
    }

    fn lookup(&mut self, key: &str, hash: u32) -> Option<(Arc<T>, i64)> {
        let Some(id) = self.index.lookup(&self.nodes, key, hash) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.on_hit(id);
        self.nodes
            .get(id)
            .map(|node| (Arc::clone(&node.value), node.timestamp_ms))
    }

    fn peek(&mut self, key: &str, hash: u32) -> Option<Arc<T>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let id = self.index.lookup(&self.nodes, key, hash)?;
        self.nodes.get(id).map(|node| Arc::clone(&node.value))
    }

    fn insert(&mut self, key: &str, hash: u32, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let now = clock::now_ms();
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(id) = self.index.lookup(&self.nodes, key, hash) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            if let Some(node) = self.nodes.get_mut(id) {
                node.replace_value(Arc::clone(&value), now);
            }
            self.on_hit(id);
            return value;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();
        let id = self
            .nodes
            .insert(Node::new(key, hash, Arc::clone(&value), now));
        self.index.insert(&mut self.nodes, id);

        if let Some(candidate) = self.window.insert(&mut self.nodes, id) {
            self.admit_candidate(candidate);
        }
        self.sketch.record(key);
        value
    }

    fn update(&mut self, key: &str, hash: u32, value: T) -> bool {
        let Some(node) = self
            .index
            .lookup(&self.nodes, key, hash)
            .and_then(|id| self.nodes.get_mut(id))
        else {
            #[cfg(feature = "metrics")]
            self.metrics.record_update_miss();
            return false;
        };
        node.replace_value(Arc::new(value), clock::now_ms());
        #[cfg(feature = "metrics")]
        self.metrics.record_update_hit();
        true
    }

    /// Recency/frequency transition for a key that was just accessed.
    fn on_hit(&mut self, id: SlotId) {
        let Some(location) = self.nodes.get(id).map(|node| node.location) else {
            return;
        };

        match location {
            Location::Window => self.window.hit(&mut self.nodes, id),
            Location::Probation => {
                self.probation.remove(&mut self.nodes, id);
                let demoted = self.protection.insert(&mut self.nodes, id);
                #[cfg(feature = "metrics")]
                {
                    if demoted != Some(id) {
                        self.metrics.record_promotion();
                    }
                    if demoted.is_some_and(|demoted| demoted != id) {
                        self.metrics.record_demotion();
                    }
                }
                if let Some(demoted) = demoted {
                    if let Some(victim) = self.probation.insert(&mut self.nodes, demoted) {
                        self.evict(victim);
                    }
                }
            },
            Location::Protection => self.protection.hit(&mut self.nodes, id),
            // Only observable inside an operation; an indexed node always has a segment.
            Location::Alone => {},
        }

        if let Some(node) = self.nodes.get(id) {
            self.sketch.record(&node.key);
        }
    }

    /// Decides the fate of a node pushed out of the window.
    fn admit_candidate(&mut self, candidate: SlotId) {
        #[cfg(feature = "metrics")]
        self.metrics.record_window_eviction();

        let Some(node) = self.nodes.get(candidate) else {
            return;
        };
        let frequent = self.sketch.admit(&node.key);

        if self.loading || frequent {
            tracing::trace!(
                key = %node.key,
                loading = self.loading,
                frequent,
                "window candidate admitted to probation"
            );
            #[cfg(feature = "metrics")]
            {
                if frequent {
                    self.metrics.record_admission();
                } else {
                    self.metrics.record_loading_admission();
                }
            }
            if let Some(victim) = self.probation.insert(&mut self.nodes, candidate) {
                self.evict(victim);
            }
        } else {
            tracing::trace!(
                key = %node.key,
                estimate = self.sketch.estimate(&node.key),
                "window candidate rejected"
            );
            #[cfg(feature = "metrics")]
            self.metrics.record_rejection();
            self.evict(candidate);
        }
    }

    /// Unindexes and frees a node that no segment holds any more.
    fn evict(&mut self, id: SlotId) {
        self.index.remove_id(&mut self.nodes, id);
        if let Some(node) = self.nodes.remove(id) {
            debug_assert_eq!(node.location, Location::Alone);
            tracing::trace!(key = %node.key, "entry evicted");
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }
    }

    fn location(&self, key: &str, hash: u32) -> Option<Location> {
        let id = self.index.lookup(&self.nodes, key, hash)?;
        self.nodes.get(id).map(|node| node.location)
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut indexed = FxHashSet::default();
        for id in self.index.iter_ids(&self.nodes) {
            if !indexed.insert(id) {
                return Err(InvariantError::new(format!(
                    "node {} linked twice in the hash index",
                    id.index()
                )));
            }
            let node = self.nodes.get(id).ok_or_else(|| {
                InvariantError::new(format!("indexed node {} missing from arena", id.index()))
            })?;
            if node.location == Location::Alone {
                return Err(InvariantError::new(format!(
                    "indexed key {:?} is not in any segment",
                    node.key
                )));
            }
            if hash_key(&node.key) != node.hash {
                return Err(InvariantError::new(format!(
                    "cached hash of key {:?} is stale",
                    node.key
                )));
            }
        }
        if indexed.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "hash index reports {} entries but links {}",
                self.index.len(),
                indexed.len()
            )));
        }

        let mut resident = 0usize;
        for segment in [&self.window, &self.probation, &self.protection] {
            let name = segment.location().as_str();
            if segment.len() > segment.max_len() {
                return Err(InvariantError::new(format!(
                    "{name} holds {} entries over capacity {}",
                    segment.len(),
                    segment.max_len()
                )));
            }

            let mut prev = None;
            let mut walked = 0usize;
            for id in segment.iter_ids(&self.nodes) {
                walked += 1;
                if walked > segment.len() {
                    return Err(InvariantError::new(format!("{name} list is cyclic")));
                }
                let Some(node) = self.nodes.get(id) else {
                    return Err(InvariantError::new(format!("{name} links a freed node")));
                };
                if node.prev != prev {
                    return Err(InvariantError::new(format!(
                        "{name} back link broken at key {:?}",
                        node.key
                    )));
                }
                if node.location != segment.location() {
                    return Err(InvariantError::new(format!(
                        "key {:?} linked in {name} but tagged {}",
                        node.key,
                        node.location.as_str()
                    )));
                }
                if !indexed.contains(&id) {
                    return Err(InvariantError::new(format!(
                        "key {:?} in {name} is not indexed",
                        node.key
                    )));
                }
                prev = Some(id);
            }
            if walked != segment.len() || segment.mru() != prev {
                return Err(InvariantError::new(format!(
                    "{name} length {} does not match its {walked} linked entries",
                    segment.len()
                )));
            }
            resident += walked;
        }

        if resident != self.index.len() || self.nodes.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "segments hold {resident} entries, index {}, arena {}",
                self.index.len(),
                self.nodes.len()
            )));
        }
        let limit = self.window.max_len() + self.probation.max_len() + self.protection.max_len();
        if resident > limit {
            return Err(InvariantError::new(format!(
                "{resident} resident entries exceed shard limit {limit}"
            )));
        }
        Ok(())
    }
}

/// One independently locked partition of a [`WTinyLfuCache`].
///
/// Shards can also be used on their own; callers then supply the key hash
/// (normally [`hash_key`]) with every call.
#[derive(Debug)]
pub struct CacheShard<T> {
    core: Mutex<ShardCore<T>>,
}

impl<T> CacheShard<T> {
    /// Creates a shard with the standard segment split of `capacity` and a
    /// sketch `capacity` counters wide.
    pub fn new(capacity: usize) -> Self {
        Self::with_sketch_width(capacity, capacity)
    }

    /// Creates a shard with the standard segment split and a custom sketch width.
    pub fn with_sketch_width(capacity: usize, sketch_width: usize) -> Self {
        Self::with_sizes(SegmentSizes::for_capacity(capacity), sketch_width)
    }

    /// Creates a shard with explicit segment capacities.
    pub fn with_sizes(sizes: SegmentSizes, sketch_width: usize) -> Self {
        Self::from_config(sizes.total(), sizes, sketch_width, false)
    }

    pub(crate) fn from_config(
        capacity: usize,
        sizes: SegmentSizes,
        sketch_width: usize,
        loading: bool,
    ) -> Self {
        Self {
            core: Mutex::new(ShardCore::new(capacity, sizes, sketch_width, loading)),
        }
    }

    /// Looks up `key`, applying the hit transition on success.
    ///
    /// Returns the value handle and the timestamp of its last full write.
    /// A miss has no side effects.
    pub fn lookup(&self, key: &str, hash: u32) -> Option<(Arc<T>, i64)> {
        self.core.lock().lookup(key, hash)
    }

    /// Returns the value for `key` without touching recency or frequency.
    pub fn peek(&self, key: &str, hash: u32) -> Option<Arc<T>> {
        self.core.lock().peek(key, hash)
    }

    /// Stores `value` under `key` and returns the handle now cached.
    ///
    /// An existing key is overwritten in place and treated as a hit. A new key
    /// enters the window and may push an older entry through admission. The new
    /// entry is always resident right after the call, even with a zero-sized
    /// window, which then holds just the newest key.
    pub fn insert(&self, key: &str, hash: u32, value: T) -> Arc<T> {
        self.core.lock().insert(key, hash, value)
    }

    /// Replaces the value of a present key without any recency or frequency
    /// signal. Returns `false` and stores nothing if `key` is absent.
    pub fn update(&self, key: &str, hash: u32, value: T) -> bool {
        self.core.lock().update(key, hash, value)
    }

    /// While set, window candidates skip the frequency check and always
    /// enter probation. Meant for warm-up and bulk loads.
    pub fn set_loading(&self, loading: bool) {
        self.core.lock().loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.core.lock().loading
    }

    /// Ages `key` in the frequency sketch (see [`FrequencySketch::decay`]).
    pub fn decay(&self, key: &str) {
        self.core.lock().sketch.decay(key);
    }

    /// Current sketch estimate for `key`.
    pub fn frequency(&self, key: &str) -> u8 {
        self.core.lock().sketch.estimate(key)
    }

    /// Zeroes the whole frequency sketch. Cached entries stay where they are.
    pub fn clear_frequencies(&self) {
        self.core.lock().sketch.clear();
    }

    /// Segment currently holding `key`, if cached.
    pub fn location(&self, key: &str, hash: u32) -> Option<Location> {
        self.core.lock().location(key, hash)
    }

    pub fn len(&self) -> usize {
        self.core.lock().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacity this shard was configured with.
    pub fn capacity(&self) -> usize {
        self.core.lock().capacity
    }

    pub fn segment_sizes(&self) -> SegmentSizes {
        self.core.lock().sizes()
    }

    /// Current member counts as `(window, probation, protection)`.
    pub fn segment_lens(&self) -> (usize, usize, usize) {
        let core = self.core.lock();
        (core.window.len(), core.probation.len(), core.protection.len())
    }

    /// Verifies that the hash index and the three segments agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.core.lock().check_invariants()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> WTinyLfuMetricsSnapshot {
        let core = self.core.lock();
        core.metrics.snapshot(core.index.len(), core.sizes().total())
    }
}

/// Sharded W-TinyLFU cache with string keys and shared `Arc<T>` values.
///
/// # Example
///
/// ```
/// use wtinylfu::WTinyLfuCache;
///
/// let cache = WTinyLfuCache::new(1600);
/// cache.insert("a", 1u32);
///
/// let (value, stamped_at) = cache.lookup_with_timestamp("a").unwrap();
/// assert_eq!(*value, 1);
/// assert!(stamped_at > 0);
///
/// assert!(cache.update("a", 2));
/// assert_eq!(cache.peek("a").as_deref(), Some(&2));
/// assert!(!cache.update("missing", 3));
/// ```
#[derive(Debug)]
pub struct WTinyLfuCache<T> {
    shards: Box<[CacheShard<T>]>,
    selector: ShardSelector,
    capacity: usize,
}

impl<T> WTinyLfuCache<T> {
    /// Creates a cache holding about `capacity` entries, split evenly (rounded
    /// up) across [`NUM_SHARDS`] shards.
    ///
    /// Capacities below 100 per shard round the window down to zero; such a
    /// window still keeps the most recent key of its shard, so a fresh insert
    /// is always readable until the next insert into the same shard.
    pub fn new(capacity: usize) -> Self {
        CacheBuilder::new(capacity).build()
    }

    pub(crate) fn from_builder(capacity: usize, sketch_width: Option<usize>, loading: bool) -> Self {
        let selector = ShardSelector::new(SHARD_BITS);
        let per_shard = capacity.div_ceil(selector.shard_count());
        let sizes = SegmentSizes::for_capacity(per_shard);
        let sketch_width = sketch_width.unwrap_or(per_shard).max(1);

        let shards = (0..selector.shard_count())
            .map(|_| CacheShard::from_config(per_shard, sizes, sketch_width, loading))
            .collect();

        tracing::debug!(
            capacity,
            shards = selector.shard_count(),
            per_shard,
            window = sizes.window,
            probation = sizes.probation,
            protection = sizes.protection,
            sketch_width,
            loading,
            "created w-tinylfu cache"
        );

        Self {
            shards,
            selector,
            capacity,
        }
    }

    #[inline]
    fn route(&self, key: &str) -> (&CacheShard<T>, u32) {
        let hash = hash_key(key);
        (&self.shards[self.selector.shard_for_hash(hash)], hash)
    }

    /// Looks up `key`, counting the access as a hit.
    pub fn lookup(&self, key: &str) -> Option<Arc<T>> {
        self.lookup_with_timestamp(key).map(|(value, _)| value)
    }

    /// Looks up `key`, returning the value and its write timestamp in ms.
    pub fn lookup_with_timestamp(&self, key: &str) -> Option<(Arc<T>, i64)> {
        let (shard, hash) = self.route(key);
        shard.lookup(key, hash)
    }

    /// Reads `key` without recency or frequency side effects.
    pub fn peek(&self, key: &str) -> Option<Arc<T>> {
        let (shard, hash) = self.route(key);
        shard.peek(key, hash)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.peek(key).is_some()
    }

    /// Takes ownership of `value`, caches it under `key` and returns the
    /// shared handle. See [`CacheShard::insert`].
    pub fn insert(&self, key: &str, value: T) -> Arc<T> {
        let (shard, hash) = self.route(key);
        shard.insert(key, hash, value)
    }

    /// Replaces the value of `key` if present. Returns whether it was.
    pub fn update(&self, key: &str, value: T) -> bool {
        let (shard, hash) = self.route(key);
        shard.update(key, hash, value)
    }

    /// Toggles loading mode on every shard.
    pub fn set_loading(&self, loading: bool) {
        for shard in self.shards.iter() {
            shard.set_loading(loading);
        }
        tracing::debug!(loading, "cache loading mode changed");
    }

    /// Whether shard 0 is in loading mode; all shards change together.
    pub fn is_loading(&self) -> bool {
        self.shards.first().is_some_and(CacheShard::is_loading)
    }

    /// Ages `key` in its shard's frequency sketch.
    pub fn decay(&self, key: &str) {
        let (shard, _) = self.route(key);
        shard.decay(key);
    }

    /// Sketch estimate for `key` in its shard.
    pub fn frequency(&self, key: &str) -> u8 {
        let (shard, _) = self.route(key);
        shard.frequency(key)
    }

    /// Forgets every key's frequency in all shards. Resident entries are kept,
    /// but the next window candidates must earn admission from scratch.
    pub fn clear_frequencies(&self) {
        for shard in &self.shards {
            shard.clear_frequencies();
        }
        tracing::debug!("frequency sketches cleared");
    }

    /// Segment currently holding `key`, if cached.
    pub fn location(&self, key: &str) -> Option<Location> {
        let (shard, hash) = self.route(key);
        shard.location(key, hash)
    }

    /// Total entries across shards. Shards are read one after another, so the
    /// sum is not a consistent snapshot under concurrent writes.
    pub fn len(&self) -> usize {
        self.shards.iter().map(CacheShard::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(CacheShard::is_empty)
    }

    /// Capacity requested at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Shard that owns `key`.
    pub fn shard_index(&self, key: &str) -> usize {
        self.selector.shard_for_key(key)
    }

    pub fn shard(&self, index: usize) -> Option<&CacheShard<T>> {
        self.shards.get(index)
    }

    pub fn shards(&self) -> impl Iterator<Item = &CacheShard<T>> {
        self.shards.iter()
    }

    /// Checks every shard; the error names the first failing shard.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for (index, shard) in self.shards.iter().enumerate() {
            shard
                .check_invariants()
                .map_err(|err| err.in_shard(index))?;
        }
        Ok(())
    }

    /// Sums per-shard counters into one snapshot.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> WTinyLfuMetricsSnapshot {
        self.shards
            .iter()
            .map(CacheShard::metrics_snapshot)
            .fold(WTinyLfuMetricsSnapshot::default(), |acc, shard| acc.merge(&shard))
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<WTinyLfuMetricsSnapshot> for WTinyLfuCache<T> {
    fn snapshot(&self) -> WTinyLfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}
