pub use crate::builder::CacheBuilder;
pub use crate::ds::{
    EvictionSegment, FrequencySketch, HashIndex, Location, Node, ShardSelector, SlotArena, SlotId,
};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::WTinyLfuMetricsSnapshot;
pub use crate::policy::w_tinylfu::{CacheShard, SegmentSizes, WTinyLfuCache};
