pub mod frequency_sketch;
pub mod hash_index;
pub mod node;
pub mod segment;
pub mod shard;
pub mod slot_arena;

pub use frequency_sketch::{ADMISSION_THRESHOLD, FrequencySketch, HASH_FAMILIES, MAX_COUNT};
pub use hash_index::{HashIndex, INITIAL_BUCKETS};
pub use node::{Location, Node};
pub use segment::EvictionSegment;
pub use shard::ShardSelector;
pub use slot_arena::{SlotArena, SlotId};
