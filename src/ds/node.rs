//! Cache entry record shared by the hash index and the eviction segments.

use std::sync::Arc;

use crate::ds::slot_arena::SlotId;

/// Which eviction segment currently owns a node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Location {
    /// Indexed but not linked into any segment. Only seen mid-operation.
    Alone,
    /// Small recency window that absorbs newly inserted keys.
    Window,
    /// Main-region segment for admitted keys that have not been hit since.
    Probation,
    /// Main-region segment for keys hit while in probation.
    Protection,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Alone => "alone",
            Location::Window => "window",
            Location::Probation => "probation",
            Location::Protection => "protection",
        }
    }
}

/// One cached entry.
///
/// A node sits in a hash chain (`next_hash`) and in one eviction segment
/// (`prev`/`next`) at the same time. Links are arena ids owned by the shard.
#[derive(Debug)]
pub struct Node<T> {
    pub(crate) key: String,
    pub(crate) hash: u32,
    pub(crate) value: Arc<T>,
    pub(crate) timestamp_ms: i64,
    pub(crate) location: Location,
    pub(crate) next_hash: Option<SlotId>,
    pub(crate) prev: Option<SlotId>,
    pub(crate) next: Option<SlotId>,
}

impl<T> Node<T> {
    pub fn new(key: impl Into<String>, hash: u32, value: Arc<T>, timestamp_ms: i64) -> Self {
        Self {
            key: key.into(),
            hash,
            value,
            timestamp_ms,
            location: Location::Alone,
            next_hash: None,
            prev: None,
            next: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }

    pub fn value(&self) -> &Arc<T> {
        &self.value
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Swaps in a new value and timestamp. Outstanding handles to the old
    /// value stay valid.
    pub(crate) fn replace_value(&mut self, value: Arc<T>, timestamp_ms: i64) {
        self.value = value;
        self.timestamp_ms = timestamp_ms;
    }

    pub(crate) fn matches(&self, key: &str, hash: u32) -> bool {
        self.hash == hash && self.key == key
    }
}
