//! Bounded LRU segment threaded through arena nodes.
//!
//! A shard owns three of these (window, probation, protection). Each segment
//! links its members through the `prev`/`next` fields of the nodes themselves,
//! so moving a node between segments is an O(1) unlink plus append and never
//! reallocates.
//!
//! ```text
//!   lru (oldest)                                   mru (newest)
//!     │                                              │
//!     ▼                                              ▼
//!   [id_4] ◄──► [id_9] ◄──► [id_2] ◄──► ... ◄──► [id_7]
//!     ▲
//!     └── evicted first when the segment is full
//! ```
//!
//! Segments are not synchronized; the owning shard's lock covers them.

use crate::ds::node::{Location, Node};
use crate::ds::slot_arena::{SlotArena, SlotId};

/// Fixed-capacity LRU list over nodes stored in a [`SlotArena`].
#[derive(Debug)]
pub struct EvictionSegment {
    capacity: usize,
    len: usize,
    location: Location,
    lru: Option<SlotId>,
    mru: Option<SlotId>,
}

impl EvictionSegment {
    /// Creates an empty segment that tags its members with `location`.
    ///
    /// A zero capacity is legal: the segment then behaves as capacity one and
    /// keeps only its newest member.
    pub fn new(capacity: usize, location: Location) -> Self {
        debug_assert_ne!(location, Location::Alone);
        Self {
            capacity,
            len: 0,
            location,
            lru: None,
            mru: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest member count the segment can reach, which is one even at zero
    /// capacity.
    pub fn max_len(&self) -> usize {
        self.capacity.max(1)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Oldest member, the next to be evicted.
    pub fn lru(&self) -> Option<SlotId> {
        self.lru
    }

    /// Newest member.
    pub fn mru(&self) -> Option<SlotId> {
        self.mru
    }

    /// Appends `id` as most recently used.
    ///
    /// If the segment is full and not empty, its least recently used member is
    /// unlinked, tagged [`Location::Alone`] and returned. The caller decides
    /// its fate.
    pub fn insert<T>(&mut self, arena: &mut SlotArena<Node<T>>, id: SlotId) -> Option<SlotId> {
        let evicted = if self.len >= self.capacity && self.lru.is_some() {
            self.pop_lru(arena)
        } else {
            None
        };
        self.attach_mru(arena, id);
        evicted
    }

    /// Unlinks `id`, which must be a member, and tags it [`Location::Alone`].
    pub fn remove<T>(&mut self, arena: &mut SlotArena<Node<T>>, id: SlotId) {
        debug_assert_eq!(arena.get(id).map(|n| n.location), Some(self.location));
        self.detach(arena, id);
        set_location(arena, id, Location::Alone);
    }

    /// Moves the member `id` to the most recently used end.
    pub fn hit<T>(&mut self, arena: &mut SlotArena<Node<T>>, id: SlotId) {
        if self.mru == Some(id) {
            return;
        }
        self.detach(arena, id);
        self.attach_mru(arena, id);
    }

    /// Iterates members from least to most recently used.
    pub fn iter_ids<'a, T>(
        &'a self,
        arena: &'a SlotArena<Node<T>>,
    ) -> impl Iterator<Item = SlotId> + 'a {
        std::iter::successors(self.lru, move |id| arena.get(*id).and_then(|node| node.next))
    }

    fn pop_lru<T>(&mut self, arena: &mut SlotArena<Node<T>>) -> Option<SlotId> {
        let id = self.lru?;
        self.detach(arena, id);
        set_location(arena, id, Location::Alone);
        Some(id)
    }

    fn attach_mru<T>(&mut self, arena: &mut SlotArena<Node<T>>, id: SlotId) {
        let old_mru = self.mru;
        let Some(node) = arena.get_mut(id) else {
            return;
        };
        node.prev = old_mru;
        node.next = None;
        node.location = self.location;

        match old_mru.and_then(|mru| arena.get_mut(mru)) {
            Some(mru_node) => mru_node.next = Some(id),
            None => self.lru = Some(id),
        }
        self.mru = Some(id);
        self.len += 1;
    }

    fn detach<T>(&mut self, arena: &mut SlotArena<Node<T>>, id: SlotId) {
        let Some(node) = arena.get_mut(id) else {
            return;
        };
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev.and_then(|prev_id| arena.get_mut(prev_id)) {
            Some(prev_node) => prev_node.next = next,
            None => self.lru = next,
        }
        match next.and_then(|next_id| arena.get_mut(next_id)) {
            Some(next_node) => next_node.prev = prev,
            None => self.mru = prev,
        }
        self.len -= 1;
    }

    /// Walks the list checking link symmetry, tags and length.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants<T>(&self, arena: &SlotArena<Node<T>>) {
        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.lru;

        while let Some(id) = current {
            let node = arena.get(id).expect("segment member missing from arena");
            assert_eq!(node.prev, prev);
            assert_eq!(node.location, self.location);
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len, "segment list longer than its length");
        }

        assert_eq!(self.mru, prev);
        assert_eq!(count, self.len);
        assert!(self.len <= self.max_len());
    }
}

fn set_location<T>(arena: &mut SlotArena<Node<T>>, id: SlotId, location: Location) {
    if let Some(node) = arena.get_mut(id) {
        node.location = location;
    }
}
