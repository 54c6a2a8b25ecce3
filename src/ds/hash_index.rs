//! Separate-chaining hash index from key to node.
//!
//! Buckets hold the head [`SlotId`] of a singly linked chain threaded through
//! each node's `next_hash` field. The bucket count is always a power of two and
//! a bucket is picked with `hash & (buckets - 1)`, reusing the hash cached on
//! the node so keys are never rehashed.
//!
//! ```text
//!   buckets (len 4)
//!   ┌───┐
//!   │ 0 │──► [k1] ──► [k5] ──► None
//!   │ 1 │──► None
//!   │ 2 │──► [k2] ──► None
//!   │ 3 │──► [k3] ──► [k7] ──► [k9] ──► None
//!   └───┘
//! ```
//!
//! The table grows whenever the element count exceeds the bucket count and
//! never shrinks.
//!
//! ## Performance
//! - `lookup` / `insert` / `remove`: O(chain length), O(1) expected
//! - growth: O(n) rehash, amortized O(1) per insert

use crate::ds::node::Node;
use crate::ds::slot_arena::{SlotArena, SlotId};

/// Bucket count of a freshly created index.
pub const INITIAL_BUCKETS: usize = 4;

/// Hash index mapping keys to node ids stored in a [`SlotArena`].
///
/// The index never owns nodes: `insert` and `remove` only link and unlink
/// chain entries, the caller decides when a node is freed.
#[derive(Debug)]
pub struct HashIndex {
    buckets: Vec<Option<SlotId>>,
    len: usize,
}

/// Position of a chain entry: the predecessor link and the entry itself.
#[derive(Clone, Copy)]
struct ChainPos {
    prev: Option<SlotId>,
    found: Option<SlotId>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self {
            buckets: vec![None; INITIAL_BUCKETS],
            len: 0,
        }
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize & (self.buckets.len() - 1)
    }

    fn find<T>(&self, arena: &SlotArena<Node<T>>, key: &str, hash: u32) -> ChainPos {
        let mut prev = None;
        let mut current = self.buckets[self.bucket_of(hash)];
        while let Some(id) = current {
            let Some(node) = arena.get(id) else {
                break;
            };
            if node.matches(key, hash) {
                return ChainPos {
                    prev,
                    found: Some(id),
                };
            }
            prev = Some(id);
            current = node.next_hash;
        }
        ChainPos { prev, found: None }
    }

    fn find_id<T>(&self, arena: &SlotArena<Node<T>>, target: SlotId) -> Option<ChainPos> {
        let hash = arena.get(target)?.hash;
        let mut prev = None;
        let mut current = self.buckets[self.bucket_of(hash)];
        while let Some(id) = current {
            if id == target {
                return Some(ChainPos {
                    prev,
                    found: Some(id),
                });
            }
            prev = Some(id);
            current = arena.get(id)?.next_hash;
        }
        None
    }

    /// Points the link that currently leads to a chain entry at `to`.
    fn relink<T>(
        &mut self,
        arena: &mut SlotArena<Node<T>>,
        prev: Option<SlotId>,
        hash: u32,
        to: Option<SlotId>,
    ) {
        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = arena.get_mut(prev_id) {
                    prev_node.next_hash = to;
                }
            },
            None => {
                let bucket = self.bucket_of(hash);
                self.buckets[bucket] = to;
            },
        }
    }

    /// Returns the id of the node indexed under `key`, if any.
    pub fn lookup<T>(&self, arena: &SlotArena<Node<T>>, key: &str, hash: u32) -> Option<SlotId> {
        self.find(arena, key, hash).found
    }

    /// Indexes the node `id` under its own key and hash.
    ///
    /// If another node was indexed under the same key it takes that node's
    /// place in the chain and the displaced id is returned, unlinked but still
    /// allocated in the arena.
    pub fn insert<T>(&mut self, arena: &mut SlotArena<Node<T>>, id: SlotId) -> Option<SlotId> {
        let (pos, hash) = {
            let node = arena.get(id)?;
            (self.find(arena, &node.key, node.hash), node.hash)
        };
        if pos.found == Some(id) {
            return None;
        }

        let successor = pos
            .found
            .and_then(|old| arena.get(old))
            .and_then(|old| old.next_hash);
        if let Some(node) = arena.get_mut(id) {
            node.next_hash = successor;
        }
        self.relink(arena, pos.prev, hash, Some(id));

        match pos.found {
            Some(old) => {
                if let Some(old_node) = arena.get_mut(old) {
                    old_node.next_hash = None;
                }
                Some(old)
            },
            None => {
                self.len += 1;
                if self.len > self.buckets.len() {
                    self.grow(arena);
                }
                None
            },
        }
    }

    /// Unlinks and returns the node indexed under `key`.
    pub fn remove<T>(
        &mut self,
        arena: &mut SlotArena<Node<T>>,
        key: &str,
        hash: u32,
    ) -> Option<SlotId> {
        let pos = self.find(arena, key, hash);
        let id = pos.found?;
        self.unlink_at(arena, pos.prev, id, hash);
        Some(id)
    }

    /// Unlinks the node `id` by identity. Returns `false` if it is not indexed.
    pub fn remove_id<T>(&mut self, arena: &mut SlotArena<Node<T>>, id: SlotId) -> bool {
        let Some(pos) = self.find_id(arena, id) else {
            return false;
        };
        let Some(hash) = arena.get(id).map(|node| node.hash) else {
            return false;
        };
        self.unlink_at(arena, pos.prev, id, hash);
        true
    }

    fn unlink_at<T>(
        &mut self,
        arena: &mut SlotArena<Node<T>>,
        prev: Option<SlotId>,
        id: SlotId,
        hash: u32,
    ) {
        let successor = arena.get_mut(id).and_then(|node| node.next_hash.take());
        self.relink(arena, prev, hash, successor);
        self.len -= 1;
    }

    fn grow<T>(&mut self, arena: &mut SlotArena<Node<T>>) {
        let mut new_len = INITIAL_BUCKETS;
        while new_len < self.len {
            new_len *= 2;
        }
        let old_len = self.buckets.len();
        let old = std::mem::replace(&mut self.buckets, vec![None; new_len]);

        for head in old {
            let mut current = head;
            while let Some(id) = current {
                let Some(node) = arena.get_mut(id) else {
                    break;
                };
                current = node.next_hash;
                let bucket = node.hash as usize & (new_len - 1);
                node.next_hash = self.buckets[bucket];
                self.buckets[bucket] = Some(id);
            }
        }

        tracing::trace!(
            old_buckets = old_len,
            new_buckets = new_len,
            len = self.len,
            "hash index grew"
        );
    }

    /// Iterates every indexed id, bucket by bucket.
    pub fn iter_ids<'a, T>(
        &'a self,
        arena: &'a SlotArena<Node<T>>,
    ) -> impl Iterator<Item = SlotId> + 'a {
        self.buckets.iter().flat_map(move |head| {
            std::iter::successors(*head, move |id| {
                arena.get(*id).and_then(|node| node.next_hash)
            })
        })
    }
}

impl Default for HashIndex {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod property_tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8),
        Remove(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::Insert),
            any::<u8>().prop_map(Op::Remove),
        ]
    }

    proptest! {
        /// Property: the index agrees with a reference map after any op sequence
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_index_matches_reference(ops in prop::collection::vec(op_strategy(), 0..300)) {
            let mut arena = SlotArena::new();
            let mut index = HashIndex::new();
            let mut reference: HashMap<String, SlotId> = HashMap::new();

            for op in ops {
                match op {
                    Op::Insert(k) => {
                        let slot = k % 64;
                        let key = format!("k{slot}");
                        // A narrow hash range forces long chains.
                        let hash = u32::from(slot % 7);
                        let id = arena.insert(Node::new(key.clone(), hash, Arc::new(0u32), 0));
                        let displaced = index.insert(&mut arena, id);
                        prop_assert_eq!(displaced, reference.insert(key, id));
                        if let Some(old) = displaced {
                            arena.remove(old);
                        }
                    },
                    Op::Remove(k) => {
                        let slot = k % 64;
                        let key = format!("k{slot}");
                        let hash = u32::from(slot % 7);
                        let removed = index.remove(&mut arena, &key, hash);
                        prop_assert_eq!(removed, reference.remove(&key));
                        if let Some(id) = removed {
                            arena.remove(id);
                        }
                    },
                }
                prop_assert_eq!(index.len(), reference.len());
            }

            for (key, id) in &reference {
                let hash = arena.get(*id).map(|n| n.hash).unwrap_or_default();
                prop_assert_eq!(index.lookup(&arena, key, hash), Some(*id));
            }
        }
    }
}
