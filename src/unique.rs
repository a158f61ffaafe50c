/// Per-level unique tables.
///
/// One `LevelTable` exists for every variable level. A table is a bucket
/// array of collision-chain heads; the chains run through the `next` field
/// of the node records themselves, so the table stores no key material of
/// its own. The hash key is the (then, else) edge pair; the level is
/// implicit in which table is consulted.
use std::hash::Hasher;

use wyhash::WyHash;

use crate::common::NodeId;
use crate::nodes::{Edge, NodeStore, NIL};

const INIT_BUCKETS: usize = 4;

/// Chains longer than this on average trigger a doubling rehash.
const MAX_LOAD: usize = 4;

pub fn pair_hash(then_edge: Edge, else_edge: Edge) -> u64 {
    let mut h = WyHash::default();
    h.write_u64(then_edge.bits());
    h.write_u64(else_edge.bits());
    h.finish()
}

#[derive(Debug)]
pub struct LevelTable {
    buckets: Vec<NodeId>,
    entries: usize,
}

impl LevelTable {
    pub fn new() -> Self {
        Self {
            buckets: vec![NIL; INIT_BUCKETS],
            entries: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    #[inline]
    fn bucket(&self, hash: u64) -> usize {
        (hash as usize) & (self.buckets.len() - 1)
    }

    /// Walks the collision chain for the given edge pair.
    pub fn find(&self, store: &NodeStore, then_edge: Edge, else_edge: Edge) -> Option<NodeId> {
        let mut cur = self.buckets[self.bucket(pair_hash(then_edge, else_edge))];
        while cur != NIL {
            let node = store.node(cur);
            if node.then_edge == then_edge && node.else_edge == else_edge {
                return Some(cur);
            }
            cur = node.next;
        }
        None
    }

    /// Splices a freshly allocated node at its chain head. The caller is
    /// responsible for having checked `find` first.
    pub fn insert(&mut self, store: &mut NodeStore, id: NodeId) {
        let (t, e) = {
            let node = store.node(id);
            (node.then_edge, node.else_edge)
        };
        let b = self.bucket(pair_hash(t, e));
        store.node_mut(id).next = self.buckets[b];
        self.buckets[b] = id;
        self.entries += 1;
        if self.entries > MAX_LOAD * self.buckets.len() {
            self.rehash(store);
        }
    }

    fn rehash(&mut self, store: &mut NodeStore) {
        let old = std::mem::take(&mut self.buckets);
        self.buckets = vec![NIL; old.len() * 2];
        log::debug!(
            "unique table rehash: {} entries into {} buckets",
            self.entries,
            self.buckets.len()
        );
        for head in old {
            let mut cur = head;
            while cur != NIL {
                let (next, t, e) = {
                    let node = store.node(cur);
                    (node.next, node.then_edge, node.else_edge)
                };
                let b = self.bucket(pair_hash(t, e));
                store.node_mut(cur).next = self.buckets[b];
                self.buckets[b] = cur;
                cur = next;
            }
        }
    }

    /// Sweep pass: unlinks every node the predicate rejects and returns the
    /// freed slots to the store.
    pub fn sweep<F>(&mut self, store: &mut NodeStore, mut keep: F) -> usize
    where
        F: FnMut(&NodeStore, NodeId) -> bool,
    {
        let mut freed = 0;
        for b in 0..self.buckets.len() {
            let mut cur = self.buckets[b];
            let mut prev = NIL;
            while cur != NIL {
                let next = store.node(cur).next;
                if keep(store, cur) {
                    prev = cur;
                } else {
                    if prev == NIL {
                        self.buckets[b] = next;
                    } else {
                        store.node_mut(prev).next = next;
                    }
                    store.release_slot(cur);
                    self.entries -= 1;
                    freed += 1;
                }
                cur = next;
            }
        }
        freed
    }
}
