//! The A* frontier: an indexed binary min-heap over node indices.
//!
//! A plain `BinaryHeap` cannot find an arbitrary entry, so engines built on
//! it push duplicates and skip stale pops.  The search here needs the
//! stronger invariant that every open node is queued **exactly once**, so
//! the heap is paired with a `pos` array mapping each `NodeIdx` to its slot:
//!
//! ```text
//! heap: [ (f, seq, node) ... ]      binary min-heap on (f, seq)
//! pos:  [ slot | ABSENT ] per node  pos[heap[i].node] == i
//! ```
//!
//! insert, extract-min, remove-by-key and update are all O(log n).
//!
//! # Ties
//!
//! Entries with equal `f` leave in insertion order: each insert takes the
//! next value of a sequence counter, and `(f, seq)` is the heap key.  An
//! [`update`](OpenList::update) counts as a fresh insert.

use std::cmp::Ordering;

use ra_core::NodeIdx;

use crate::OpenListError;

const ABSENT: u32 = u32::MAX;

#[derive(Copy, Clone, Debug)]
struct Entry {
    f:    f64,
    seq:  u64,
    node: NodeIdx,
}

impl Entry {
    #[inline]
    fn precedes(&self, other: &Entry) -> bool {
        match self.f.total_cmp(&other.f) {
            Ordering::Less    => true,
            Ordering::Greater => false,
            Ordering::Equal   => self.seq < other.seq,
        }
    }
}

/// Priority frontier keyed by total estimated cost `f`.
#[derive(Debug, Clone)]
pub struct OpenList {
    heap:     Vec<Entry>,
    /// Heap slot of each node, `ABSENT` when not queued.  Indexed by `NodeIdx`.
    pos:      Vec<u32>,
    next_seq: u64,
}

impl OpenList {
    /// An empty list able to hold any node of a graph with `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            heap:     Vec::new(),
            pos:      vec![ABSENT; node_count],
            next_seq: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeIdx) -> bool {
        self.pos[node.index()] != ABSENT
    }

    /// Current priority of `node`, if queued.
    pub fn priority(&self, node: NodeIdx) -> Option<f64> {
        match self.pos[node.index()] {
            ABSENT => None,
            slot   => Some(self.heap[slot as usize].f),
        }
    }

    /// The minimum entry without removing it.
    pub fn peek_min(&self) -> Option<(NodeIdx, f64)> {
        self.heap.first().map(|e| (e.node, e.f))
    }

    /// Queue `node` with priority `f`.
    ///
    /// `node` must not already be queued; use [`update`](Self::update) to
    /// change a queued node's priority.
    pub fn insert(&mut self, node: NodeIdx, f: f64) {
        debug_assert!(!self.contains(node), "{node} is already in the open list");
        let seq = self.next_seq;
        self.next_seq += 1;

        let slot = self.heap.len();
        self.heap.push(Entry { f, seq, node });
        self.pos[node.index()] = slot as u32;
        self.sift_up(slot);
    }

    /// Remove and return the entry with the lowest `f` (earliest inserted
    /// among equals).
    pub fn extract_min(&mut self) -> Result<(NodeIdx, f64), OpenListError> {
        if self.heap.is_empty() {
            return Err(OpenListError::Empty);
        }
        let top = self.take(0);
        Ok((top.node, top.f))
    }

    /// Remove `node` from the list, returning its priority.  `None` (and no
    /// change) if it was not queued.
    pub fn remove(&mut self, node: NodeIdx) -> Option<f64> {
        match self.pos[node.index()] {
            ABSENT => None,
            slot   => Some(self.take(slot as usize).f),
        }
    }

    /// Re-queue `node` with a new priority: remove if present, then insert.
    pub fn update(&mut self, node: NodeIdx, f: f64) {
        self.remove(node);
        self.insert(node, f);
    }

    /// Drop every entry, keeping allocations.
    pub fn clear(&mut self) {
        for e in &self.heap {
            self.pos[e.node.index()] = ABSENT;
        }
        self.heap.clear();
    }

    /// Queued nodes in heap order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (NodeIdx, f64)> + '_ {
        self.heap.iter().map(|e| (e.node, e.f))
    }

    // ── Heap internals ────────────────────────────────────────────────────

    /// Remove the entry at `slot`, restoring heap order.
    fn take(&mut self, slot: usize) -> Entry {
        let last = self.heap.len() - 1;
        self.swap(slot, last);
        let Some(entry) = self.heap.pop() else {
            unreachable!("take() on an empty heap");
        };
        self.pos[entry.node.index()] = ABSENT;

        if slot < self.heap.len() {
            // The moved-in element may need to go either way.
            if slot > 0 && self.heap[slot].precedes(&self.heap[(slot - 1) / 2]) {
                self.sift_up(slot);
            } else {
                self.sift_down(slot);
            }
        }
        entry
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.heap[slot].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.heap[right].precedes(&self.heap[left]) {
                right
            } else {
                left
            };
            if !self.heap[child].precedes(&self.heap[slot]) {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.pos[self.heap[a].node.index()] = a as u32;
        self.pos[self.heap[b].node.index()] = b as u32;
    }

    /// Check heap order and the position map.  Test-only; O(n + N).
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut seen = vec![false; self.pos.len()];
        for (i, e) in self.heap.iter().enumerate() {
            assert!(!seen[e.node.index()], "{} queued twice", e.node);
            seen[e.node.index()] = true;
            assert_eq!(self.pos[e.node.index()], i as u32, "pos out of sync for {}", e.node);
            if i > 0 {
                assert!(
                    !e.precedes(&self.heap[(i - 1) / 2]),
                    "heap order violated at slot {i}"
                );
            }
        }
        let queued = self.pos.iter().filter(|&&p| p != ABSENT).count();
        assert_eq!(queued, self.heap.len(), "stale entries in pos");
    }
}
