//! Per-node search bookkeeping.

use std::ops::{Index, IndexMut};

use ra_core::NodeIdx;

/// Where a node stands in the search.
///
/// ```text
/// Unvisited ──▶ Open ◀──▶ Closed
/// ```
///
/// A node never returns to `Unvisited`.  `Closed → Open` happens only when a
/// strictly cheaper path is found (inconsistent heuristics).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Membership {
    #[default]
    Unvisited,
    Open,
    Closed,
}

/// Search state of one node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeStatus {
    /// Best known cost from the start.  `f64::INFINITY` until discovered.
    pub g: f64,
    /// Heuristic estimate to the target; computed once on discovery.
    pub h: f64,
    /// `g + h`; the node's open-list priority.
    pub f: f64,
    /// Predecessor on the best known path.  `NodeIdx::INVALID` for the start
    /// and for undiscovered nodes.
    pub parent: NodeIdx,
    pub membership: Membership,
}

impl Default for NodeStatus {
    fn default() -> Self {
        Self {
            g:          f64::INFINITY,
            h:          0.0,
            f:          f64::INFINITY,
            parent:     NodeIdx::INVALID,
            membership: Membership::Unvisited,
        }
    }
}

impl NodeStatus {
    /// `true` once the node has been reached by any path.
    #[inline]
    pub fn is_discovered(&self) -> bool {
        self.membership != Membership::Unvisited
    }
}

/// One [`NodeStatus`] per graph node, indexed by `NodeIdx`.
///
/// Allocated fresh for every search and owned by it.
#[derive(Debug, Clone)]
pub struct StatusTable {
    entries: Vec<NodeStatus>,
}

impl StatusTable {
    pub fn new(node_count: usize) -> Self {
        Self { entries: vec![NodeStatus::default(); node_count] }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of nodes currently in `membership`.
    pub fn count(&self, membership: Membership) -> usize {
        self.entries.iter().filter(|s| s.membership == membership).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIdx, &NodeStatus)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, s)| (NodeIdx(i as u32), s))
    }
}

impl Index<NodeIdx> for StatusTable {
    type Output = NodeStatus;

    #[inline]
    fn index(&self, node: NodeIdx) -> &NodeStatus {
        &self.entries[node.index()]
    }
}

impl IndexMut<NodeIdx> for StatusTable {
    #[inline]
    fn index_mut(&mut self, node: NodeIdx) -> &mut NodeStatus {
        &mut self.entries[node.index()]
    }
}
